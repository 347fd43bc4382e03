use starling_state::{ItemId, ListType, Row, RowKind, SortContext};

use crate::{
    app_state::AppState,
    command::Command,
    query::{ArtistDetail, QueryData, QueryKey, QueryStatus},
    route::Route,
    view::{
        actions,
        now_playing::clean_biography,
        table::{ContextMenuItem, ListViewTable},
    },
};

/// An artist's biography and albums.
#[derive(Debug, Clone)]
pub struct ArtistView {
    pub id: ItemId,
    pub table: ListViewTable,
}
impl ArtistView {
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            table: ListViewTable::new(ListType::Album, SortContext::page("artistPage"))
                .with_disabled_items([ContextMenuItem::SetRating]),
        }
    }

    pub fn key(&self) -> QueryKey {
        QueryKey::Artist(self.id.clone())
    }

    pub fn mount(&self) -> Vec<Command> {
        vec![Command::Fetch(self.key())]
    }

    pub fn status<'a>(&self, state: &'a AppState) -> QueryStatus<'a> {
        state.query_cache.get(&self.key())
    }

    pub fn detail<'a>(&self, state: &'a AppState) -> Option<&'a ArtistDetail> {
        match state.query_cache.data(&self.key()) {
            Some(QueryData::Artist(detail)) => Some(detail),
            _ => None,
        }
    }

    pub fn biography(&self, state: &AppState) -> Option<String> {
        self.detail(state)
            .and_then(|d| d.biography.as_deref())
            .map(clean_biography)
            .filter(|b| !b.is_empty())
    }

    pub fn rows(&self, state: &AppState) -> Vec<Row> {
        self.detail(state)
            .map(|d| self.table.display_rows(state, &d.albums))
            .unwrap_or_default()
    }

    pub fn toggle_favorite(&self, state: &mut AppState) -> Vec<Command> {
        let Some(artist) = self.detail(state).map(|d| d.artist.clone()) else {
            return vec![];
        };
        actions::toggle_favorite(state, &artist)
    }

    pub fn open(&self, row: &Row) -> Vec<Command> {
        match &row.kind {
            RowKind::Album(album) => vec![Command::Navigate(Route::Album(album.id.clone()))],
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerType;
    use starling_state::{Album, Artist};

    #[test]
    fn test_artist_favorite_updates_header() {
        let mut state = AppState::in_memory(ServerType::Jellyfin);
        let view = ArtistView::new(ItemId::from("ar1"));
        let key = view.key();
        state.query_cache.begin_fetch(&key);
        state.finish_fetch(
            &key,
            Ok(QueryData::Artist(ArtistDetail {
                artist: Row::new(RowKind::Artist(Artist::new("ar1", "Artist"))),
                albums: vec![Row::new(RowKind::Album(Album::new("al1", "One")))],
                biography: None,
            })),
        );
        assert_eq!(view.toggle_favorite(&mut state).len(), 1);
        assert!(view.detail(&state).unwrap().artist.starred());
        assert_eq!(
            view.open(&view.rows(&state)[0]),
            [Command::Navigate(Route::Album(ItemId::from("al1")))]
        );
    }
}
