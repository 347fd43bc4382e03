use starling_state::ItemId;

/// How the album list is filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum AlbumListFilter {
    #[default]
    Random,
    Newest,
    Starred,
    Genre(String),
}
impl std::fmt::Display for AlbumListFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlbumListFilter::Random => write!(f, "Random"),
            AlbumListFilter::Newest => write!(f, "Recently added"),
            AlbumListFilter::Starred => write!(f, "Favorites"),
            AlbumListFilter::Genre(genre) => write!(f, "Genre: {genre}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    AlbumList(AlbumListFilter),
    Album(ItemId),
    Artist(ItemId),
    PlaylistList,
    Playlist(ItemId),
    NowPlaying,
}

/// A stack of visited routes.
#[derive(Debug, Clone)]
pub struct Router {
    history: Vec<Route>,
}
impl Default for Router {
    fn default() -> Self {
        Self {
            history: vec![Route::AlbumList(AlbumListFilter::default())],
        }
    }
}
impl Router {
    pub fn current(&self) -> &Route {
        // The first route is never popped.
        &self.history[self.history.len() - 1]
    }

    /// Go to `route`, returning whether the route changed.
    pub fn navigate(&mut self, route: Route) -> bool {
        if self.current() == &route {
            return false;
        }
        tracing::debug!("navigating to {route:?}");
        self.history.push(route);
        true
    }

    /// Go back one route, returning whether there was anywhere to go.
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_history() {
        let mut router = Router::default();
        assert!(router.navigate(Route::PlaylistList));
        assert!(!router.navigate(Route::PlaylistList));
        assert!(router.navigate(Route::Playlist(ItemId::from("p1"))));
        assert!(router.back());
        assert_eq!(router.current(), &Route::PlaylistList);
        assert!(router.back());
        assert!(!router.back());
        assert_eq!(router.current(), &Route::AlbumList(AlbumListFilter::Random));
    }
}
