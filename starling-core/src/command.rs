use starling_state::ItemId;

use crate::{api::Mutation, notification::Notification, query::QueryKey, route::Route};

/// What to do with a set of download URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadAction {
    /// Open each URL in the system handler
    Open,
    /// Copy the URLs to the clipboard, one per line
    Copy,
}

/// A side effect requested by a view. Views never talk to the server
/// directly; they return commands which [`crate::Logic`] carries out.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch a query unless it is already cached or in flight.
    Fetch(QueryKey),
    /// Mark a query stale and fetch it again.
    Refetch(QueryKey),
    /// Write to the server, then run `on_success` if the write succeeded.
    Mutate {
        mutation: Mutation,
        on_success: Vec<Command>,
    },
    Navigate(Route),
    Back,
    Download {
        ids: Vec<ItemId>,
        action: DownloadAction,
    },
    Notify(Notification),
}
impl Command {
    pub fn mutate(mutation: Mutation) -> Self {
        Command::Mutate {
            mutation,
            on_success: vec![],
        }
    }
}
