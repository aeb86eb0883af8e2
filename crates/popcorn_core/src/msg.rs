use crate::{MovieDetail, RequestId, SearchResultItem, WatchedMovie};

/// A lookup that failed. Logged only when the request it answers is still live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailed {
    pub reason: String,
}

impl LookupFailed {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the search box.
    QueryChanged(String),
    /// The debounce for a search elapsed and its lookup is on the wire.
    SearchDispatched { request: RequestId },
    /// Engine completion for a search lookup.
    SearchCompleted {
        request: RequestId,
        result: Result<Vec<SearchResultItem>, LookupFailed>,
    },
    /// User clicked a movie in the results or the watched list.
    MovieClicked(String),
    /// User left the details view.
    BackClicked,
    /// User picked a star value in the details view.
    RatingPicked(u8),
    /// User clicked "Add to watch-list".
    AddClicked,
    /// User removed a movie from the watched list.
    RemoveClicked(String),
    /// Engine completion for a details lookup.
    DetailsLoaded {
        request: RequestId,
        result: Result<MovieDetail, LookupFailed>,
    },
    /// Restore the watched list from persisted state.
    RestoreWatched(Vec<WatchedMovie>),
}
