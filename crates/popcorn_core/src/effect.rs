use crate::{RequestId, WatchedMovie};

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Look up `query` once it has been quiet for the debounce interval.
    ScheduleSearch { request: RequestId, query: String },
    CancelSearch { request: RequestId },
    FetchDetails { request: RequestId, movie_id: String },
    CancelDetails { request: RequestId },
    /// Overwrite the persisted watched list with `movies`.
    PersistWatched { movies: Vec<WatchedMovie> },
}
