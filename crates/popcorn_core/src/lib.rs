//! Popcorn core: pure state machine and view-model helpers.
mod details;
mod effect;
mod msg;
mod search;
mod selection;
mod state;
mod update;
mod view_model;
mod watched;

pub use details::{parse_imdb_rating, parse_runtime_minutes, DetailsState, MovieDetail, MAX_RATING};
pub use effect::Effect;
pub use msg::{LookupFailed, Msg};
pub use search::{SearchPhase, SearchResultItem, SearchState, MIN_QUERY_CHARS};
pub use selection::Selection;
pub use state::{AppState, RequestId};
pub use update::update;
pub use view_model::{AppViewModel, DetailsView, ResultRowView, SearchActivity, WatchedRowView};
pub use watched::{WatchedList, WatchedMovie, WatchedSummary};
