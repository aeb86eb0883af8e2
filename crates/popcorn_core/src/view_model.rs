use crate::{MovieDetail, WatchedSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchActivity {
    #[default]
    Idle,
    Debouncing,
    Fetching,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub query: String,
    pub activity: SearchActivity,
    pub result_count: usize,
    pub results: Vec<ResultRowView>,
    pub watched: Vec<WatchedRowView>,
    pub summary: WatchedSummary,
    /// Present while a movie is open; the watched panel is hidden meanwhile.
    pub details: Option<DetailsView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    pub id: String,
    pub title: String,
    pub year: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatchedRowView {
    pub id: String,
    pub title: String,
    pub imdb_rating: Option<f64>,
    pub user_rating: u8,
    pub runtime_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsView {
    pub movie_id: String,
    pub loading: bool,
    pub detail: Option<MovieDetail>,
    pub rating: u8,
    pub rated: bool,
    pub can_add: bool,
}
