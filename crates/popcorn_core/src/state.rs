use crate::view_model::{
    AppViewModel, DetailsView, ResultRowView, SearchActivity, WatchedRowView,
};
use crate::{DetailsState, SearchPhase, SearchState, Selection, WatchedList};

/// Identifies one lookup. Doubles as its cancellation handle.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    search: SearchState,
    watched: WatchedList,
    selection: Selection,
    details: DetailsState,
    next_request: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn watched(&self) -> &WatchedList {
        &self.watched
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn details(&self) -> &DetailsState {
        &self.details
    }

    pub fn view(&self) -> AppViewModel {
        let results: Vec<ResultRowView> = self
            .search
            .results()
            .iter()
            .map(|item| ResultRowView {
                id: item.id.clone(),
                title: item.title.clone(),
                year: item.year.clone(),
                selected: item.id == self.selection.id,
            })
            .collect();

        let watched = self
            .watched
            .entries()
            .iter()
            .map(|movie| WatchedRowView {
                id: movie.id.clone(),
                title: movie.title.clone(),
                imdb_rating: movie.imdb_rating,
                user_rating: movie.user_rating,
                runtime_minutes: movie.runtime_minutes,
            })
            .collect();

        let details = (!self.selection.is_empty()).then(|| DetailsView {
            movie_id: self.selection.id.clone(),
            loading: self.details.is_loading(),
            detail: self.details.detail().cloned(),
            rating: self.details.rating(),
            rated: self.details.is_rated(),
            can_add: self.details.can_add(&self.selection),
        });

        AppViewModel {
            query: self.search.query().to_string(),
            activity: match self.search.phase() {
                SearchPhase::Idle => SearchActivity::Idle,
                SearchPhase::Debouncing { .. } => SearchActivity::Debouncing,
                SearchPhase::Fetching { .. } => SearchActivity::Fetching,
            },
            result_count: results.len(),
            results,
            watched,
            summary: self.watched.summary(),
            details,
        }
    }

    /// Returns whether a redraw is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn allocate_request(&mut self) -> RequestId {
        self.next_request += 1;
        self.next_request
    }

    pub(crate) fn search_mut(&mut self) -> &mut SearchState {
        &mut self.search
    }

    pub(crate) fn watched_mut(&mut self) -> &mut WatchedList {
        &mut self.watched
    }

    pub(crate) fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub(crate) fn select(&mut self, id: &str) {
        self.selection.select(id, &self.watched);
    }

    pub(crate) fn details_mut(&mut self) -> &mut DetailsState {
        &mut self.details
    }

    /// A movie may only be opened from the results on screen or the watched list.
    pub(crate) fn is_known_movie(&self, id: &str) -> bool {
        self.search.contains(id) || self.watched.contains(id)
    }
}
