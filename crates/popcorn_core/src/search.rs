use crate::RequestId;

/// Queries whose trimmed length does not exceed this many characters are not looked up.
pub const MIN_QUERY_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultItem {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
}

/// Where the current query is in its lookup lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    /// Waiting for the query to settle before the lookup goes out.
    Debouncing { request: RequestId },
    Fetching { request: RequestId },
}

impl SearchPhase {
    pub fn request(self) -> Option<RequestId> {
        match self {
            SearchPhase::Idle => None,
            SearchPhase::Debouncing { request } | SearchPhase::Fetching { request } => {
                Some(request)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    query: String,
    results: Vec<SearchResultItem>,
    phase: SearchPhase,
}

impl SearchState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResultItem] {
        &self.results
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn contains(&self, id: &str) -> bool {
        self.results.iter().any(|item| item.id == id)
    }

    pub(crate) fn set_query(&mut self, query: String) {
        self.query = query;
    }

    /// Returns the trimmed query when it is long enough to be looked up.
    pub(crate) fn lookup_query(&self) -> Option<&str> {
        let trimmed = self.query.trim();
        (trimmed.chars().count() > MIN_QUERY_CHARS).then_some(trimmed)
    }

    /// Drops the live request, returning it so the caller can cancel it.
    pub(crate) fn take_live_request(&mut self) -> Option<RequestId> {
        std::mem::take(&mut self.phase).request()
    }

    pub(crate) fn begin_debounce(&mut self, request: RequestId) {
        self.phase = SearchPhase::Debouncing { request };
    }

    /// Returns true if the dispatched request is the live one.
    pub(crate) fn mark_dispatched(&mut self, request: RequestId) -> bool {
        if self.phase == (SearchPhase::Debouncing { request }) {
            self.phase = SearchPhase::Fetching { request };
            true
        } else {
            false
        }
    }

    /// Settles the live request. Returns false when `request` is stale.
    pub(crate) fn settle(&mut self, request: RequestId) -> bool {
        if self.phase.request() == Some(request) {
            self.phase = SearchPhase::Idle;
            true
        } else {
            false
        }
    }

    pub(crate) fn replace_results(&mut self, results: Vec<SearchResultItem>) {
        self.results = results;
    }

    /// Returns true if there was anything to clear.
    pub(crate) fn clear_results(&mut self) -> bool {
        let had_results = !self.results.is_empty();
        self.results.clear();
        had_results
    }
}
