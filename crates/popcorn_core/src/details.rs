use crate::{RequestId, Selection, WatchedMovie};

/// Highest star a user can give.
pub const MAX_RATING: u8 = 10;

/// Full record shown in the details view. Text fields are kept as delivered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub poster_url: String,
    pub released: String,
    pub runtime: String,
    pub genre: String,
    pub imdb_rating: String,
    pub plot: String,
    pub actors: String,
    pub director: String,
}

impl MovieDetail {
    pub(crate) fn to_watched(&self, user_rating: u8) -> WatchedMovie {
        WatchedMovie {
            id: self.id.clone(),
            poster_url: self.poster_url.clone(),
            title: self.title.clone(),
            imdb_rating: parse_imdb_rating(&self.imdb_rating),
            runtime_minutes: parse_runtime_minutes(&self.runtime),
            user_rating,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailsState {
    detail: Option<MovieDetail>,
    loading: bool,
    rating: u8,
    rated: bool,
    request: Option<RequestId>,
}

impl DetailsState {
    pub fn detail(&self) -> Option<&MovieDetail> {
        self.detail.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    /// True when the open movie was already on the watched list when it was opened.
    pub fn is_rated(&self) -> bool {
        self.rated
    }

    pub fn request(&self) -> Option<RequestId> {
        self.request
    }

    /// Whether "add to watched" would do anything for `selection` right now.
    pub fn can_add(&self, selection: &Selection) -> bool {
        !selection.is_empty()
            && !self.rated
            && !self.loading
            && self.rating > 0
            && self
                .detail
                .as_ref()
                .is_some_and(|detail| detail.id == selection.id)
    }

    /// Starts loading for a freshly selected movie. Returns the superseded request, if any.
    pub(crate) fn begin(&mut self, request: RequestId, seeded_rating: u8) -> Option<RequestId> {
        let previous = self.request.replace(request);
        self.loading = true;
        self.rating = seeded_rating;
        self.rated = seeded_rating > 0;
        previous
    }

    /// Resets for an empty selection. Returns the request that was in flight, if any.
    pub(crate) fn reset(&mut self) -> Option<RequestId> {
        let previous = self.request.take();
        *self = Self::default();
        previous
    }

    /// Applies a lookup result. Returns false when `request` is not the live one.
    pub(crate) fn finish(&mut self, request: RequestId, detail: Option<MovieDetail>) -> bool {
        if self.request != Some(request) {
            return false;
        }
        self.request = None;
        self.loading = false;
        if let Some(detail) = detail {
            self.detail = Some(detail);
        }
        true
    }

    /// Returns true if the rating changed.
    pub(crate) fn pick_rating(&mut self, rating: u8) -> bool {
        if self.rated || rating == 0 || rating > MAX_RATING || self.rating == rating {
            return false;
        }
        self.rating = rating;
        true
    }
}

/// Parses an IMDb rating such as `"8.6"`. `"N/A"` and other non-numbers yield `None`.
pub fn parse_imdb_rating(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parses the leading number of a runtime such as `"169 min"`.
pub fn parse_runtime_minutes(raw: &str) -> Option<u32> {
    raw.split_whitespace().next()?.parse().ok()
}
