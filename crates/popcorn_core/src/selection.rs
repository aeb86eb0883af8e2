use crate::WatchedList;

/// The movie open in the details view. An empty id means nothing is open;
/// `user_rating` 0 means unrated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub id: String,
    pub user_rating: u8,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    /// Toggles `id`: selecting the open movie closes it, anything else opens it
    /// with the rating already recorded in `watched`, if any.
    pub fn select(&mut self, id: &str, watched: &WatchedList) {
        if id.is_empty() || self.id == id {
            self.clear();
            return;
        }
        self.id = id.to_string();
        self.user_rating = watched.find(id).map_or(0, |movie| movie.user_rating);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
