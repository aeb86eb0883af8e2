/// A movie the user has rated. Never mutated once in the list.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedMovie {
    pub id: String,
    pub poster_url: String,
    pub title: String,
    pub imdb_rating: Option<f64>,
    pub runtime_minutes: Option<u32>,
    pub user_rating: u8,
}

/// Aggregates shown above the watched list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb: f64,
    pub avg_user: f64,
    pub avg_runtime: f64,
}

/// Ordered set of watched movies keyed by id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WatchedList {
    entries: Vec<WatchedMovie>,
}

impl WatchedList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from persisted entries; later duplicates of an id are dropped.
    pub fn from_entries(entries: Vec<WatchedMovie>) -> Self {
        let mut list = Self::new();
        for movie in entries {
            list.add(movie);
        }
        list
    }

    pub fn entries(&self) -> &[WatchedMovie] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn find(&self, id: &str) -> Option<&WatchedMovie> {
        self.entries.iter().find(|movie| movie.id == id)
    }

    /// Appends `movie` unless its id is already present. Returns true if the list changed.
    pub fn add(&mut self, movie: WatchedMovie) -> bool {
        if self.contains(&movie.id) {
            return false;
        }
        self.entries.push(movie);
        true
    }

    /// Returns true if an entry was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|movie| movie.id != id);
        self.entries.len() != before
    }

    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary {
            count: self.entries.len(),
            avg_imdb: self.mean(|movie| movie.imdb_rating.unwrap_or(0.0)),
            avg_user: self.mean(|movie| f64::from(movie.user_rating)),
            avg_runtime: self.mean(|movie| movie.runtime_minutes.map_or(0.0, f64::from)),
        }
    }

    fn mean(&self, value: impl Fn(&WatchedMovie) -> f64) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .entries
            .iter()
            .map(|movie| {
                let v = value(movie);
                if v.is_finite() {
                    v
                } else {
                    0.0
                }
            })
            .sum();
        round_to_hundredths(total / self.entries.len() as f64)
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
