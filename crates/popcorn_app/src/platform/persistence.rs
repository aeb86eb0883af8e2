use engine_logging::{engine_error, engine_info, engine_warn};
use popcorn_core::{WatchedMovie, MAX_RATING};
use popcorn_engine::KeyValueStore;
use serde::{Deserialize, Deserializer, Serialize};

const WATCHED_KEY: &str = "watched";

/// On-disk shape of a watched movie. Older files stored the numbers as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedMovie {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "imdbRating", default, deserialize_with = "lenient_number")]
    imdb_rating: Option<f64>,
    #[serde(rename = "runtime", default, deserialize_with = "lenient_minutes")]
    runtime: Option<u32>,
    #[serde(rename = "userRating", default, deserialize_with = "lenient_rating")]
    user_rating: u8,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(number)) => Some(number),
        Some(NumberOrText::Text(text)) => text.trim().parse().ok(),
        Some(NumberOrText::Other(_)) | None => None,
    };
    Ok(value.filter(|number: &f64| number.is_finite()))
}

fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?
        .filter(|minutes| *minutes >= 0.0)
        .map(|minutes| minutes.round().min(f64::from(u32::MAX)) as u32))
}

/// Ratings outside `0..=MAX_RATING` are clamped; unreadable ones count as unrated.
fn lenient_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?
        .map(|rating| rating.round().clamp(0.0, f64::from(MAX_RATING)) as u8)
        .unwrap_or(0))
}

impl From<PersistedMovie> for WatchedMovie {
    fn from(movie: PersistedMovie) -> Self {
        Self {
            id: movie.imdb_id,
            poster_url: movie.poster,
            title: movie.title,
            imdb_rating: movie.imdb_rating,
            runtime_minutes: movie.runtime,
            user_rating: movie.user_rating,
        }
    }
}

impl From<&WatchedMovie> for PersistedMovie {
    fn from(movie: &WatchedMovie) -> Self {
        Self {
            imdb_id: movie.id.clone(),
            poster: movie.poster_url.clone(),
            title: movie.title.clone(),
            imdb_rating: movie.imdb_rating,
            runtime: movie.runtime_minutes,
            user_rating: movie.user_rating,
        }
    }
}

/// Reads the watched list. Anything missing or unreadable counts as an empty list.
pub(crate) fn load_watched(store: &dyn KeyValueStore) -> Vec<WatchedMovie> {
    let content = match store.get(WATCHED_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => return Vec::new(),
        Err(err) => {
            engine_warn!("Failed to read watched list: {}", err);
            return Vec::new();
        }
    };

    let movies: Vec<PersistedMovie> = match serde_json::from_str(&content) {
        Ok(movies) => movies,
        Err(err) => {
            engine_warn!("Failed to parse watched list, starting empty: {}", err);
            return Vec::new();
        }
    };

    let watched: Vec<WatchedMovie> = movies
        .into_iter()
        .filter(|movie| !movie.imdb_id.is_empty())
        .map(WatchedMovie::from)
        .collect();
    engine_info!("Loaded {} watched movies", watched.len());
    watched
}

/// Overwrites the persisted watched list with `watched`.
pub(crate) fn save_watched(store: &dyn KeyValueStore, watched: &[WatchedMovie]) {
    let persisted: Vec<PersistedMovie> = watched.iter().map(PersistedMovie::from).collect();
    let content = match serde_json::to_string(&persisted) {
        Ok(text) => text,
        Err(err) => {
            engine_error!("Failed to serialize watched list: {}", err);
            return;
        }
    };

    if let Err(err) = store.set(WATCHED_KEY, &content) {
        engine_error!("Failed to write watched list: {}", err);
    }
}
