use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::{FailureKind, LookupError, MovieRecord, SearchHit};

pub const DEFAULT_ENDPOINT: &str = "http://www.omdbapi.com/";

#[derive(Debug, Clone)]
pub struct LookupSettings {
    pub endpoint: String,
    pub api_key: String,
    pub result_limit: u32,
    /// Quiet period before a search is sent.
    pub debounce: Duration,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: "fb9425e".to_string(),
            result_limit: 10,
            debounce: Duration::from_millis(1000),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait::async_trait]
pub trait MovieLookup: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, LookupError>;

    async fn details(&self, imdb_id: &str) -> Result<MovieRecord, LookupError>;
}

/// Client for an OMDb-style endpoint.
#[derive(Debug, Clone)]
pub struct OmdbLookup {
    settings: LookupSettings,
    client: reqwest::Client,
}

impl OmdbLookup {
    pub fn new(settings: LookupSettings) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| LookupError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &LookupSettings {
        &self.settings
    }

    fn url(&self, params: &[(&str, &str)]) -> Result<Url, LookupError> {
        let mut url = Url::parse(&self.settings.endpoint)
            .map_err(|err| LookupError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("apikey", &self.settings.api_key)
            .extend_pairs(params);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, LookupError> {
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        decode_payload(&body)
    }
}

#[async_trait::async_trait]
impl MovieLookup for OmdbLookup {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, LookupError> {
        let limit = self.settings.result_limit.to_string();
        let url = self.url(&[("s", query), ("limit", limit.as_str())])?;
        let payload: SearchPayload = self.get(url).await?;
        Ok(payload.search.into_iter().map(SearchHit::from).collect())
    }

    async fn details(&self, imdb_id: &str) -> Result<MovieRecord, LookupError> {
        let url = self.url(&[("i", imdb_id)])?;
        let payload: RecordPayload = self.get(url).await?;
        Ok(payload.into())
    }
}

/// Every answer carries `Response: "True" | "False"`; only then is the body itself decoded.
fn decode_payload<T: DeserializeOwned>(body: &[u8]) -> Result<T, LookupError> {
    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|err| LookupError::new(FailureKind::Decode, err.to_string()))?;
    if !envelope.response.eq_ignore_ascii_case("true") {
        let reason = envelope
            .error
            .unwrap_or_else(|| "no reason given".to_string());
        return Err(LookupError::new(
            FailureKind::Rejected { reason },
            "negative response",
        ));
    }
    serde_json::from_slice(body).map_err(|err| LookupError::new(FailureKind::Decode, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> LookupError {
    if err.is_timeout() {
        return LookupError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return LookupError::new(FailureKind::Decode, err.to_string());
    }
    LookupError::new(FailureKind::Network, err.to_string())
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchPayload {
    #[serde(rename = "Search", default)]
    search: Vec<SearchHitPayload>,
}

#[derive(Debug, Deserialize)]
struct SearchHitPayload {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
}

impl From<SearchHitPayload> for SearchHit {
    fn from(hit: SearchHitPayload) -> Self {
        Self {
            imdb_id: hit.imdb_id,
            title: hit.title,
            year: hit.year,
            poster: hit.poster,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RecordPayload {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Poster")]
    poster: String,
    #[serde(rename = "Released")]
    released: String,
    #[serde(rename = "Runtime")]
    runtime: String,
    #[serde(rename = "Genre")]
    genre: String,
    #[serde(rename = "imdbRating")]
    imdb_rating: String,
    #[serde(rename = "Plot")]
    plot: String,
    #[serde(rename = "Actors")]
    actors: String,
    #[serde(rename = "Director")]
    director: String,
}

impl From<RecordPayload> for MovieRecord {
    fn from(record: RecordPayload) -> Self {
        Self {
            imdb_id: record.imdb_id,
            title: record.title,
            year: record.year,
            poster: record.poster,
            released: record.released,
            runtime: record.runtime,
            genre: record.genre,
            imdb_rating: record.imdb_rating,
            plot: record.plot,
            actors: record.actors,
            director: record.director,
        }
    }
}
