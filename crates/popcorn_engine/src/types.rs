use thiserror::Error;

pub type RequestId = u64;

/// One row of a title search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
}

/// Full record returned by a lookup by id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovieRecord {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
    pub released: String,
    pub runtime: String,
    pub genre: String,
    pub imdb_rating: String,
    pub plot: String,
    pub actors: String,
    pub director: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The debounce for a search elapsed and the request went out.
    SearchDispatched { request: RequestId },
    SearchCompleted {
        request: RequestId,
        result: Result<Vec<SearchHit>, LookupError>,
    },
    DetailsCompleted {
        request: RequestId,
        result: Result<MovieRecord, LookupError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct LookupError {
    pub kind: FailureKind,
    pub message: String,
}

impl LookupError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("invalid endpoint")]
    InvalidEndpoint,
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("network error")]
    Network,
    #[error("undecodable response")]
    Decode,
    /// The API answered with `Response: "False"`.
    #[error("rejected: {reason}")]
    Rejected { reason: String },
}
