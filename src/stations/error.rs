use thiserror::Error;

/// Failure of an injected data collaborator (station search, historical dataset or
/// current conditions). Lookups pass it through unchanged.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Data provider unreachable at {0}")]
    Unreachable(String, #[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Malformed response from data provider: {0}")]
    MalformedResponse(String),

    #[error("Failed to parse JSON data")]
    JsonParse(#[from] serde_json::Error),
}
