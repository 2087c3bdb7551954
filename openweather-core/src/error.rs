use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A model value outside of its allowed range.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Builder input the API would reject; raised before any network I/O.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to parse API response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    pub(crate) fn invalid_value(message: impl Into<String>) -> Self {
        Error::InvalidValue(message.into())
    }

    pub(crate) fn invalid_request(message: impl Into<String>) -> Self {
        Error::InvalidRequest(message.into())
    }
}
