use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the API client. Backend rejections keep the `message`
/// field from the response body so forms can display it verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("{message}")]
    Api { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status(),
            ApiError::BaseUrl(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}
