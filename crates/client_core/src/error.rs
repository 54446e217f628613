use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid service base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    /// Network failures and undecodable bodies alike.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with status {status}")]
    Status { status: u16 },
}

impl ServiceError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
