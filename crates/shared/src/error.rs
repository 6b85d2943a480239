use thiserror::Error;

/// Failure talking to the remote posts API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("server responded with status {status}")]
    Status { status: u16 },
    #[error("{0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// True when the server answered but refused the request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}
