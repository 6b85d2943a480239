use shared::error::ApiError;
use thiserror::Error;

/// Failure of a create or edit submission. The `Display` text is what the
/// form shows to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Body is required")]
    MissingBody,
    #[error("Post has no id")]
    MissingId,
    #[error("Failed to add post")]
    AddRejected { status: u16 },
    #[error("Failed to update post")]
    UpdateRejected { status: u16 },
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Add,
    Update,
}

impl SaveError {
    pub fn from_api(kind: SaveKind, err: ApiError) -> Self {
        match (kind, err) {
            (SaveKind::Add, ApiError::Status { status }) => Self::AddRejected { status },
            (SaveKind::Update, ApiError::Status { status }) => Self::UpdateRejected { status },
            (_, ApiError::Transport(message)) => Self::Transport(message),
            (_, ApiError::Decode(message)) => Self::Malformed(message),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingTitle | Self::MissingBody | Self::MissingId
        )
    }
}
