use thiserror::Error;

/// Failure of a single chat-completion round trip.
///
/// Carries the raw status code and response body whenever the server answered,
/// so the view can show the diagnostic text verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("API Error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response ({status}): {reason}")]
    MalformedResponse {
        status: u16,
        body: String,
        reason: String,
    },

    #[error("Response ({status}) has no choices: {body}")]
    MissingChoices { status: u16, body: String },
}

impl CompletionError {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// HTTP status returned by the server, if a response was received at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. }
            | Self::MalformedResponse { status, .. }
            | Self::MissingChoices { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }

    /// Raw response body, or the transport error text when nothing came back.
    pub fn body(&self) -> &str {
        match self {
            Self::Status { body, .. }
            | Self::MalformedResponse { body, .. }
            | Self::MissingChoices { body, .. } => body,
            Self::Transport(msg) => msg,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    MissingCredential(String),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DomainError {
    pub fn missing_credential(msg: impl Into<String>) -> Self {
        Self::MissingCredential(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingCredential(_))
    }

    pub fn is_completion_error(&self) -> bool {
        matches!(self, Self::Completion(_))
    }
}
