use thiserror::Error;

/// Everything that can go wrong between an operator action and an accepted command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The server answered, but not with the success sentinel. The body is the message.
    #[error("{0}")]
    Rejected(String),
    #[error("server error: {status} ({description}).")]
    Transport { status: String, description: String },
    #[error("error: no alert selected.")]
    NoSelection,
    #[error("unknown form: {0}")]
    UnknownForm(String),
    #[error("unknown disable policy: {0}")]
    UnknownPolicy(String),
}

impl RequestError {
    pub fn transport(status: impl Into<String>, description: impl Into<String>) -> Self {
        Self::Transport {
            status: status.into(),
            description: description.into(),
        }
    }
}
