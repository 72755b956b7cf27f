use thiserror::Error;

/// Why an upload batch or a delete call did not succeed.
///
/// None of these escape the session: they end up as a `Failed` entry or a
/// reverted `deleting` flag plus a notification.
#[derive(Error, Debug)]
pub enum UploaderError {
    /// The request never produced a usable envelope (network, timeout, non-2xx).
    #[error("Network error: {0}")]
    Transport(String),

    /// The backend answered with a status other than the success code.
    #[error("Request rejected with status {status}{}", message_suffix(.message))]
    ServerRejection {
        status: String,
        message: Option<String>,
    },

    /// Success status, but the payload is not what the call promises.
    #[error("Malformed response: {detail}")]
    MalformedResponse {
        detail: String,
        message: Option<String>,
    },

    #[error("Failed to read {name}: {source}")]
    ReadFile {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

impl UploaderError {
    /// The message the backend sent along, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::ServerRejection { message, .. } | Self::MalformedResponse { message, .. } => {
                message.as_deref()
            }
            Self::Transport(_) | Self::ReadFile { .. } => None,
        }
    }
}

impl From<reqwest::Error> for UploaderError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UploaderError>;
