use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::PathBuf;

/// Sequence number handed out to each upload batch of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchId(pub u64);

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileState {
    Uploading { batch: BatchId },
    Succeeded { id: String, url: String },
    Failed,
}

/// One row of the uploader list. `identity` is the filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedFile {
    pub identity: String,
    pub state: FileState,
    pub deleting: bool,
}

impl TrackedFile {
    pub fn uploading(identity: impl Into<String>, batch: BatchId) -> Self {
        Self {
            identity: identity.into(),
            state: FileState::Uploading { batch },
            deleting: false,
        }
    }

    pub fn succeeded(
        identity: impl Into<String>,
        id: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            state: FileState::Succeeded {
                id: id.into(),
                url: url.into(),
            },
            deleting: false,
        }
    }

    pub fn failed(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            state: FileState::Failed,
            deleting: false,
        }
    }

    /// Server id once uploaded, the filename before that.
    pub fn id(&self) -> &str {
        match &self.state {
            FileState::Succeeded { id, .. } => id,
            _ => &self.identity,
        }
    }

    pub fn url(&self) -> &str {
        match &self.state {
            FileState::Succeeded { url, .. } => url,
            _ => "",
        }
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.state, FileState::Uploading { .. })
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self.state, FileState::Succeeded { .. })
    }

    pub fn belongs_to(&self, batch: BatchId) -> bool {
        matches!(self.state, FileState::Uploading { batch: b } if b == batch)
    }
}

/// A file chosen in the selection dialog. Contents are read when the batch is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub path: PathBuf,
}

impl PickedFile {
    /// `None` only for paths without a final component. Names that are not
    /// valid UTF-8 are kept with replacement characters.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = path.file_name()?.to_string_lossy().into_owned();
        Some(Self { name, path })
    }
}

/// Status field of the backend envelope; the backend sends either a number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StatusCode {
    Number(i64),
    Text(String),
}

impl StatusCode {
    pub fn matches(&self, expected: &str) -> bool {
        match self {
            Self::Number(n) => n.to_string() == expected.trim(),
            Self::Text(s) => s.trim() == expected.trim(),
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadedFile {
    #[serde(deserialize_with = "number_or_string")]
    pub id: String,
    pub name: String,
    pub url: String,
}

/// Ids come back as JSON numbers from some backends and as strings from others.
fn number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(serde_json::Number),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n.to_string(),
        Raw::Text(s) => s,
    })
}

/// `{status, message, data}` as returned by both backend calls.
///
/// `data` stays untyped so that a success status with a payload of the
/// wrong shape can be told apart from a transport failure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiResponse {
    pub status: StatusCode,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl ApiResponse {
    pub fn server_message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}
