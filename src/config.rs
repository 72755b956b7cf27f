use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Business category the uploaded attachments are filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UploadType {
    #[default]
    SignUp,
    NoticeAq,
    DocAq,
    Bid,
}

impl UploadType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SignUp => "SIGN_UP",
            Self::NoticeAq => "NOTICE_AQ",
            Self::DocAq => "DOC_AQ",
            Self::Bid => "BID",
        }
    }
}

impl std::str::FromStr for UploadType {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "SIGN_UP" => Ok(Self::SignUp),
            "NOTICE_AQ" => Ok(Self::NoticeAq),
            "DOC_AQ" => Ok(Self::DocAq),
            "BID" => Ok(Self::Bid),
            _ => anyhow::bail!(
                "Invalid upload type: '{}'. Use SIGN_UP, NOTICE_AQ, DOC_AQ or BID.",
                s
            ),
        }
    }
}

impl std::fmt::Display for UploadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploaderConfig {
    pub base_url: String,
    pub owner_id: String,
    pub upload_type: UploadType,

    pub access_key_header: String,
    pub access_key: String,
    pub token_header: String,
    pub token: String,

    /// Envelope status that means success, compared by its string form.
    pub success_code: String,
    pub timeout_ms: u64,
    pub locale: String,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            owner_id: String::new(),
            upload_type: UploadType::default(),
            access_key_header: "Glodon-M2-AK".to_string(),
            access_key: String::new(),
            token_header: "Glodon-M2-Token".to_string(),
            token: String::new(),
            success_code: "200".to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            locale: "en".to_string(),
        }
    }
}

impl UploaderConfig {
    /// Reads the config file, falling back to defaults when it is missing or broken.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(data) => match serde_json::from_str::<UploaderConfig>(&data) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => tracing::warn!("Config parse error in {:?}: {}", path, e),
                },
                Err(e) => tracing::warn!("Config read error for {:?}: {}", path, e),
            }
        } else {
            tracing::info!("No config at {:?}, using defaults", path);
        }
        Self::default()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, &data)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_type_parses_case_insensitively() {
        assert_eq!("doc_aq".parse::<UploadType>().unwrap(), UploadType::DocAq);
        assert_eq!(" BID ".parse::<UploadType>().unwrap(), UploadType::Bid);
        assert!("INVOICE".parse::<UploadType>().is_err());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config: UploaderConfig =
            serde_json::from_str(r#"{"owner_id": "p-17", "upload_type": "NOTICE_AQ"}"#).unwrap();
        assert_eq!(config.owner_id, "p-17");
        assert_eq!(config.upload_type, UploadType::NoticeAq);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.success_code, "200");
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("uploader.json");

        let config = UploaderConfig {
            owner_id: "tender-9".into(),
            upload_type: UploadType::Bid,
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(UploaderConfig::load(&path), config);
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uploader.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(UploaderConfig::load(&path), UploaderConfig::default());
    }
}
