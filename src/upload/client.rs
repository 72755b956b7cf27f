use super::session::UploadRequest;
use super::types::ApiResponse;
use crate::config::UploaderConfig;
use crate::error::{Result, UploaderError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

const FILES_PATH: [&str; 2] = ["supplier", "files"];

/// HTTP side of the uploader: one multipart batch upload, one delete by id.
#[derive(Debug, Clone)]
pub struct UploaderClient {
    client: reqwest::Client,
    base_url: Url,
}

impl UploaderClient {
    pub fn new(config: &UploaderConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Base URL cannot carry a path: {}", config.base_url);
        }

        let mut headers = HeaderMap::new();
        for (name, value) in [
            (&config.access_key_header, &config.access_key),
            (&config.token_header, &config.token),
        ] {
            headers.insert(
                HeaderName::from_bytes(name.as_bytes())?,
                HeaderValue::from_str(value)?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, tail: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(FILES_PATH);
            if let Some(tail) = tail {
                segments.push(tail);
            }
        }
        url
    }

    pub async fn upload_files(&self, request: &UploadRequest) -> Result<ApiResponse> {
        let mut form = Form::new()
            .text("ownerId", request.owner_id.clone())
            .text("uploadType", request.upload_type.as_str());

        for file in &request.files {
            let bytes = tokio::fs::read(&file.path)
                .await
                .map_err(|source| UploaderError::ReadFile {
                    name: file.name.clone(),
                    source,
                })?;
            let part = Part::bytes(bytes)
                .file_name(file.name.clone())
                .mime_str("application/octet-stream")?;
            form = form.part("files", part);
        }

        let url = self.endpoint(None);
        debug!(
            "POST {} with {} file(s) for batch {}",
            url,
            request.files.len(),
            request.batch
        );
        let resp = self.client.post(url).multipart(form).send().await?;
        Self::envelope(resp).await
    }

    pub async fn delete_file(&self, id: &str) -> Result<ApiResponse> {
        let url = self.endpoint(Some(id));
        debug!("DELETE {}", url);
        let resp = self.client.delete(url).send().await?;
        Self::envelope(resp).await
    }

    async fn envelope(resp: reqwest::Response) -> Result<ApiResponse> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(UploaderError::Transport(format!("({}): {}", status, body)));
        }
        resp.json()
            .await
            .map_err(|e| UploaderError::Transport(format!("Unreadable response body: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> UploaderClient {
        UploaderClient::new(&UploaderConfig {
            base_url: base_url.into(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoints_under_base_path() {
        let c = client("https://bids.example.com/api/");
        assert_eq!(
            c.endpoint(None).as_str(),
            "https://bids.example.com/api/supplier/files"
        );
        assert_eq!(
            c.endpoint(Some("7f3")).as_str(),
            "https://bids.example.com/api/supplier/files/7f3"
        );
    }

    #[test]
    fn delete_id_is_escaped() {
        let c = client("http://localhost:8080");
        assert_eq!(
            c.endpoint(Some("a b/c")).as_str(),
            "http://localhost:8080/supplier/files/a%20b%2Fc"
        );
    }

    #[test]
    fn rejects_unusable_config() {
        let bad_url = UploaderConfig {
            base_url: "mailto:someone@example.com".into(),
            ..Default::default()
        };
        assert!(UploaderClient::new(&bad_url).is_err());

        let bad_header = UploaderConfig {
            token_header: "bad header".into(),
            ..Default::default()
        };
        assert!(UploaderClient::new(&bad_header).is_err());
    }
}
