//! HTTP plumbing shared by all endpoint groups.

use std::path::Path;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};

/// A file to send as the `file` part of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name reported to the server. The backend checks the extension.
    pub file_name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Wraps in-memory contents.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Reads a local file, keeping its file name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).map_err(|e| ApiError::Io(format!("{}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| ApiError::Io(format!("{} is not a file", path.display())))?;
        Ok(Self { file_name, bytes })
    }

    fn mime_type(&self) -> &'static str {
        let lower = self.file_name.to_ascii_lowercase();
        if lower.ends_with(".xlsx") {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        } else if lower.ends_with(".xls") {
            "application/vnd.ms-excel"
        } else if lower.ends_with(".csv") {
            "text/csv"
        } else {
            "application/octet-stream"
        }
    }
}

/// Typed client for the backend API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.parsed_base_url()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| ApiError::InvalidConfig(format!("user_agent: {e}")))?;
        headers.insert(USER_AGENT, user_agent);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// The API root every endpoint is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds an endpoint URL, percent-encoding each segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::InvalidConfig(format!("base_url {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET` a JSON resource.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        decode_json(check_status(response, &url).await?, &url).await
    }

    /// Send a request with an optional JSON body and decode a JSON response.
    pub(crate) async fn send_json<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("{} {}", method, url);
        let mut request = self.client.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        decode_json(check_status(response, &url).await?, &url).await
    }

    /// `GET` a binary resource.
    pub(crate) async fn get_bytes(&self, url: Url) -> Result<Vec<u8>> {
        tracing::debug!("GET {} (binary)", url);
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "*/*")
            .send()
            .await?;
        let bytes = check_status(response, &url).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// `POST` a multipart upload with a single `file` part.
    pub(crate) async fn upload<T: DeserializeOwned>(&self, url: Url, file: UploadFile) -> Result<T> {
        tracing::debug!("POST {} (upload {}, {} bytes)", url, file.file_name, file.bytes.len());
        let mime = file.mime_type();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(mime)?;
        let form = Form::new().part("file", part);
        let response = self.client.post(url.clone()).multipart(form).send().await?;
        decode_json(check_status(response, &url).await?, &url).await
    }
}

/// Maps non-success statuses to typed errors.
async fn check_status(response: reqwest::Response, url: &Url) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = error_detail(&body);
    tracing::debug!("{} answered {}: {}", url, status, detail);

    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(if detail.is_empty() {
            url.path().to_string()
        } else {
            detail
        }));
    }

    Err(ApiError::Status {
        status: status.as_u16(),
        detail,
    })
}

/// Extracts the `detail` field of an error body, falling back to the raw text.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => body.trim().to_string(),
        },
        _ => body.trim().to_string(),
    }
}

/// Decodes a JSON body. An empty body is read as an empty object so plain
/// acknowledgements without content still succeed.
async fn decode_json<T: DeserializeOwned>(response: reqwest::Response, url: &Url) -> Result<T> {
    let text = response.text().await?;
    let parsed = if text.trim().is_empty() {
        serde_json::from_value(serde_json::Value::Object(serde_json::Map::new()))
    } else {
        serde_json::from_str(&text)
    };
    parsed.map_err(|e| ApiError::Decode(format!("{}: {e}", url.path())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new(&ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = ApiClient::new(&ClientConfig::default()).unwrap();
        let url = client.endpoint(&["diseases", "NANDO:1 2/3"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/v1/diseases/NANDO:1%202%2F3"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash_base() {
        let config = ClientConfig::default().with_base_url("http://localhost:8000/api/v1/");
        let client = ApiClient::new(&config).unwrap();
        let url = client.endpoint(&["diseases"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/diseases");
    }

    #[test]
    fn test_error_detail() {
        assert_eq!(error_detail(r#"{"detail": "Disease not found"}"#), "Disease not found");
        assert_eq!(
            error_detail(r#"{"detail": [{"msg": "field required"}]}"#),
            r#"[{"msg":"field required"}]"#
        );
        assert_eq!(error_detail("Internal Server Error\n"), "Internal Server Error");
    }

    #[test]
    fn test_upload_mime_type() {
        assert_eq!(
            UploadFile::new("nando.XLSX", Vec::new()).mime_type(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(UploadFile::new("old.xls", Vec::new()).mime_type(), "application/vnd.ms-excel");
        assert_eq!(UploadFile::new("blob", Vec::new()).mime_type(), "application/octet-stream");
    }

    #[test]
    fn test_upload_file_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.xlsx");
        std::fs::write(&path, b"PK\x03\x04").unwrap();

        let file = UploadFile::from_path(&path).unwrap();
        assert_eq!(file.file_name, "settings.xlsx");
        assert_eq!(file.bytes, b"PK\x03\x04");
    }
}
