use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::multipart;
use url::Url;

use crate::{BatchResponse, PandocStatus, ServiceError, UploadEntry, UploadRejection};

/// Connection settings for the conversion service.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// No overall timeout by default; conversion takes as long as the
    /// server needs.
    pub request_timeout: Option<Duration>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

/// Fallback when a rejection body carries no usable message.
pub const GENERIC_UPLOAD_ERROR: &str = "Upload failed";

/// Display message for a rejected upload: the explicit `error` field, else
/// the first per-file validation message, else a generic fallback. Empty
/// strings fall through.
pub fn extract_error_message(body: &str) -> String {
    let rejection: UploadRejection = serde_json::from_str(body).unwrap_or_default();
    if let Some(error) = rejection.error.filter(|message| !message.is_empty()) {
        return error;
    }
    if let Some(first) = rejection
        .files
        .and_then(|messages| messages.into_iter().next())
        .filter(|message| !message.is_empty())
    {
        return first;
    }
    GENERIC_UPLOAD_ERROR.to_string()
}

#[async_trait::async_trait]
pub trait ConvertService: Send + Sync {
    async fn check_pandoc(&self) -> Result<PandocStatus, ServiceError>;
    async fn upload(&self, entries: &[UploadEntry]) -> Result<BatchResponse, ServiceError>;
    async fn download_bundle(
        &self,
        batch_id: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, ServiceError>;
    async fn download_file(
        &self,
        link: &str,
        filename: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct HttpConvertService {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl HttpConvertService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ServiceError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        let base = Url::parse(&self.settings.base_url)
            .map_err(|err| ServiceError::InvalidUrl(err.to_string()))?;
        base.join(path)
            .map_err(|err| ServiceError::InvalidUrl(err.to_string()))
    }

    /// Result-row links may be absolute or relative to the service origin.
    fn resolve(&self, link: &str) -> Result<Url, ServiceError> {
        match Url::parse(link) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => self.endpoint(link),
            Err(err) => Err(ServiceError::InvalidUrl(err.to_string())),
        }
    }

    async fn fetch_to_file(&self, url: Url, target: PathBuf) -> Result<PathBuf, ServiceError> {
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Rejected(status.to_string()));
        }
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        tokio::fs::write(&target, &bytes)
            .await
            .map_err(|err| ServiceError::Io(err.to_string()))?;
        Ok(target)
    }
}

#[async_trait::async_trait]
impl ConvertService for HttpConvertService {
    async fn check_pandoc(&self) -> Result<PandocStatus, ServiceError> {
        let url = self.endpoint("/api/check-pandoc/")?;
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Rejected(status.to_string()));
        }
        response
            .json::<PandocStatus>()
            .await
            .map_err(|err| ServiceError::Payload(err.to_string()))
    }

    async fn upload(&self, entries: &[UploadEntry]) -> Result<BatchResponse, ServiceError> {
        let url = self.endpoint("/api/upload/")?;

        // One multipart body, the `files` field repeated per selected file.
        let mut form = multipart::Form::new();
        for entry in entries {
            let bytes =
                tokio::fs::read(&entry.path)
                    .await
                    .map_err(|err| ServiceError::FileRead {
                        filename: entry.filename.clone(),
                        message: err.to_string(),
                    })?;
            let part = multipart::Part::bytes(bytes).file_name(entry.filename.clone());
            form = form.part("files", part);
        }

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Rejected(extract_error_message(&body)));
        }
        response
            .json::<BatchResponse>()
            .await
            .map_err(|err| ServiceError::Payload(err.to_string()))
    }

    async fn download_bundle(
        &self,
        batch_id: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, ServiceError> {
        let url = self.endpoint(&format!("/api/batch/{batch_id}/download/"))?;
        // Matches the filename the server advertises in Content-Disposition.
        let target = dest_dir.join(format!("converted_files_{batch_id}.zip"));
        self.fetch_to_file(url, target).await
    }

    async fn download_file(
        &self,
        link: &str,
        filename: &str,
        dest_dir: &Path,
    ) -> Result<PathBuf, ServiceError> {
        let url = self.resolve(link)?;
        self.fetch_to_file(url, dest_dir.join(filename)).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::Network(format!("timeout: {err}"));
    }
    ServiceError::Network(err.to_string())
}
