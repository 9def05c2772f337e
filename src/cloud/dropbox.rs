use std::future::Future;
use std::time::Instant;

use anyhow::Result;
use bytes::Bytes;
use log::{debug, info, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::cloud::client::create_http_client;
use crate::cloud::error::UploadError;
use crate::config::ApiConfig;
use crate::constants::{API_ARG_HEADER, UPLOAD_MODE_ADD};
use crate::models::RemoteTarget;
use crate::security::credential_scrubber::scrub_secret;
use crate::utils::hash::sha256_hex;

/// Outcome of the ensure-folder phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderStatus {
    Created,
    /// HTTP 409: the folder was already there
    AlreadyExists,
    /// Any other failure; the upload still proceeds
    Failed { status: Option<u16>, message: String },
}

/// Result of a delivered archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub folder: FolderStatus,
    /// Path we asked for
    pub requested_path: String,
    /// Path the service stored the file under; differs after an autorename
    pub stored_path: String,
    pub size: usize,
    pub sha256: String,
}

#[derive(Serialize)]
struct CreateFolderArg<'a> {
    path: &'a str,
    autorename: bool,
}

#[derive(Serialize)]
struct UploadArg<'a> {
    path: &'a str,
    mode: &'a str,
    autorename: bool,
    mute: bool,
}

#[derive(Deserialize)]
struct UploadResponse {
    path_display: Option<String>,
}

/// Client for the two storage API calls of a submission.
///
/// Each call to [`UploadClient::upload`] runs ensure-folder, then
/// upload-file, once each. Nothing is retried.
pub struct UploadClient {
    http: Client,
    api: ApiConfig,
}

impl UploadClient {
    /// Create a client with its own HTTP connection pool
    pub fn new(api: ApiConfig) -> Result<Self> {
        let http = create_http_client(&api)?;
        Ok(Self::with_client(http, api))
    }

    /// Create a client that reuses an existing `reqwest::Client`
    pub fn with_client(http: Client, api: ApiConfig) -> Self {
        Self { http, api }
    }

    /// Upload `payload` to `target.file`, creating `target.folder` first.
    ///
    /// An empty payload or an already cancelled token returns before any
    /// request is made. A failed ensure-folder is logged and the upload is
    /// attempted anyway.
    pub async fn upload(
        &self,
        token: &str,
        target: &RemoteTarget,
        payload: Bytes,
        cancel: &CancellationToken,
    ) -> Result<UploadReceipt, UploadError> {
        if payload.is_empty() {
            warn!("No archive content to upload, skipping {}", target.file);
            return Err(UploadError::EmptyPayload);
        }

        if cancel.is_cancelled() {
            info!("Upload of {} cancelled before start", target.file);
            return Err(UploadError::Cancelled);
        }

        let folder = self.ensure_folder(token, &target.folder, cancel).await?;
        self.upload_file(token, &target.file, payload, folder, cancel).await
    }

    /// Create `folder` with autorename disabled.
    ///
    /// Only cancellation is an error here; every other failure is folded
    /// into [`FolderStatus::Failed`].
    pub async fn ensure_folder(
        &self,
        token: &str,
        folder: &str,
        cancel: &CancellationToken,
    ) -> Result<FolderStatus, UploadError> {
        let request = self.http
            .post(&self.api.create_folder_endpoint)
            .bearer_auth(token)
            .json(&CreateFolderArg { path: folder, autorename: false });

        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Ok::<_, UploadError>((status, body))
        };

        let status = match cancellable(cancel, exchange).await {
            Ok((status, _)) if status.is_success() => {
                info!("Created remote folder {}", folder);
                FolderStatus::Created
            }
            Ok((status, _)) if status == StatusCode::CONFLICT => {
                debug!("Remote folder {} already exists", folder);
                FolderStatus::AlreadyExists
            }
            Ok((status, body)) => {
                let message = scrub_secret(&body, token);
                warn!("Failed to create remote folder {} (HTTP {}): {}",
                      folder, status.as_u16(), message);
                FolderStatus::Failed { status: Some(status.as_u16()), message }
            }
            Err(UploadError::Cancelled) => return Err(UploadError::Cancelled),
            Err(e) => {
                let message = scrub_secret(&e.to_string(), token);
                warn!("Failed to create remote folder {}: {}", folder, message);
                FolderStatus::Failed { status: e.status(), message }
            }
        };

        Ok(status)
    }

    async fn upload_file(
        &self,
        token: &str,
        file: &str,
        payload: Bytes,
        folder: FolderStatus,
        cancel: &CancellationToken,
    ) -> Result<UploadReceipt, UploadError> {
        let arg = serde_json::to_string(&UploadArg {
            path: file,
            mode: UPLOAD_MODE_ADD,
            autorename: true,
            mute: false,
        })?;

        let size = payload.len();
        let sha256 = sha256_hex(&payload);
        info!("Uploading {} ({} bytes, sha256 {})", file, size, sha256);

        let request = self.http
            .post(&self.api.upload_endpoint)
            .bearer_auth(token)
            .header(API_ARG_HEADER, header_safe_json(&arg))
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(payload);

        let start = Instant::now();
        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, UploadError>((status, body))
        };

        let (status, body) = match cancellable(cancel, exchange).await {
            Ok(exchange) => exchange,
            Err(e) => {
                warn!("Upload of {} failed: {}", file, scrub_secret(&e.to_string(), token));
                return Err(e);
            }
        };

        if !status.is_success() {
            let body = scrub_secret(&body, token);
            warn!("Upload of {} rejected (HTTP {}): {}", file, status.as_u16(), body);
            return Err(UploadError::Rejected { status: status.as_u16(), body });
        }

        let stored_path = serde_json::from_str::<UploadResponse>(&body)
            .ok()
            .and_then(|r| r.path_display)
            .unwrap_or_else(|| file.to_string());

        info!("Uploaded {} as {} in {:?}", file, stored_path, start.elapsed());

        Ok(UploadReceipt {
            folder,
            requested_path: file.to_string(),
            stored_path,
            size,
            sha256,
        })
    }
}

/// Race `future` against `cancel`; cancellation wins ties
async fn cancellable<T, F>(cancel: &CancellationToken, future: F) -> Result<T, UploadError>
where
    F: Future<Output = Result<T, UploadError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(UploadError::Cancelled),
        result = future => result,
    }
}

/// Escape every non-ASCII character (and DEL) as `\uXXXX` so JSON can be
/// carried in an HTTP header.
///
/// Only valid for JSON text, where such characters can appear only inside
/// string literals.
pub fn header_safe_json(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    let mut units = [0u16; 2];

    for c in json.chars() {
        if c.is_ascii() && c != '\u{7f}' {
            escaped.push(c);
        } else {
            for unit in c.encode_utf16(&mut units) {
                escaped.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }

    escaped
}
