use thiserror::Error;

/// Why an upload did not deliver the archive.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Nothing to upload; no request was made
    #[error("refusing to upload an empty payload")]
    EmptyPayload,

    /// The caller cancelled the upload
    #[error("upload cancelled")]
    Cancelled,

    /// The request never produced a response (connect, TLS, timeout, ...)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("upload rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The upload arguments could not be encoded
    #[error("failed to encode upload arguments: {0}")]
    Encode(#[from] serde_json::Error),
}

impl UploadError {
    /// HTTP status of the failed call, when there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            UploadError::Rejected { status, .. } => Some(*status),
            UploadError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, UploadError::Transport(e) if e.is_timeout())
    }
}
