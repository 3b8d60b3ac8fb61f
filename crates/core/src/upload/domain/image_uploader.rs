use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("missing credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

/// An image accepted by a hosting service.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadedImage {
    /// Publicly reachable URL of the hosted image.
    pub url: String,
    /// Raw JSON body returned by the host.
    pub response: serde_json::Value,
}

/// Uploads base64-encoded JPEG data to an image host.
///
/// Every error returned here is scoped to a single image; configuration
/// problems that must stop the process surface when the uploader is built.
pub trait ImageUploader: Send {
    /// Human-readable host name for diagnostics.
    fn host(&self) -> &'static str;

    /// Uploads `base64_image` (no data-URI prefix). `name` identifies the
    /// image on the host where supported.
    fn upload(&self, base64_image: &str, name: Option<&str>) -> Result<UploadedImage, UploadError>;
}
