use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;

use crate::shared::config::{ConfigError, HostingConfig};
use crate::shared::constants::IMGUR_UPLOAD_URL;
use crate::upload::domain::image_uploader::{ImageUploader, UploadError, UploadedImage};

/// Anonymous Imgur uploads authenticated with an application client id.
pub struct ImgurUploader {
    client: Client,
    client_id: String,
    endpoint: String,
}

impl ImgurUploader {
    /// Fails before any network activity when `IMGUR_CLIENT_ID` is absent.
    pub fn new(config: &HostingConfig) -> Result<Self, ConfigError> {
        let client_id = config.require_imgur_client_id()?.to_string();
        Ok(Self {
            client: Client::new(),
            client_id,
            endpoint: IMGUR_UPLOAD_URL.to_string(),
        })
    }

    /// Overrides the upload endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Posts one base64 image and returns Imgur's JSON response.
    ///
    /// Only HTTP 200 counts as success; any other status is logged together
    /// with the response body.
    pub fn upload_base64(
        &self,
        base64_image: &str,
        title: Option<&str>,
    ) -> Result<serde_json::Value, UploadError> {
        let mut form = vec![("image", base64_image), ("type", "base64")];
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            form.push(("title", title));
        }

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Client-ID {}", self.client_id))
            .form(&form)
            .send()?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().unwrap_or_default();
            log::error!("Imgur upload failed: HTTP {}", status.as_u16());
            log::error!("{body}");
            return Err(UploadError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json()?)
    }
}

impl ImageUploader for ImgurUploader {
    fn host(&self) -> &'static str {
        "Imgur"
    }

    fn upload(&self, base64_image: &str, name: Option<&str>) -> Result<UploadedImage, UploadError> {
        let response = self.upload_base64(base64_image, name)?;
        let url = image_link(&response)?;
        Ok(UploadedImage { url, response })
    }
}

/// Extracts `data.link` from a successful upload response.
pub fn image_link(response: &serde_json::Value) -> Result<String, UploadError> {
    if response["success"].as_bool() == Some(false) {
        return Err(UploadError::InvalidResponse(format!(
            "upload reported failure: {response}"
        )));
    }
    response["data"]["link"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| UploadError::InvalidResponse("missing data.link".to_string()))
}
