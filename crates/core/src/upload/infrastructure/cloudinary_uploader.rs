use std::collections::BTreeMap;

use reqwest::blocking::Client;
use sha2::{Digest, Sha256};

use crate::encoding::domain::encoded_image::data_uri;
use crate::shared::config::CloudinaryCredentials;
use crate::shared::constants::{CLOUDINARY_API_BASE, JPEG_MIME_TYPE};
use crate::upload::domain::image_uploader::{ImageUploader, UploadError, UploadedImage};

/// Signed uploads to the Cloudinary image upload API.
///
/// Incomplete credentials do not prevent construction; each upload then
/// fails on its own without touching the network.
pub struct CloudinaryUploader {
    client: Client,
    credentials: CloudinaryCredentials,
    api_base: String,
}

impl CloudinaryUploader {
    pub fn new(credentials: CloudinaryCredentials) -> Self {
        if !credentials.is_complete() {
            log::warn!(
                "Cloudinary credentials incomplete, uploads will fail (missing {})",
                credentials.missing().join(", ")
            );
        }
        Self {
            client: Client::new(),
            credentials,
            api_base: CLOUDINARY_API_BASE.to_string(),
        }
    }

    /// Overrides the API base URL (the part before `/<cloud_name>`).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn try_upload(
        &self,
        base64_image: &str,
        public_id: Option<&str>,
        timestamp: i64,
    ) -> Result<UploadedImage, UploadError> {
        let (Some(cloud_name), Some(api_key), Some(api_secret)) = (
            self.credentials.cloud_name.as_deref(),
            self.credentials.api_key.as_deref(),
            self.credentials.api_secret.as_deref(),
        ) else {
            return Err(UploadError::MissingCredentials(self.credentials.missing()));
        };

        let mut params = upload_params(public_id, timestamp);
        let signature = sign_params(&params, api_secret);
        params.insert("file", data_uri(JPEG_MIME_TYPE, base64_image));
        params.insert("api_key", api_key.to_string());
        params.insert("signature", signature);
        params.insert("signature_algorithm", "sha256".to_string());

        let url = format!(
            "{}/{}/image/upload",
            self.api_base.trim_end_matches('/'),
            cloud_name
        );
        let response = self.client.post(url).form(&params).send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(UploadError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response: serde_json::Value = response.json()?;
        let url = response["secure_url"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| UploadError::InvalidResponse("missing secure_url".to_string()))?;
        Ok(UploadedImage { url, response })
    }
}

impl ImageUploader for CloudinaryUploader {
    fn host(&self) -> &'static str {
        "Cloudinary"
    }

    fn upload(&self, base64_image: &str, name: Option<&str>) -> Result<UploadedImage, UploadError> {
        let timestamp = chrono::Utc::now().timestamp();
        self.try_upload(base64_image, name, timestamp).map_err(|e| {
            log::error!("Error uploading to Cloudinary: {e}");
            e
        })
    }
}

/// Parameters covered by the request signature. A named upload replaces any
/// existing asset with the same public id.
fn upload_params(public_id: Option<&str>, timestamp: i64) -> BTreeMap<&'static str, String> {
    let mut params = BTreeMap::new();
    params.insert("timestamp", timestamp.to_string());
    if let Some(id) = public_id.filter(|id| !id.is_empty()) {
        params.insert("public_id", id.to_string());
        params.insert("overwrite", "true".to_string());
    }
    params
}

/// Hex SHA-256 over `k1=v1&k2=v2...` (keys sorted) with the secret appended.
pub fn sign_params(params: &BTreeMap<&str, String>, api_secret: &str) -> String {
    let to_sign = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}
