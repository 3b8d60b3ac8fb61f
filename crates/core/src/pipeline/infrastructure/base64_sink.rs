use crate::encoding::domain::encoded_image::EncodedImage;
use crate::pipeline::capture_sink::CaptureSink;
use crate::upload::domain::image_uploader::UploadError;

/// Keeps captured frames locally as base64 text instead of uploading them.
#[derive(Default)]
pub struct Base64Sink;

impl Base64Sink {
    pub fn new() -> Self {
        Self
    }
}

impl CaptureSink for Base64Sink {
    fn describe(&self) -> String {
        "Collecting base64 frames".to_string()
    }

    fn deliver(
        &mut self,
        sequence_number: usize,
        image: &EncodedImage,
    ) -> Result<String, UploadError> {
        log::debug!(
            "Encoded frame {sequence_number} ({}x{}, {} bytes)",
            image.width,
            image.height,
            image.bytes.len()
        );
        Ok(image.to_base64())
    }
}
