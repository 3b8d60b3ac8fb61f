use crate::encoding::domain::encoded_image::EncodedImage;
use crate::upload::domain::image_uploader::UploadError;

/// Terminal stage of frame extraction: turns an encoded frame into the
/// line recorded in the results file.
pub trait CaptureSink: Send {
    /// Short description used in progress messages.
    fn describe(&self) -> String;

    /// Delivers one captured frame. An error skips this frame only.
    fn deliver(
        &mut self,
        sequence_number: usize,
        image: &EncodedImage,
    ) -> Result<String, UploadError>;
}
