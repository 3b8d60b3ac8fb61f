use thiserror::Error;

use crate::encoding::domain::encoded_image::EncodedImage;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("invalid encoder settings: {0}")]
    InvalidSettings(String),
    #[error("frame {index} has inconsistent pixel data")]
    InvalidFrame { index: usize },
    #[error("frame {index} scales to an empty {width}x{height} image")]
    EmptyImage { index: usize, width: u32, height: u32 },
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Turns a decoded frame into a compressed image buffer.
pub trait FrameEncoder: Send {
    fn encode(&self, frame: &Frame) -> Result<EncodedImage, EncodeError>;
}
