use image::codecs::jpeg::JpegEncoder as ImageJpegEncoder;
use image::imageops::FilterType;
use image::RgbImage;

use crate::encoding::domain::encoded_image::EncodedImage;
use crate::encoding::domain::frame_encoder::{EncodeError, FrameEncoder};
use crate::shared::constants::JPEG_MIME_TYPE;
use crate::shared::frame::Frame;

/// Downscales a frame by a fixed ratio and compresses it to JPEG using the
/// `image` crate.
///
/// A ratio of exactly 1.0 skips resampling. Scaled dimensions are
/// truncated toward zero.
pub struct JpegFrameEncoder {
    resize_ratio: f64,
    quality: u8,
}

impl JpegFrameEncoder {
    /// `quality` is on a 0-100 scale; 0 is treated as the lowest quality
    /// the JPEG encoder accepts.
    pub fn new(resize_ratio: f64, quality: u8) -> Result<Self, EncodeError> {
        if !resize_ratio.is_finite() || resize_ratio <= 0.0 {
            return Err(EncodeError::InvalidSettings(format!(
                "resize ratio must be positive, got {resize_ratio}"
            )));
        }
        if quality > 100 {
            return Err(EncodeError::InvalidSettings(format!(
                "quality must be between 0 and 100, got {quality}"
            )));
        }
        Ok(Self {
            resize_ratio,
            quality,
        })
    }
}

impl FrameEncoder for JpegFrameEncoder {
    fn encode(&self, frame: &Frame) -> Result<EncodedImage, EncodeError> {
        let index = frame.index();
        if frame.channels() != 3 {
            return Err(EncodeError::InvalidFrame { index });
        }

        let img = RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or(EncodeError::InvalidFrame { index })?;

        let img = if self.resize_ratio == 1.0 {
            img
        } else {
            let (width, height) = scaled_dimensions(img.width(), img.height(), self.resize_ratio);
            if width == 0 || height == 0 {
                return Err(EncodeError::EmptyImage {
                    index,
                    width,
                    height,
                });
            }
            image::imageops::resize(&img, width, height, FilterType::Triangle)
        };

        let mut bytes = Vec::new();
        {
            let mut encoder =
                ImageJpegEncoder::new_with_quality(&mut bytes, self.quality.clamp(1, 100));
            encoder.encode_image(&img)?;
        }

        Ok(EncodedImage {
            bytes,
            width: img.width(),
            height: img.height(),
            mime_type: JPEG_MIME_TYPE,
        })
    }
}

/// Target size for a resize by `ratio`, truncated like an integer cast.
pub fn scaled_dimensions(width: u32, height: u32, ratio: f64) -> (u32, u32) {
    (
        (width as f64 * ratio) as u32,
        (height as f64 * ratio) as u32,
    )
}
