use crate::encoding::domain::encoded_image::EncodedImage;
use crate::pipeline::capture_sink::CaptureSink;
use crate::upload::domain::image_uploader::{ImageUploader, UploadError};

/// Uploads each captured frame and records the hosted URL.
///
/// Frames are named `frame_<sequence_number>`, so re-running an extraction
/// replaces earlier uploads of the same frame on hosts that honour names.
pub struct UploadSink {
    uploader: Box<dyn ImageUploader>,
}

impl UploadSink {
    pub fn new(uploader: Box<dyn ImageUploader>) -> Self {
        Self { uploader }
    }
}

pub fn frame_name(sequence_number: usize) -> String {
    format!("frame_{sequence_number}")
}

impl CaptureSink for UploadSink {
    fn describe(&self) -> String {
        format!("Uploading frames to {}", self.uploader.host())
    }

    fn deliver(
        &mut self,
        sequence_number: usize,
        image: &EncodedImage,
    ) -> Result<String, UploadError> {
        log::info!(
            "Uploading frame {sequence_number} to {}...",
            self.uploader.host()
        );
        let name = frame_name(sequence_number);
        let uploaded = self.uploader.upload(&image.to_base64(), Some(&name))?;
        log::info!("Uploaded to: {}", uploaded.url);
        Ok(uploaded.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::domain::image_uploader::UploadedImage;
    use std::sync::{Arc, Mutex};

    struct RecordingUploader {
        calls: Arc<Mutex<Vec<(String, Option<String>)>>>,
        fail: bool,
    }

    impl ImageUploader for RecordingUploader {
        fn host(&self) -> &'static str {
            "Stub"
        }

        fn upload(
            &self,
            base64_image: &str,
            name: Option<&str>,
        ) -> Result<UploadedImage, UploadError> {
            self.calls
                .lock()
                .unwrap()
                .push((base64_image.to_string(), name.map(str::to_string)));
            if self.fail {
                return Err(UploadError::Status {
                    status: 500,
                    body: "down".to_string(),
                });
            }
            Ok(UploadedImage {
                url: format!("https://img.example/{}", name.unwrap_or("anon")),
                response: serde_json::Value::Null,
            })
        }
    }

    fn image() -> EncodedImage {
        EncodedImage {
            bytes: b"hello".to_vec(),
            width: 1,
            height: 1,
            mime_type: "image/jpeg",
        }
    }

    #[test]
    fn test_frame_name() {
        assert_eq!(frame_name(300), "frame_300");
    }

    #[test]
    fn test_uploads_base64_with_frame_name() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut sink = UploadSink::new(Box::new(RecordingUploader {
            calls: calls.clone(),
            fail: false,
        }));

        let url = sink.deliver(60, &image()).unwrap();
        assert_eq!(url, "https://img.example/frame_60");

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "aGVsbG8=");
        assert_eq!(calls[0].1.as_deref(), Some("frame_60"));
    }

    #[test]
    fn test_upload_failure_propagates_as_error() {
        let mut sink = UploadSink::new(Box::new(RecordingUploader {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }));
        assert!(matches!(
            sink.deliver(1, &image()),
            Err(UploadError::Status { status: 500, .. })
        ));
    }

    #[test]
    fn test_describe_names_host() {
        let sink = UploadSink::new(Box::new(RecordingUploader {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }));
        assert_eq!(sink.describe(), "Uploading frames to Stub");
    }
}
