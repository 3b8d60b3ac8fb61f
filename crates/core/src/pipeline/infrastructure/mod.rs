pub mod base64_sink;
pub mod upload_sink;
