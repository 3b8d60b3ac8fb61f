use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// A compressed image ready for transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub mime_type: &'static str,
}

impl EncodedImage {
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    pub fn to_data_uri(&self) -> String {
        data_uri(self.mime_type, &self.to_base64())
    }
}

/// Embeds already base64-encoded bytes in a `data:` URI.
pub fn data_uri(mime_type: &str, base64_data: &str) -> String {
    format!("data:{mime_type};base64,{base64_data}")
}
