pub const DEFAULT_VIDEO_FILENAME: &str = "class-clip.mp4";

/// Seconds between two captured frames.
pub const DEFAULT_INTERVAL_SECS: f64 = 30.0;
pub const DEFAULT_RESIZE_RATIO: f64 = 0.5;
/// JPEG quality on a 0-100 scale.
pub const DEFAULT_JPEG_QUALITY: u8 = 50;

pub const CLOUDINARY_URLS_FILENAME: &str = "cloudinary_frame_urls.txt";
pub const IMGUR_URLS_FILENAME: &str = "imgur_frame_urls.txt";
pub const BASE64_FRAMES_FILENAME: &str = "frame_base64.txt";

pub const DEFAULT_UPLOAD_IMAGE: &str = "image.jpg";
pub const DEFAULT_UPLOAD_TITLE: &str = "My Uploaded Image";

pub const CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com/v1_1";
pub const IMGUR_UPLOAD_URL: &str = "https://api.imgur.com/3/image";

pub const JPEG_MIME_TYPE: &str = "image/jpeg";

pub const ENV_FILENAME: &str = ".env";
pub const CLOUDINARY_CLOUD_NAME_VAR: &str = "CLOUDINARY_CLOUD_NAME";
pub const CLOUDINARY_API_KEY_VAR: &str = "CLOUDINARY_API_KEY";
pub const CLOUDINARY_API_SECRET_VAR: &str = "CLOUDINARY_API_SECRET";
pub const IMGUR_CLIENT_ID_VAR: &str = "IMGUR_CLIENT_ID";
