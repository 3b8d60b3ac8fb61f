pub mod encoding;
pub mod output;
pub mod pipeline;
pub mod shared;
pub mod upload;
pub mod video;
