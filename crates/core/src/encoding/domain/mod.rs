pub mod encoded_image;
pub mod frame_encoder;
