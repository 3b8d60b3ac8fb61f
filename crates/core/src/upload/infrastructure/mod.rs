pub mod cloudinary_uploader;
pub mod imgur_uploader;
#[cfg(test)]
pub(crate) mod test_server;
