pub mod ffmpeg_reader;
#[cfg(test)]
pub(crate) mod test_video;
