pub mod video_reader;
