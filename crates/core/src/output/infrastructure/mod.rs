pub mod text_file_writer;
