pub mod capture_sink;
pub mod extract_frames_use_case;
pub mod frame_sampler;
pub mod infrastructure;
pub mod pipeline_logger;
