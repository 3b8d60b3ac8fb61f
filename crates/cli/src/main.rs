use std::path::{Path, PathBuf};
use std::process;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::{Args, Parser, Subcommand};

use framecast_core::encoding::infrastructure::jpeg_encoder::JpegFrameEncoder;
use framecast_core::output::domain::results_writer::ResultsWriter;
use framecast_core::output::infrastructure::text_file_writer::TextFileWriter;
use framecast_core::pipeline::capture_sink::CaptureSink;
use framecast_core::pipeline::extract_frames_use_case::{ExtractError, ExtractFramesUseCase};
use framecast_core::pipeline::infrastructure::base64_sink::Base64Sink;
use framecast_core::pipeline::infrastructure::upload_sink::UploadSink;
use framecast_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use framecast_core::shared::config::{load_env_file, HostingConfig};
use framecast_core::shared::constants::{
    BASE64_FRAMES_FILENAME, CLOUDINARY_URLS_FILENAME, DEFAULT_INTERVAL_SECS, DEFAULT_JPEG_QUALITY,
    DEFAULT_RESIZE_RATIO, DEFAULT_UPLOAD_IMAGE, DEFAULT_UPLOAD_TITLE, DEFAULT_VIDEO_FILENAME,
    ENV_FILENAME, IMGUR_URLS_FILENAME,
};
use framecast_core::upload::domain::image_uploader::ImageUploader;
use framecast_core::upload::infrastructure::cloudinary_uploader::CloudinaryUploader;
use framecast_core::upload::infrastructure::imgur_uploader::{image_link, ImgurUploader};
use framecast_core::video::infrastructure::ffmpeg_reader::FfmpegReader;

const MODES: [&str; 3] = ["cloudinary", "imgur", "base64"];
const HOSTS: [&str; 2] = ["imgur", "cloudinary"];

/// Samples frames from a video and ships them to an image host.
#[derive(Parser)]
#[command(name = "framecast")]
struct Cli {
    /// Environment file holding hosting credentials.
    #[arg(long, global = true, default_value = ENV_FILENAME)]
    env_file: PathBuf,

    /// Verbose logging (overridden by RUST_LOG).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Capture one frame per interval, compress it, and upload or collect it.
    Extract(ExtractArgs),
    /// Upload a single image file.
    Upload(UploadArgs),
}

#[derive(Args)]
struct ExtractArgs {
    /// Input video file.
    #[arg(default_value = DEFAULT_VIDEO_FILENAME)]
    input: PathBuf,

    /// Results file (defaults to a mode-specific name next to the input).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Seconds between captured frames.
    #[arg(long, default_value_t = DEFAULT_INTERVAL_SECS)]
    interval: f64,

    /// Scale factor applied before compression (1.0 = full size).
    #[arg(long, default_value_t = DEFAULT_RESIZE_RATIO)]
    resize_ratio: f64,

    /// JPEG quality (0-100).
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY)]
    quality: u8,

    /// Where captured frames go: cloudinary, imgur or base64.
    #[arg(long, default_value = "cloudinary")]
    mode: String,
}

#[derive(Args)]
struct UploadArgs {
    /// Image file to upload.
    #[arg(default_value = DEFAULT_UPLOAD_IMAGE)]
    image: PathBuf,

    /// Title (Imgur) or public id (Cloudinary) for the upload.
    #[arg(long, default_value = DEFAULT_UPLOAD_TITLE)]
    title: String,

    /// Image host: imgur or cloudinary.
    #[arg(long, default_value = "imgur")]
    host: String,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if load_env_file(&cli.env_file)? {
        log::debug!("Loaded environment from {}", cli.env_file.display());
    }
    let config = HostingConfig::from_env();

    match cli.command {
        Command::Extract(args) => run_extract(&args, &config),
        Command::Upload(args) => run_upload(&args, &config),
    }
}

fn run_extract(args: &ExtractArgs, config: &HostingConfig) -> Result<(), Box<dyn std::error::Error>> {
    validate_extract(args)?;

    let sink = build_sink(&args.mode, config)?;
    let encoder = JpegFrameEncoder::new(args.resize_ratio, args.quality)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, &args.mode));

    log::info!("Starting extraction from: {}", args.input.display());
    let mut use_case = ExtractFramesUseCase::new(
        Box::new(FfmpegReader::new()),
        Box::new(encoder),
        sink,
        Box::new(StdoutPipelineLogger::default()),
        args.interval,
    );
    // An unreadable video yields no results; the use case has already logged why.
    let results = match use_case.execute(&args.input) {
        Ok(report) => report.into_captured(),
        Err(ExtractError::VideoNotFound(_) | ExtractError::OpenFailed { .. }) => Vec::new(),
    };

    if TextFileWriter::new().write(&output, &results)? {
        log::info!("Saved {} results to: {}", results.len(), output.display());
    } else {
        log::warn!("No frames captured; nothing written.");
    }
    Ok(())
}

fn run_upload(args: &UploadArgs, config: &HostingConfig) -> Result<(), Box<dyn std::error::Error>> {
    validate_upload(args)?;

    let bytes = std::fs::read(&args.image)
        .map_err(|e| format!("Cannot read image {}: {e}", args.image.display()))?;
    let encoded = STANDARD.encode(bytes);

    let url = if args.host == "imgur" {
        let uploader = ImgurUploader::new(config)?;
        let response = uploader.upload_base64(&encoded, Some(&args.title))?;
        image_link(&response)?
    } else {
        let uploader = CloudinaryUploader::new(config.cloudinary.clone());
        uploader.upload(&encoded, Some(&args.title))?.url
    };

    println!("Image uploaded successfully!");
    println!("Image URL: {url}");
    Ok(())
}

/// Builds the terminal stage for `mode`. Imgur without a client id fails
/// here, before any frame is decoded.
fn build_sink(
    mode: &str,
    config: &HostingConfig,
) -> Result<Box<dyn CaptureSink>, Box<dyn std::error::Error>> {
    let sink: Box<dyn CaptureSink> = match mode {
        "imgur" => Box::new(UploadSink::new(Box::new(ImgurUploader::new(config)?))),
        "base64" => Box::new(Base64Sink::new()),
        _ => Box::new(UploadSink::new(Box::new(CloudinaryUploader::new(
            config.cloudinary.clone(),
        )))),
    };
    Ok(sink)
}

fn default_output_path(input: &Path, mode: &str) -> PathBuf {
    let filename = match mode {
        "imgur" => IMGUR_URLS_FILENAME,
        "base64" => BASE64_FRAMES_FILENAME,
        _ => CLOUDINARY_URLS_FILENAME,
    };
    input
        .parent()
        .map(|dir| dir.join(filename))
        .unwrap_or_else(|| PathBuf::from(filename))
}

fn validate_extract(args: &ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.interval.is_finite() || args.interval <= 0.0 {
        return Err(format!("Interval must be a positive number of seconds, got {}", args.interval).into());
    }
    if !args.resize_ratio.is_finite() || args.resize_ratio <= 0.0 {
        return Err(format!("Resize ratio must be positive, got {}", args.resize_ratio).into());
    }
    if args.quality > 100 {
        return Err(format!("Quality must be between 0 and 100, got {}", args.quality).into());
    }
    if !MODES.contains(&args.mode.as_str()) {
        return Err(format!(
            "Mode must be one of: cloudinary, imgur, base64, got '{}'",
            args.mode
        )
        .into());
    }
    Ok(())
}

fn validate_upload(args: &UploadArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.image.exists() {
        return Err(format!("Image file not found: {}", args.image.display()).into());
    }
    if !HOSTS.contains(&args.host.as_str()) {
        return Err(format!("Host must be 'imgur' or 'cloudinary', got '{}'", args.host).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("framecast").chain(args.iter().copied())).unwrap()
    }

    fn extract_args(args: &[&str]) -> ExtractArgs {
        let mut full = vec!["extract"];
        full.extend_from_slice(args);
        match parse(&full).command {
            Command::Extract(a) => a,
            Command::Upload(_) => panic!("expected extract"),
        }
    }

    #[test]
    fn test_extract_defaults() {
        let args = extract_args(&[]);
        assert_eq!(args.input, PathBuf::from("class-clip.mp4"));
        assert_eq!(args.interval, 30.0);
        assert_eq!(args.resize_ratio, 0.5);
        assert_eq!(args.quality, 50);
        assert_eq!(args.mode, "cloudinary");
        assert!(args.output.is_none());
        assert!(validate_extract(&args).is_ok());
    }

    #[test]
    fn test_global_flags() {
        let cli = parse(&["--debug", "--env-file", "creds.env", "extract"]);
        assert!(cli.debug);
        assert_eq!(cli.env_file, PathBuf::from("creds.env"));
    }

    #[test]
    fn test_upload_defaults() {
        match parse(&["upload"]).command {
            Command::Upload(args) => {
                assert_eq!(args.image, PathBuf::from("image.jpg"));
                assert_eq!(args.title, "My Uploaded Image");
                assert_eq!(args.host, "imgur");
            }
            Command::Extract(_) => panic!("expected upload"),
        }
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(validate_extract(&extract_args(&["--interval", "0"])).is_err());
        assert!(validate_extract(&extract_args(&["--resize-ratio=-1"])).is_err());
        assert!(validate_extract(&extract_args(&["--quality", "101"])).is_err());
        assert!(validate_extract(&extract_args(&["--mode", "ftp"])).is_err());
    }

    #[test]
    fn test_validate_upload_missing_image() {
        let args = UploadArgs {
            image: PathBuf::from("/nonexistent/image.jpg"),
            title: DEFAULT_UPLOAD_TITLE.to_string(),
            host: "imgur".to_string(),
        };
        assert!(validate_upload(&args).is_err());
    }

    #[test]
    fn test_default_output_next_to_input() {
        assert_eq!(
            default_output_path(Path::new("/videos/class-clip.mp4"), "cloudinary"),
            PathBuf::from("/videos/cloudinary_frame_urls.txt")
        );
        assert_eq!(
            default_output_path(Path::new("/videos/class-clip.mp4"), "base64"),
            PathBuf::from("/videos/frame_base64.txt")
        );
        assert_eq!(
            default_output_path(Path::new("clip.mp4"), "imgur"),
            PathBuf::from("imgur_frame_urls.txt")
        );
    }

    #[test]
    fn test_missing_video_is_empty_run_not_failure() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("frame_base64.txt");
        let output_arg = output.to_string_lossy().into_owned();
        let args = extract_args(&[
            "/nonexistent/class-clip.mp4",
            "--mode",
            "base64",
            "--output",
            &output_arg,
        ]);

        assert!(run_extract(&args, &HostingConfig::default()).is_ok());
        assert!(!output.exists());
    }

    #[test]
    fn test_imgur_mode_without_client_id_fails_before_extraction() {
        let config = HostingConfig::default();
        assert!(build_sink("imgur", &config).is_err());
        assert!(build_sink("base64", &config).is_ok());
        assert!(build_sink("cloudinary", &config).is_ok());
    }
}
