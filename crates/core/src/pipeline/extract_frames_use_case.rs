use std::path::{Path, PathBuf};
use std::time::Instant;

use thiserror::Error;

use crate::encoding::domain::frame_encoder::{EncodeError, FrameEncoder};
use crate::pipeline::capture_sink::CaptureSink;
use crate::pipeline::frame_sampler::FrameSampler;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::video_metadata::VideoMetadata;
use crate::upload::domain::image_uploader::UploadError;
use crate::video::domain::video_reader::VideoReader;

/// Setup failures that stop an extraction before any frame is read.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("video file not found at {}", .0.display())]
    VideoNotFound(PathBuf),
    #[error("cannot open video file {}: {message}", .path.display())]
    OpenFailed { path: PathBuf, message: String },
}

/// Why a sampled frame produced no result.
#[derive(Error, Debug)]
pub enum SkipReason {
    #[error("encoding failed: {0}")]
    Encode(#[from] EncodeError),
    #[error("delivery failed: {0}")]
    Delivery(#[from] UploadError),
}

#[derive(Debug)]
pub enum FrameOutcome {
    Captured {
        sequence_number: usize,
        value: String,
    },
    Skipped {
        sequence_number: usize,
        reason: SkipReason,
    },
}

impl FrameOutcome {
    pub fn sequence_number(&self) -> usize {
        match self {
            Self::Captured {
                sequence_number, ..
            }
            | Self::Skipped {
                sequence_number, ..
            } => *sequence_number,
        }
    }
}

/// Result of a completed extraction, in capture order.
#[derive(Debug)]
pub struct ExtractionReport {
    pub metadata: VideoMetadata,
    pub stride: usize,
    pub frames_read: usize,
    pub outcomes: Vec<FrameOutcome>,
}

impl ExtractionReport {
    /// Successful results (URLs or base64 strings) in capture order.
    pub fn captured(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                FrameOutcome::Captured { value, .. } => Some(value.as_str()),
                FrameOutcome::Skipped { .. } => None,
            })
            .collect()
    }

    pub fn into_captured(self) -> Vec<String> {
        self.outcomes
            .into_iter()
            .filter_map(|o| match o {
                FrameOutcome::Captured { value, .. } => Some(value),
                FrameOutcome::Skipped { .. } => None,
            })
            .collect()
    }

    pub fn captured_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FrameOutcome::Captured { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.captured_count()
    }
}

/// Periodic frame extraction: read → sample → resize/compress → deliver.
///
/// Runs synchronously; each delivery blocks the loop until it finishes.
pub struct ExtractFramesUseCase {
    reader: Box<dyn VideoReader>,
    encoder: Box<dyn FrameEncoder>,
    sink: Box<dyn CaptureSink>,
    logger: Box<dyn PipelineLogger>,
    interval_secs: f64,
}

impl ExtractFramesUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        encoder: Box<dyn FrameEncoder>,
        sink: Box<dyn CaptureSink>,
        logger: Box<dyn PipelineLogger>,
        interval_secs: f64,
    ) -> Self {
        Self {
            reader,
            encoder,
            sink,
            logger,
            interval_secs,
        }
    }

    /// Extracts one frame every `interval_secs` from `video_path`.
    ///
    /// The reader is closed exactly once after a successful open, whether
    /// decoding runs to the end or stops on an error.
    pub fn execute(&mut self, video_path: &Path) -> Result<ExtractionReport, ExtractError> {
        if !video_path.exists() {
            let err = ExtractError::VideoNotFound(video_path.to_path_buf());
            log::error!("{err}");
            return Err(err);
        }

        let metadata = self.reader.open(video_path).map_err(|e| {
            let err = ExtractError::OpenFailed {
                path: video_path.to_path_buf(),
                message: e.to_string(),
            };
            log::error!("{err}");
            err
        })?;

        let sampler = FrameSampler::from_interval(self.interval_secs, metadata.fps);
        self.logger.info(&format!(
            "Video: {} frames, {:.2} FPS, {:.2}s duration",
            metadata.total_frames,
            metadata.fps,
            metadata.duration_secs()
        ));

        let mut outcomes = Vec::new();
        let mut frames_read = 0;

        if sampler.is_enabled() {
            self.logger.info(&format!(
                "Capturing every {} frames ({})...",
                sampler.stride(),
                self.sink.describe()
            ));
            frames_read = self.capture_frames(&metadata, &sampler, &mut outcomes);
        } else {
            self.logger.warn(&format!(
                "Interval of {}s at {:.2} FPS is shorter than one frame; nothing to capture",
                self.interval_secs, metadata.fps
            ));
        }

        self.reader.close();

        let report = ExtractionReport {
            metadata,
            stride: sampler.stride(),
            frames_read,
            outcomes,
        };
        self.logger.info(&format!(
            "Finished. Captured {} frames ({} skipped).",
            report.captured_count(),
            report.skipped_count()
        ));
        self.logger.summary();
        Ok(report)
    }

    /// Decode loop. Returns the number of frames read.
    fn capture_frames(
        &mut self,
        metadata: &VideoMetadata,
        sampler: &FrameSampler,
        outcomes: &mut Vec<FrameOutcome>,
    ) -> usize {
        let total = metadata.total_frames;
        let mut frames_read = 0;
        let mut decode_start = Instant::now();

        for item in self.reader.frames() {
            let frame = match item {
                Ok(frame) => frame,
                Err(e) => {
                    self.logger
                        .warn(&format!("Decoding stopped after {frames_read} frames: {e}"));
                    break;
                }
            };
            self.logger
                .timing("decode", decode_start.elapsed().as_secs_f64() * 1000.0);

            frames_read += 1;
            let sequence_number = frames_read;
            self.logger.progress(sequence_number, total);

            if sampler.should_capture(sequence_number) {
                let encode_start = Instant::now();
                let encoded = self.encoder.encode(&frame);
                self.logger
                    .timing("encode", encode_start.elapsed().as_secs_f64() * 1000.0);

                let outcome = match encoded {
                    Ok(image) => {
                        let deliver_start = Instant::now();
                        let delivered = self.sink.deliver(sequence_number, &image);
                        self.logger
                            .timing("deliver", deliver_start.elapsed().as_secs_f64() * 1000.0);
                        match delivered {
                            Ok(value) => FrameOutcome::Captured {
                                sequence_number,
                                value,
                            },
                            Err(e) => FrameOutcome::Skipped {
                                sequence_number,
                                reason: e.into(),
                            },
                        }
                    }
                    Err(e) => FrameOutcome::Skipped {
                        sequence_number,
                        reason: e.into(),
                    },
                };

                if let FrameOutcome::Skipped { reason, .. } = &outcome {
                    self.logger
                        .warn(&format!("Skipping frame {sequence_number}: {reason}"));
                }
                outcomes.push(outcome);
            }

            decode_start = Instant::now();
        }

        frames_read
    }
}
