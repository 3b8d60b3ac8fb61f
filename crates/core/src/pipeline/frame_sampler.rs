/// Selects every Nth decoded frame, where N (the stride) is derived from a
/// time interval and the source frame rate.
///
/// Sequence numbers are one-based: with a stride of 30 the frames numbered
/// 30, 60, 90, ... are captured. A stride of zero captures nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSampler {
    stride: usize,
}

impl FrameSampler {
    /// Stride is `floor(interval_secs * fps)`; non-finite or sub-one
    /// products disable sampling.
    pub fn from_interval(interval_secs: f64, fps: f64) -> Self {
        let product = interval_secs * fps;
        let stride = if product.is_finite() && product >= 1.0 {
            product as usize
        } else {
            0
        };
        Self { stride }
    }

    pub fn with_stride(stride: usize) -> Self {
        Self { stride }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn is_enabled(&self) -> bool {
        self.stride > 0
    }

    pub fn should_capture(&self, sequence_number: usize) -> bool {
        self.stride > 0 && sequence_number > 0 && sequence_number % self.stride == 0
    }

    /// Number of captures for a source of `total_frames` frames.
    pub fn expected_captures(&self, total_frames: usize) -> usize {
        if self.stride == 0 {
            0
        } else {
            total_frames / self.stride
        }
    }
}
