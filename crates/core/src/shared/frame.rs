/// A single decoded video frame: contiguous RGB bytes in row-major order.
///
/// Format conversion happens at I/O boundaries only; the pipeline treats
/// pixel data as opaque until the encoder hands it to the `image` crate.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Zero-based position in decode order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// One-based position in decode order, used for sampling and naming.
    pub fn sequence_number(&self) -> usize {
        self.index + 1
    }
}
