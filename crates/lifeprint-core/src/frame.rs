//! Frame rendering seam between the driver loop and an output surface.
//!
//! The driver knows nothing about pixels or files. It announces a frame,
//! hands over each live cell with its color, and then asks the renderer to
//! finish. A raster backend lives in the binary; [`RecordingRenderer`] keeps
//! frames in memory for tests and dry runs.

use lifeprint_color::Rgb;

/// Errors a renderer can report when finishing a frame.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// Writing the frame to disk failed.
    #[error("failed to write frame: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Encoding the frame failed.
    #[error("failed to encode frame: {message}")]
    Encode {
        /// Encoder error text.
        message: String,
    },
}

/// Receives the cells of each generation.
pub trait FrameRenderer {
    /// Start a new frame for `generation`, clearing any previous one.
    fn begin_frame(&mut self, generation: u64);

    /// Paint the live cell at `(x, y)`.
    fn paint_cell(&mut self, x: usize, y: usize, color: Rgb);

    /// Complete the frame. `tag` names the hue family it was drawn with.
    fn finish_frame(&mut self, generation: u64, tag: &str) -> Result<(), FrameError>;
}

/// One frame captured by [`RecordingRenderer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedFrame {
    /// Generation the frame shows.
    pub generation: u64,
    /// Tag passed to `finish_frame`.
    pub tag: String,
    /// Painted cells in paint order.
    pub cells: Vec<(usize, usize, Rgb)>,
}

/// Renderer that keeps every finished frame in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    current: Option<RecordedFrame>,
    frames: Vec<RecordedFrame>,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames finished so far.
    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    /// Consume the recorder and return its frames.
    pub fn into_frames(self) -> Vec<RecordedFrame> {
        self.frames
    }
}

impl FrameRenderer for RecordingRenderer {
    fn begin_frame(&mut self, generation: u64) {
        self.current = Some(RecordedFrame {
            generation,
            ..RecordedFrame::default()
        });
    }

    fn paint_cell(&mut self, x: usize, y: usize, color: Rgb) {
        if let Some(frame) = self.current.as_mut() {
            frame.cells.push((x, y, color));
        }
    }

    fn finish_frame(&mut self, generation: u64, tag: &str) -> Result<(), FrameError> {
        let mut frame = self.current.take().unwrap_or_default();
        frame.generation = generation;
        tag.clone_into(&mut frame.tag);
        self.frames.push(frame);
        Ok(())
    }
}
