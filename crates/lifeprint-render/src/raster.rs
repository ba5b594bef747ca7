//! PNG frame renderer.
//!
//! Each frame starts as a canvas filled with the background color. Live
//! cells are painted as squares with a one-pixel outline in the background
//! color, so neighboring cells stay visually separate.

use std::path::PathBuf;

use image::{ImageFormat, Rgb as Pixel, RgbImage};
use lifeprint_color::Rgb;
use lifeprint_core::frame::{FrameError, FrameRenderer};
use lifeprint_core::layout::CanvasLayout;
use tracing::debug;

use crate::output::OutputFolder;

/// Raster canvas that writes one PNG per finished frame.
#[derive(Debug)]
pub struct RasterCanvas {
    layout: CanvasLayout,
    background: Rgb,
    image: RgbImage,
    output: OutputFolder,
    written: Vec<PathBuf>,
}

impl RasterCanvas {
    /// Create a canvas sized by `layout`.
    pub fn new(layout: CanvasLayout, background: Rgb, output: OutputFolder) -> Self {
        let image = RgbImage::from_pixel(
            layout.canvas_width(),
            layout.canvas_height(),
            to_pixel(background),
        );
        Self {
            layout,
            background,
            image,
            output,
            written: Vec::new(),
        }
    }

    /// The frame currently being drawn.
    #[cfg(test)]
    pub const fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// The output folder, for writing the manifest after the run.
    pub const fn output_mut(&mut self) -> &mut OutputFolder {
        &mut self.output
    }
}

impl FrameRenderer for RasterCanvas {
    fn begin_frame(&mut self, _generation: u64) {
        let fill = to_pixel(self.background);
        for pixel in self.image.pixels_mut() {
            *pixel = fill;
        }
    }

    fn paint_cell(&mut self, x: usize, y: usize, color: Rgb) {
        let rect = self.layout.cell_rect(x, y);
        let (Some((x0, x1)), Some((y0, y1))) = (
            pixel_span(rect.x0, rect.x1, self.image.width()),
            pixel_span(rect.y0, rect.y1, self.image.height()),
        ) else {
            return;
        };

        let fill = to_pixel(color);
        let outline = to_pixel(self.background);
        for py in y0..=y1 {
            for px in x0..=x1 {
                let edge = px == x0 || px == x1 || py == y0 || py == y1;
                self.image
                    .put_pixel(px, py, if edge { outline } else { fill });
            }
        }
    }

    fn finish_frame(&mut self, generation: u64, tag: &str) -> Result<(), FrameError> {
        let path = self.output.frame_path(generation, tag)?;
        self.image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| FrameError::Encode {
                message: e.to_string(),
            })?;
        debug!(generation, path = %path.display(), "Frame written");
        self.written.push(path);
        Ok(())
    }
}

/// Inclusive pixel range covering `[lo, hi]`, clipped to `0..limit`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixel_span(lo: f64, hi: f64, limit: u32) -> Option<(u32, u32)> {
    let last = limit.checked_sub(1)?;
    let start = lo.round().max(0.0) as u32;
    let end = (hi.round().max(0.0) as u32).min(last);
    (start <= end).then_some((start, end))
}

const fn to_pixel(color: Rgb) -> Pixel<u8> {
    Pixel([color.r, color.g, color.b])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Local;
    use lifeprint_core::config::OutputConfig;

    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lifeprint-raster-{name}-{}", std::process::id()))
    }

    fn canvas(root: &std::path::Path) -> RasterCanvas {
        // 4x4 board of 10px cells on a 40x40 canvas.
        let layout = CanvasLayout::new(4, 40, 40, 0).unwrap();
        let output = OutputConfig {
            directory: root.to_path_buf(),
            ..OutputConfig::default()
        };
        RasterCanvas::new(layout, Rgb::WHITE, OutputFolder::new(&output, 4, Local::now()))
    }

    #[test]
    fn span_clips_to_canvas() {
        assert_eq!(pixel_span(0.0, 10.0, 40), Some((0, 10)));
        assert_eq!(pixel_span(35.4, 45.0, 40), Some((35, 39)));
        assert_eq!(pixel_span(-3.0, 2.0, 40), Some((0, 2)));
        assert_eq!(pixel_span(50.0, 60.0, 40), None);
        assert_eq!(pixel_span(0.0, 1.0, 0), None);
    }

    #[test]
    fn cell_has_background_outline() {
        let root = scratch("outline");
        let mut canvas = canvas(&root);
        let red = Rgb::new(255, 0, 0);

        canvas.begin_frame(0);
        canvas.paint_cell(1, 1, red);
        let image = canvas.image();
        assert_eq!(image.get_pixel(15, 15), &Pixel([255, 0, 0]));
        assert_eq!(image.get_pixel(10, 15), &Pixel([255, 255, 255]));
        assert_eq!(image.get_pixel(20, 15), &Pixel([255, 255, 255]));
        assert_eq!(image.get_pixel(5, 5), &Pixel([255, 255, 255]));
    }

    #[test]
    fn begin_frame_clears_previous_cells() {
        let root = scratch("clear");
        let mut canvas = canvas(&root);
        canvas.begin_frame(0);
        canvas.paint_cell(0, 0, Rgb::new(0, 0, 255));
        canvas.begin_frame(1);
        assert!(canvas.image().pixels().all(|p| *p == Pixel([255, 255, 255])));
    }

    #[test]
    fn finish_frame_writes_png() {
        let root = scratch("png");
        let mut canvas = canvas(&root);
        canvas.begin_frame(3);
        canvas.paint_cell(2, 2, Rgb::new(0, 128, 0));
        canvas.finish_frame(3, "cyan").unwrap();

        let path = canvas.written().first().unwrap().clone();
        assert_eq!(path.file_name().unwrap(), "img_0003_cyan.png");
        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (40, 40));
        assert_eq!(decoded.get_pixel(25, 25), &Pixel([0, 128, 0]));

        std::fs::remove_dir_all(root).unwrap();
    }
}
