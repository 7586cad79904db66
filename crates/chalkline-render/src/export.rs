//! Image export: elements on a white background, without the grid.

use crate::renderer::{RenderContext, RenderResult, RendererError};
use kurbo::{Affine, Rect, Size};

/// Padding around the content when exporting tight bounds, in model units.
pub const EXPORT_PADDING: f64 = 20.0;

/// Which part of the board an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportArea {
    /// What is currently on screen, at the current pan and zoom.
    #[default]
    Viewport,
    /// The bounds of all elements plus [`EXPORT_PADDING`], at zoom 1.
    Content,
}

/// Output image size and the transform from model space into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportFrame {
    /// Image size in pixels.
    pub size: Size,
    /// Model coordinates to image pixels.
    pub transform: Affine,
}

impl ExportFrame {
    /// Image size rounded up to whole pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.size.width.ceil() as u32,
            self.size.height.ceil() as u32,
        )
    }

    /// The whole image, for the background fill.
    pub fn rect(&self) -> Rect {
        self.size.to_rect()
    }
}

impl RenderContext<'_> {
    /// Frame an export of committed elements.
    ///
    /// `scale` multiplies the output resolution (1 = 1x, 2 = 2x). Returns
    /// `None` for a degenerate image, or for a content export of an empty
    /// board.
    pub fn export_frame(&self, area: ExportArea, scale: f64) -> Option<ExportFrame> {
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }

        let frame = match area {
            ExportArea::Viewport => ExportFrame {
                size: self.viewport_size * scale,
                transform: Affine::scale(scale) * self.camera.transform(),
            },
            ExportArea::Content => {
                let bounds = self
                    .elements
                    .iter()
                    .map(|e| {
                        let half = e.style().stroke_width / 2.0;
                        e.bounds().inflate(half, half)
                    })
                    .reduce(|a, b| a.union(b))?;
                let padded = bounds.inflate(EXPORT_PADDING, EXPORT_PADDING);
                ExportFrame {
                    size: padded.size() * scale,
                    transform: Affine::scale(scale)
                        * Affine::translate((-padded.x0, -padded.y0)),
                }
            }
        };

        let Size { width, height } = frame.size;
        let usable = width.is_finite() && height.is_finite() && width >= 1.0 && height >= 1.0;
        usable.then_some(frame)
    }
}

/// Encode rasterized RGBA8 pixels as PNG bytes.
pub fn encode_png(rgba: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(RendererError::RenderFailed(format!(
            "expected {expected} bytes of RGBA for {width}x{height}, got {}",
            rgba.len()
        )));
    }

    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| RendererError::RenderFailed(format!("PNG header: {e}")))?;
        writer
            .write_image_data(rgba)
            .map_err(|e| RendererError::RenderFailed(format!("PNG data: {e}")))?;
        writer
            .finish()
            .map_err(|e| RendererError::RenderFailed(format!("PNG finish: {e}")))?;
    }

    log::debug!("Encoded {}x{} PNG, {} bytes", width, height, png_data.len());
    Ok(png_data)
}
