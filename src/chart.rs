//! Skew-T/log-P charts of a sounding with a hodograph inset.
//!
//! A chart is built in two steps. [`SkewTFigure::compose`] lifts the parcel and lays out every
//! line, shaded area, and wind barb in data coordinates. [`SkewTFigure::draw`] then puts it on any
//! plotters drawing area, which is how figures are saved to files or shown in a window.

use plotters::prelude::*;
use std::path::Path;

use crate::{errors::SkewTErr, image_format::ImageFormat};

mod background;
mod barbs;
mod clip;
mod draw;
mod figure;
mod hodograph;
mod transform;

pub use barbs::{BarbCounts, BarbShape, WindBarb};
pub use draw::ChartFrame;
pub use figure::{AreaKind, ReferenceKind, ReferenceLine, ShadedArea, SkewTFigure};
pub use hodograph::Hodograph;
pub use transform::SkewTransform;

/// Size in pixels of a rendered figure, 8 by 8 inches at 100 dpi.
pub const FIGURE_SIZE: (u32, u32) = (800, 800);

/// Draw a figure into an RGB pixel buffer of size [`FIGURE_SIZE`].
///
/// Returns the frame of the chart so pixels can be mapped back to pressure and temperature.
pub fn render_rgb(fig: &SkewTFigure, buffer: &mut [u8]) -> Result<ChartFrame, SkewTErr> {
    let root = BitMapBackend::with_buffer(buffer, FIGURE_SIZE).into_drawing_area();
    let frame = fig.draw(&root)?;
    root.present()?;

    Ok(frame)
}

/// Save a figure to `path`, encoded as `format`.
pub fn save_figure(fig: &SkewTFigure, path: &Path, format: ImageFormat) -> Result<(), SkewTErr> {
    if format.is_raster() {
        let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
        fig.draw(&root)?;
        root.present()?;
    } else {
        let root = SVGBackend::new(path, FIGURE_SIZE).into_drawing_area();
        fig.draw(&root)?;
        root.present()?;
    }

    tracing::info!(message = "saved figure", path = %path.display(), format = %format);

    Ok(())
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
