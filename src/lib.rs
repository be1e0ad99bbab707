#![deny(missing_docs)]
//! Plot Skew-T/log-P diagrams of upper air soundings from the University of Wyoming archive, and
//! convert notebooks to PDF.

//
// Public API
//
pub use crate::chart::{
    render_rgb, save_figure, AreaKind, BarbCounts, BarbShape, ChartFrame, Hodograph,
    ReferenceKind, ReferenceLine, ShadedArea, SkewTFigure, SkewTransform, WindBarb, FIGURE_SIZE,
};
pub use crate::cmd_line::SkewTArgs;
pub use crate::convert::{CommandRunner, Conversion, SystemRunner};
pub use crate::coords::Coords;
pub use crate::errors::SkewTErr;
pub use crate::image_format::ImageFormat;
pub use crate::sounding::{wind_components, DataRow, Sounding};
pub use crate::station::{StationId, StationInfo};
pub use crate::thermo::{Level, ParcelAnalysis};
pub use crate::viewer::show;
pub use crate::wyoming::{parse_page, WyomingClient};

pub mod thermo;

//
// Implementation only
//
#[macro_use]
extern crate strum_macros;

mod chart;
mod cmd_line;
mod convert;
mod coords;
mod errors;
mod image_format;
mod sounding;
mod station;
mod viewer;
mod wyoming;
