//! Module for errors.
use plotters::drawing::DrawingAreaErrorKind;
use sounding_analysis::AnalysisError;
use std::{error::Error, fmt::Display, process::ExitStatus};

/// Error from fetching, analyzing, or plotting a sounding, or from converting a notebook.
#[derive(Debug)]
pub enum SkewTErr {
    // Inherited errors from std
    /// Error forwarded from std
    IO(::std::io::Error),

    // Other forwarded errors
    /// Error forwarded from reqwest
    Network(::reqwest::Error),
    /// Error forwarded from the sounding-analysis crate
    SoundingAnalysis(AnalysisError),
    /// Error forwarded from the strum crate
    StrumError(strum::ParseError),
    /// Error forwarded from clap when the command line can't be parsed
    CmdLine(::clap::Error),
    /// Error forwarded from the plotting backend, cause information replaced by a string
    Render(String),
    /// Error forwarded from the interactive window, cause information replaced by a string
    Viewer(String),
    /// General error with any cause information erased and replaced by a string
    GeneralError(String),

    // My own errors from this crate
    /// The data server answered with something other than success.
    UnexpectedStatus(::reqwest::StatusCode, String),
    /// The data server has no sounding for this station and time.
    NoData {
        /// Station identifier that was requested.
        station: String,
        /// Time that was requested, formatted for display.
        time: String,
    },
    /// The response from the data server could not be understood.
    MalformedResponse(String),
    /// Not enough data to complete the task.
    NotEnoughData,
    /// The profile arrays violate an invariant.
    InvalidProfile(&'static str),
    /// Invalid station identifier.
    InvalidStationId(String),
    /// Date or hour could not be turned into a valid time.
    InvalidTimestamp(String),
    /// A formula from metfor could not produce a value.
    MetForError,
    /// An external program exited unsuccessfully.
    ExternalTool {
        /// Name of the program that was run.
        program: String,
        /// How it exited.
        status: ExitStatus,
    },
    /// This build does not include the interactive window.
    ViewerUnavailable,
}

impl Display for SkewTErr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        use crate::errors::SkewTErr::*;

        match self {
            IO(err) => write!(f, "std lib io error: {}", err),

            Network(err) => write!(f, "network error: {}", err),
            SoundingAnalysis(err) => write!(f, "error from sounding-analysis: {}", err),
            StrumError(err) => write!(f, "error forwarded from strum crate: {}", err),
            CmdLine(err) => write!(f, "invalid command line: {}", err),
            Render(msg) => write!(f, "error drawing chart: {}", msg),
            Viewer(msg) => write!(f, "error in display window: {}", msg),
            GeneralError(msg) => write!(f, "general error forwarded: {}", msg),

            UnexpectedStatus(status, url) => {
                write!(f, "unexpected status {} for {}", status, url)
            }
            NoData { station, time } => {
                write!(f, "no data available for {} for station {}", time, station)
            }
            MalformedResponse(msg) => write!(f, "malformed response: {}", msg),
            NotEnoughData => write!(f, "not enough data to complete task"),
            InvalidProfile(msg) => write!(f, "invalid profile: {}", msg),
            InvalidStationId(id) => write!(f, "invalid station id: {}", id),
            InvalidTimestamp(msg) => write!(f, "invalid timestamp: {}", msg),
            MetForError => write!(f, "thermodynamic calculation failed"),
            ExternalTool { program, status } => write!(f, "{} failed: {}", program, status),
            ViewerUnavailable => write!(
                f,
                "built without the interactive viewer, use --savefig to write an image"
            ),
        }
    }
}

impl Error for SkewTErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SkewTErr::IO(err) => Some(err),
            SkewTErr::Network(err) => Some(err),
            SkewTErr::SoundingAnalysis(err) => Some(err),
            SkewTErr::StrumError(err) => Some(err),
            SkewTErr::CmdLine(err) => Some(err),
            _ => None,
        }
    }
}

impl From<::std::io::Error> for SkewTErr {
    fn from(err: ::std::io::Error) -> SkewTErr {
        SkewTErr::IO(err)
    }
}

impl From<::reqwest::Error> for SkewTErr {
    fn from(err: ::reqwest::Error) -> SkewTErr {
        SkewTErr::Network(err)
    }
}

impl From<AnalysisError> for SkewTErr {
    fn from(err: AnalysisError) -> SkewTErr {
        SkewTErr::SoundingAnalysis(err)
    }
}

impl From<strum::ParseError> for SkewTErr {
    fn from(err: strum::ParseError) -> SkewTErr {
        SkewTErr::StrumError(err)
    }
}

impl From<::clap::Error> for SkewTErr {
    fn from(err: ::clap::Error) -> SkewTErr {
        SkewTErr::CmdLine(err)
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for SkewTErr
where
    E: Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> SkewTErr {
        SkewTErr::Render(err.to_string())
    }
}

#[cfg(feature = "viewer")]
impl From<minifb::Error> for SkewTErr {
    fn from(err: minifb::Error) -> SkewTErr {
        SkewTErr::Viewer(err.to_string())
    }
}

impl From<Box<dyn Error>> for SkewTErr {
    fn from(err: Box<dyn Error>) -> SkewTErr {
        SkewTErr::GeneralError(err.to_string())
    }
}
