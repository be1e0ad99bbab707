//! Command line options for the sounding plotter.

use chrono::{NaiveDate, NaiveDateTime};
use clap::{crate_version, value_parser, Arg, ArgAction, ArgMatches, Command};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};
use tracing::Level;

use crate::{
    errors::SkewTErr, image_format::ImageFormat, station::StationId, wyoming::WyomingClient,
};

/// Struct to package up command line arguments.
#[derive(Clone, Debug)]
pub struct SkewTArgs {
    // Station to plot, e.g. OUN
    station: StationId,
    // Date and hour of the sounding
    time: NaiveDateTime,
    // Save to a file instead of showing a window
    save_fig: bool,
    // Format of the saved image
    img_format: ImageFormat,
    // Extension exactly as given, used for the file name
    extension: String,
    // Where saved images go
    output_dir: PathBuf,
    // Base url of the sounding service
    server_url: String,
    // HTTP timeout
    timeout: Duration,
    // Logging verbosity
    log_level: Level,
}

impl SkewTArgs {
    const DEFAULT_IMG_FORMAT: &'static str = "png";
    const DEFAULT_TIMEOUT_MILLIS: &'static str = "10000";
    const DEFAULT_LOG_LEVEL: &'static str = "info";
    const DEFAULT_OUTPUT_DIR: &'static str = ".";

    /// Create the application with all of its arguments.
    pub fn new_app() -> Command {
        Command::new("skewt")
            .about("Make an advanced Skew-T plot of upper air observations.")
            .version(crate_version!())
            .arg(
                Arg::new("date")
                    .long("date")
                    .required(true)
                    .value_parser(parse_date)
                    .help("Date of the sounding YYYYMMDD"),
            )
            .arg(
                Arg::new("hour")
                    .long("hour")
                    .required(true)
                    .value_parser(value_parser!(u32).range(0..24))
                    .help("Time of the sounding in hours"),
            )
            .arg(
                Arg::new("station")
                    .long("station")
                    .default_value(StationId::DEFAULT)
                    .value_parser(StationId::from_str)
                    .help("Station identifier, e.g. OUN"),
            )
            .arg(
                Arg::new("savefig")
                    .long("savefig")
                    .action(ArgAction::SetTrue)
                    .help("Save out figure instead of displaying it"),
            )
            .arg(
                Arg::new("imgformat")
                    .long("imgformat")
                    .default_value(Self::DEFAULT_IMG_FORMAT)
                    .value_parser(parse_extension)
                    .help("Format to save the resulting image as")
                    .long_help(
                        "Format to save the resulting image as: png, jpg, jpeg, bmp, or svg.",
                    ),
            )
            .arg(
                Arg::new("output-dir")
                    .long("output-dir")
                    .default_value(Self::DEFAULT_OUTPUT_DIR)
                    .value_parser(value_parser!(PathBuf))
                    .help("Directory to save figures in"),
            )
            .arg(
                Arg::new("server-url")
                    .long("server-url")
                    .default_value(WyomingClient::DEFAULT_URL)
                    .help("Base URL of the sounding service"),
            )
            .arg(
                Arg::new("timeout-millis")
                    .long("timeout-millis")
                    .default_value(Self::DEFAULT_TIMEOUT_MILLIS)
                    .value_parser(value_parser!(u64))
                    .help("Timeout for requests to the sounding service, in milliseconds"),
            )
            .arg(
                Arg::new("log-level")
                    .long("log-level")
                    .default_value(Self::DEFAULT_LOG_LEVEL)
                    .value_parser(value_parser!(Level))
                    .help("Logging verbosity")
                    .long_help(
                        "Logging verbosity. Allowed values are 'trace', 'debug', 'info', 'warn', \
                         and 'error' (case insensitive)",
                    ),
            )
    }

    /// Parse the arguments of this process, exiting with a usage message if they are invalid.
    pub fn parse() -> Result<Self, SkewTErr> {
        Self::from_matches(&Self::new_app().get_matches())
    }

    /// Parse an explicit list of arguments, the first one is the program name.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, SkewTErr>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::new_app().try_get_matches_from(args)?;
        Self::from_matches(&matches)
    }

    /// Pull the values out of parsed matches.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, SkewTErr> {
        let missing = |name: &str| SkewTErr::GeneralError(format!("missing argument: {}", name));

        let date = *matches
            .get_one::<NaiveDate>("date")
            .ok_or_else(|| missing("date"))?;
        let hour = *matches
            .get_one::<u32>("hour")
            .ok_or_else(|| missing("hour"))?;
        let time = date
            .and_hms_opt(hour, 0, 0)
            .ok_or_else(|| SkewTErr::InvalidTimestamp(format!("{} {}Z", date, hour)))?;

        let station = matches
            .get_one::<StationId>("station")
            .cloned()
            .unwrap_or_default();

        let extension = matches
            .get_one::<String>("imgformat")
            .cloned()
            .unwrap_or_else(|| Self::DEFAULT_IMG_FORMAT.to_owned());
        let img_format = ImageFormat::from_str(&extension)?;

        let output_dir = matches
            .get_one::<PathBuf>("output-dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_OUTPUT_DIR));

        let server_url = matches
            .get_one::<String>("server-url")
            .cloned()
            .unwrap_or_else(|| WyomingClient::DEFAULT_URL.to_owned());

        let timeout = matches
            .get_one::<u64>("timeout-millis")
            .map(|&millis| Duration::from_millis(millis))
            .unwrap_or(WyomingClient::DEFAULT_TIMEOUT);

        let log_level = matches
            .get_one::<Level>("log-level")
            .copied()
            .unwrap_or(Level::INFO);

        Ok(SkewTArgs {
            station,
            time,
            save_fig: matches.get_flag("savefig"),
            img_format,
            extension,
            output_dir,
            server_url,
            timeout,
            log_level,
        })
    }

    /// Get the station.
    pub fn station(&self) -> &StationId {
        &self.station
    }

    /// Get the valid time of the sounding.
    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    /// Whether to save the figure instead of showing it.
    pub fn save_fig(&self) -> bool {
        self.save_fig
    }

    /// Get the image format.
    pub fn img_format(&self) -> ImageFormat {
        self.img_format
    }

    /// Get the base url of the sounding service.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Get the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the logging level.
    pub fn log_level(&self) -> Level {
        self.log_level
    }

    /// Get the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File name for a saved figure, e.g. `OUN_20200101_12Z.png`.
    pub fn output_file_name(&self) -> String {
        format!(
            "{}_{}.{}",
            self.station,
            self.time.format("%Y%m%d_%HZ"),
            self.extension
        )
    }

    /// Full path for a saved figure.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.output_file_name())
    }
}

fn parse_date(date: &str) -> Result<NaiveDate, SkewTErr> {
    NaiveDate::parse_from_str(date.trim(), "%Y%m%d")
        .map_err(|err| SkewTErr::InvalidTimestamp(format!("{}: {}", date, err)))
}

fn parse_extension(ext: &str) -> Result<String, SkewTErr> {
    ImageFormat::from_str(ext)?;
    Ok(ext.to_owned())
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn test_output_file_name() {
        let args = SkewTArgs::try_parse_from(&[
            "skewt",
            "--station",
            "OUN",
            "--date",
            "20200101",
            "--hour",
            "12",
            "--savefig",
            "--imgformat",
            "png",
        ])
        .unwrap();

        assert!(args.save_fig());
        assert_eq!(args.img_format(), ImageFormat::Png);
        assert_eq!(args.output_file_name(), "OUN_20200101_12Z.png");
        assert_eq!(args.output_path(), Path::new(".").join("OUN_20200101_12Z.png"));
    }

    #[test]
    fn test_defaults() {
        let args = SkewTArgs::try_parse_from(&["skewt", "--date", "20190520", "--hour", "0"])
            .unwrap();

        assert_eq!(args.station().as_str(), "OUN");
        assert!(!args.save_fig());
        assert_eq!(args.img_format(), ImageFormat::Png);
        assert_eq!(args.server_url(), WyomingClient::DEFAULT_URL);
        assert_eq!(args.timeout(), Duration::from_millis(10_000));
        assert_eq!(args.log_level(), Level::INFO);
        assert_eq!(args.output_file_name(), "OUN_20190520_00Z.png");
    }

    #[test]
    fn test_extension_kept_as_given() {
        let args = SkewTArgs::try_parse_from(&[
            "skewt",
            "--date",
            "20200101",
            "--hour",
            "6",
            "--station",
            "dnr",
            "--imgformat",
            "jpeg",
            "--output-dir",
            "/tmp/charts",
        ])
        .unwrap();

        assert_eq!(args.img_format(), ImageFormat::Jpeg);
        assert_eq!(
            args.output_path(),
            Path::new("/tmp/charts/DNR_20200101_06Z.jpeg")
        );
    }

    #[test]
    fn test_missing_required() {
        assert!(SkewTArgs::try_parse_from(&["skewt", "--hour", "12"]).is_err());
        assert!(SkewTArgs::try_parse_from(&["skewt", "--date", "20200101"]).is_err());
    }

    #[test]
    fn test_bad_values() {
        let parse = |date: &str, hour: &str| {
            SkewTArgs::try_parse_from(&["skewt", "--date", date, "--hour", hour])
        };
        assert!(parse("20200101", "24").is_err());
        assert!(parse("20201301", "0").is_err());
        assert!(parse("2020-01-01", "0").is_err());
        assert!(parse("20200101", "23").is_ok());

        assert!(SkewTArgs::try_parse_from(&[
            "skewt",
            "--date",
            "20200101",
            "--hour",
            "0",
            "--imgformat",
            "docx"
        ])
        .is_err());
        assert!(SkewTArgs::try_parse_from(&[
            "skewt",
            "--date",
            "20200101",
            "--hour",
            "0",
            "--log-level",
            "loud"
        ])
        .is_err());
    }
}
