use chrono::NaiveDateTime;
use metfor::{Meters, Quantity};
use std::{fmt::Display, str::FromStr};

use crate::{coords::Coords, errors::SkewTErr};

/// New type wrapper for a station identifier, e.g. OUN, KMSO, or a WMO number like 72357.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId {
    id: String,
}

impl StationId {
    /// The station used when none is given on the command line, Norman, Oklahoma.
    pub const DEFAULT: &'static str = "OUN";

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl Default for StationId {
    fn default() -> Self {
        StationId {
            id: Self::DEFAULT.to_owned(),
        }
    }
}

impl FromStr for StationId {
    type Err = SkewTErr;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        let id = id.trim();

        if id.is_empty() || id.len() > 5 || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SkewTErr::InvalidStationId(id.to_owned()));
        }

        Ok(StationId {
            id: id.to_uppercase(),
        })
    }
}

impl Display for StationId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(formatter, "{}", self.id)
    }
}

/// Description of the station that launched a sounding, as reported by the data server.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StationInfo {
    pub id: Option<String>,
    pub station_num: Option<u32>,
    pub name: Option<String>,
    pub valid_time: Option<NaiveDateTime>,
    pub location: Option<Coords>,
    pub elevation: Option<Meters>,
    /// Precipitable water for the entire sounding in mm.
    pub precipitable_water: Option<f64>,
}

impl StationInfo {
    /// Return true if there is any missing data.
    pub fn incomplete(&self) -> bool {
        self.id.is_none()
            || self.station_num.is_none()
            || self.valid_time.is_none()
            || self.location.is_none()
            || self.elevation.is_none()
    }
}

impl Display for StationInfo {
    /// The parts that are known, e.g. `Norman (72357)  35.18N 97.44W  357 m  PW 6.8 mm`.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        let name = match (&self.name, &self.id) {
            (Some(name), _) => Some(name.as_str()),
            (None, Some(id)) => Some(id.as_str()),
            (None, None) => None,
        };

        let mut parts: Vec<String> = vec![];
        match (name, self.station_num) {
            (Some(name), Some(num)) => parts.push(format!("{} ({})", name, num)),
            (Some(name), None) => parts.push(name.to_owned()),
            (None, Some(num)) => parts.push(num.to_string()),
            (None, None) => {}
        }
        if let Some(loc) = self.location {
            parts.push(loc.to_string());
        }
        if let Some(elev) = self.elevation {
            parts.push(format!("{:.0} m", elev.unpack()));
        }
        if let Some(pw) = self.precipitable_water {
            parts.push(format!("PW {:.1} mm", pw));
        }

        write!(f, "{}", parts.join("  "))
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
