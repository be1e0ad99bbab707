//! Latitude and longitude of a sounding station.

/// The latitude and longitude
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coords {
    pub lat: f64,
    pub lon: f64,
}

impl From<(f64, f64)> for Coords {
    fn from(pair: (f64, f64)) -> Self {
        Self {
            lat: pair.0,
            lon: pair.1,
        }
    }
}

impl std::fmt::Display for Coords {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let ns = if self.lat < 0.0 { 'S' } else { 'N' };
        let ew = if self.lon < 0.0 { 'W' } else { 'E' };
        write!(f, "{:.2}{} {:.2}{}", self.lat.abs(), ns, self.lon.abs(), ew)
    }
}

#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn test_display_hemispheres() {
        assert_eq!(Coords::from((35.18, -97.44)).to_string(), "35.18N 97.44W");
        assert_eq!(Coords::from((-33.95, 18.6)).to_string(), "33.95S 18.60E");
    }
}
