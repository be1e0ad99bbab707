//! A vertical profile of upper air observations.

use itertools::izip;
use metfor::{Celsius, HectoPascal, Knots, Meters, Quantity};

use crate::{errors::SkewTErr, station::StationInfo};

/// An observed sounding, ordered from the ground up (decreasing pressure).
///
/// All of the profiles have the same length and are index aligned, the constructor checks this.
#[derive(Clone, Debug)]
pub struct Sounding {
    station: StationInfo,
    pressure: Vec<HectoPascal>,
    height: Vec<Meters>,
    temperature: Vec<Celsius>,
    dew_point: Vec<Celsius>,
    u_wind: Vec<Knots>,
    v_wind: Vec<Knots>,
    wind_speed: Vec<Knots>,
}

/// One level of a sounding.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataRow {
    pub pressure: HectoPascal,
    pub height: Meters,
    pub temperature: Celsius,
    pub dew_point: Celsius,
    pub u_wind: Knots,
    pub v_wind: Knots,
    pub wind_speed: Knots,
}

impl Sounding {
    /// Build a sounding from rows ordered from the surface up.
    pub fn from_rows(
        station: StationInfo,
        rows: impl IntoIterator<Item = DataRow>,
    ) -> Result<Self, SkewTErr> {
        let rows = rows.into_iter();
        let (lower, _) = rows.size_hint();

        let mut pressure = Vec::with_capacity(lower);
        let mut height = Vec::with_capacity(lower);
        let mut temperature = Vec::with_capacity(lower);
        let mut dew_point = Vec::with_capacity(lower);
        let mut u_wind = Vec::with_capacity(lower);
        let mut v_wind = Vec::with_capacity(lower);
        let mut wind_speed = Vec::with_capacity(lower);

        for row in rows {
            pressure.push(row.pressure);
            height.push(row.height);
            temperature.push(row.temperature);
            dew_point.push(row.dew_point);
            u_wind.push(row.u_wind);
            v_wind.push(row.v_wind);
            wind_speed.push(row.wind_speed);
        }

        Self::new(
            station,
            pressure,
            height,
            temperature,
            dew_point,
            u_wind,
            v_wind,
            wind_speed,
        )
    }

    /// Build a sounding from parallel profiles.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        station: StationInfo,
        pressure: Vec<HectoPascal>,
        height: Vec<Meters>,
        temperature: Vec<Celsius>,
        dew_point: Vec<Celsius>,
        u_wind: Vec<Knots>,
        v_wind: Vec<Knots>,
        wind_speed: Vec<Knots>,
    ) -> Result<Self, SkewTErr> {
        let len = pressure.len();
        if len == 0 {
            return Err(SkewTErr::NotEnoughData);
        }

        if [
            height.len(),
            temperature.len(),
            dew_point.len(),
            u_wind.len(),
            v_wind.len(),
            wind_speed.len(),
        ]
        .iter()
        .any(|&other| other != len)
        {
            return Err(SkewTErr::InvalidProfile("profiles have different lengths"));
        }

        if pressure.windows(2).any(|pair| pair[1] > pair[0]) {
            return Err(SkewTErr::InvalidProfile(
                "pressure must not increase with height",
            ));
        }

        Ok(Sounding {
            station,
            pressure,
            height,
            temperature,
            dew_point,
            u_wind,
            v_wind,
            wind_speed,
        })
    }

    /// Information about the station and time of the sounding.
    pub fn station_info(&self) -> &StationInfo {
        &self.station
    }

    /// Number of levels in the sounding.
    pub fn len(&self) -> usize {
        self.pressure.len()
    }

    /// Always false, the constructor rejects empty profiles.
    pub fn is_empty(&self) -> bool {
        self.pressure.is_empty()
    }

    /// Get the pressure profile.
    pub fn pressure_profile(&self) -> &[HectoPascal] {
        &self.pressure
    }

    /// Get the geopotential height profile.
    pub fn height_profile(&self) -> &[Meters] {
        &self.height
    }

    /// Get the temperature profile.
    pub fn temperature_profile(&self) -> &[Celsius] {
        &self.temperature
    }

    /// Get the dew point profile.
    pub fn dew_point_profile(&self) -> &[Celsius] {
        &self.dew_point
    }

    /// Get the eastward wind component profile.
    pub fn u_wind_profile(&self) -> &[Knots] {
        &self.u_wind
    }

    /// Get the northward wind component profile.
    pub fn v_wind_profile(&self) -> &[Knots] {
        &self.v_wind
    }

    /// Get the wind speed profile.
    pub fn wind_speed_profile(&self) -> &[Knots] {
        &self.wind_speed
    }

    /// The lowest level of the sounding.
    pub fn surface(&self) -> DataRow {
        self.row(0)
    }

    /// Get a single level. Panics if the index is out of bounds, like slice indexing.
    pub fn row(&self, idx: usize) -> DataRow {
        DataRow {
            pressure: self.pressure[idx],
            height: self.height[idx],
            temperature: self.temperature[idx],
            dew_point: self.dew_point[idx],
            u_wind: self.u_wind[idx],
            v_wind: self.v_wind[idx],
            wind_speed: self.wind_speed[idx],
        }
    }

    /// Iterate over all the levels from the surface up.
    pub fn rows(&self) -> impl Iterator<Item = DataRow> + '_ {
        (0..self.len()).map(move |idx| self.row(idx))
    }

    /// Mask selecting levels at or below `top` in the atmosphere, i.e. pressure >= `top`.
    pub fn mask_at_or_below(&self, top: HectoPascal) -> Vec<bool> {
        self.pressure.iter().map(|&p| p >= top).collect()
    }

    /// Wind components and speed for every level with pressure at or above `top`. These are the
    /// values plotted on the hodograph.
    pub fn winds_at_or_below(&self, top: HectoPascal) -> Vec<(Knots, Knots, Knots)> {
        izip!(
            self.mask_at_or_below(top),
            &self.u_wind,
            &self.v_wind,
            &self.wind_speed
        )
        .filter(|(keep, _, _, _)| *keep)
        .map(|(_, &u, &v, &spd)| (u, v, spd))
        .collect()
    }
}

/// Convert a meteorological wind direction (degrees, direction the wind blows from) and speed
/// into eastward and northward components.
pub fn wind_components(direction_deg: f64, speed: Knots) -> (Knots, Knots) {
    let rads = direction_deg.to_radians();
    let spd = speed.unpack();

    (Knots(-spd * rads.sin()), Knots(-spd * rads.cos()))
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
pub(crate) mod unit {
    use super::*;

    pub(crate) fn row(p: f64, h: f64, t: f64, dp: f64, dir: f64, spd: f64) -> DataRow {
        let (u, v) = wind_components(dir, Knots(spd));
        DataRow {
            pressure: HectoPascal(p),
            height: Meters(h),
            temperature: Celsius(t),
            dew_point: Celsius(dp),
            u_wind: u,
            v_wind: v,
            wind_speed: Knots(spd),
        }
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        let res = Sounding::new(
            StationInfo::default(),
            vec![HectoPascal(1000.0), HectoPascal(900.0)],
            vec![Meters(100.0), Meters(1000.0)],
            vec![Celsius(20.0), Celsius(15.0)],
            vec![Celsius(10.0)],
            vec![Knots(0.0), Knots(0.0)],
            vec![Knots(0.0), Knots(0.0)],
            vec![Knots(0.0), Knots(0.0)],
        );

        assert!(matches!(res, Err(SkewTErr::InvalidProfile(_))));
    }

    #[test]
    fn test_rejects_empty() {
        let res = Sounding::from_rows(StationInfo::default(), vec![]);
        assert!(matches!(res, Err(SkewTErr::NotEnoughData)));
    }

    #[test]
    fn test_rejects_increasing_pressure() {
        let res = Sounding::from_rows(
            StationInfo::default(),
            vec![
                row(900.0, 1000.0, 15.0, 10.0, 180.0, 10.0),
                row(1000.0, 100.0, 20.0, 10.0, 180.0, 10.0),
            ],
        );

        assert!(matches!(res, Err(SkewTErr::InvalidProfile(_))));
    }

    #[test]
    fn test_hodograph_mask_boundary() {
        let snd = Sounding::from_rows(
            StationInfo::default(),
            vec![
                row(1000.0, 100.0, 20.0, 10.0, 180.0, 10.0),
                row(500.0, 5500.0, -10.0, -20.0, 250.0, 40.0),
                row(100.0, 16000.0, -60.0, -80.0, 270.0, 30.0),
                row(99.0, 16100.0, -60.0, -80.0, 270.0, 25.0),
            ],
        )
        .unwrap();

        let mask = snd.mask_at_or_below(HectoPascal(100.0));
        assert_eq!(mask, vec![true, true, true, false]);

        let winds = snd.winds_at_or_below(HectoPascal(100.0));
        assert_eq!(winds.len(), 3);
        assert_eq!(winds[2].2, Knots(30.0));
    }

    #[test]
    fn test_wind_components() {
        // A south wind blows toward the north.
        let (u, v) = wind_components(180.0, Knots(10.0));
        assert!(u.unpack().abs() < 1.0e-9);
        assert!((v.unpack() - 10.0).abs() < 1.0e-9);

        // A west wind blows toward the east.
        let (u, v) = wind_components(270.0, Knots(20.0));
        assert!((u.unpack() - 20.0).abs() < 1.0e-9);
        assert!(v.unpack().abs() < 1.0e-9);
    }

    #[test]
    fn test_surface_row() {
        let snd = Sounding::from_rows(
            StationInfo::default(),
            vec![
                row(1000.0, 100.0, 20.0, 10.0, 180.0, 10.0),
                row(850.0, 1500.0, 12.0, 5.0, 200.0, 20.0),
                row(700.0, 3000.0, 2.0, -5.0, 230.0, 30.0),
            ],
        )
        .unwrap();

        assert!(!snd.is_empty());
        assert_eq!(snd.surface().temperature, Celsius(20.0));
        assert_eq!(snd.row(1).pressure, HectoPascal(850.0));
        assert_eq!(snd.rows().count(), 3);
    }
}
