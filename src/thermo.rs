//! Lift the surface parcel with sounding-analysis and keep what the chart needs.
//!
//! Levels that do not exist in a sounding (e.g. no LFC in a stable atmosphere) are `None`, as are
//! CAPE and CIN when the library can't bound the buoyant layer.

use metfor::{Celsius, HectoPascal, JpKg, Meters, Quantity};
use optional::{some, Noned, Optioned};
use sounding_analysis::Parcel;

use crate::{errors::SkewTErr, sounding::Sounding};

/// A pressure/temperature point in the atmosphere.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Level {
    pub pressure: HectoPascal,
    pub temperature: Celsius,
}

/// A level of the parcel ascent with both the environment and parcel temperatures.
///
/// These are virtual temperatures, the buoyancy of the parcel is their difference.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfilePoint {
    pub pressure: HectoPascal,
    pub environment: Celsius,
    pub parcel: Celsius,
}

impl ProfilePoint {
    /// Parcel minus environment temperature.
    pub fn buoyancy(&self) -> f64 {
        self.parcel.unpack() - self.environment.unpack()
    }
}

/// The result of lifting a surface parcel through a sounding.
#[derive(Clone, Debug)]
pub struct ParcelAnalysis {
    /// Lifted condensation level of the surface parcel.
    pub lcl: Option<Level>,
    /// Level of free convection.
    pub lfc: Option<Level>,
    /// Equilibrium level.
    pub el: Option<Level>,
    /// The ascent from the surface up. Every level of the sounding is here, plus the LCL and the
    /// points where the parcel crosses the environment.
    pub profile: Vec<ProfilePoint>,
    /// Convective available potential energy.
    pub cape: Option<JpKg>,
    /// Convective inhibition, zero or negative.
    pub cin: Option<JpKg>,
}

impl ParcelAnalysis {
    /// Lift the parcel at the first (lowest) level of a sounding.
    pub fn surface_parcel(snd: &Sounding) -> Result<Self, SkewTErr> {
        Self::from_profiles(
            snd.pressure_profile(),
            snd.height_profile(),
            snd.temperature_profile(),
            snd.dew_point_profile(),
        )
    }

    /// Lift the parcel at the first level of parallel profiles ordered from the surface up.
    pub fn from_profiles(
        pressure: &[HectoPascal],
        height: &[Meters],
        temperature: &[Celsius],
        dew_point: &[Celsius],
    ) -> Result<Self, SkewTErr> {
        if pressure.is_empty() {
            return Err(SkewTErr::NotEnoughData);
        }
        if [height.len(), temperature.len(), dew_point.len()]
            .iter()
            .any(|&len| len != pressure.len())
        {
            return Err(SkewTErr::InvalidProfile("profiles have different lengths"));
        }

        let snd = sounding_analysis::Sounding::new()
            .with_pressure_profile(optioned(pressure))
            .with_height_profile(optioned(height))
            .with_temperature_profile(optioned(temperature))
            .with_dew_point_profile(optioned(dew_point));

        let parcel = Parcel {
            temperature: temperature[0],
            pressure: pressure[0],
            dew_point: dew_point[0],
        };

        let anal = sounding_analysis::lift_parcel(parcel, &snd)?;

        let level = |p: Optioned<HectoPascal>, t: Optioned<Celsius>| {
            p.into_option()
                .zip(t.into_option())
                .map(|(pressure, temperature)| Level {
                    pressure,
                    temperature,
                })
        };

        let lcl = level(anal.lcl_pressure(), anal.lcl_temperature());
        let lfc = level(anal.lfc_pressure(), anal.lfc_virt_temperature());
        let el = level(anal.el_pressure(), anal.el_temperature());

        let ascent = anal.profile();
        let profile = ascent
            .pressure
            .iter()
            .zip(&ascent.environment_t)
            .zip(&ascent.parcel_t)
            .map(|((&pressure, &environment), &parcel)| ProfilePoint {
                pressure,
                environment,
                parcel,
            })
            .collect();

        let cape = anal.cape().into_option();
        let cin = anal.cin().into_option();

        tracing::debug!(
            message = "lifted surface parcel",
            lcl = ?lcl.map(|lvl| lvl.pressure.unpack()),
            lfc = ?lfc.map(|lvl| lvl.pressure.unpack()),
            el = ?el.map(|lvl| lvl.pressure.unpack()),
            cape = ?cape.map(|val| val.unpack()),
            cin = ?cin.map(|val| val.unpack())
        );

        Ok(ParcelAnalysis {
            lcl,
            lfc,
            el,
            profile,
            cape,
            cin,
        })
    }

    /// Parcel temperature at each of `pressure`, interpolated in log-pressure along the ascent.
    ///
    /// `None` outside the range the parcel was lifted through.
    pub fn parcel_at(&self, pressure: &[HectoPascal]) -> Vec<Option<Celsius>> {
        pressure
            .iter()
            .map(|&p| {
                self.profile
                    .windows(2)
                    .find(|pair| pair[0].pressure >= p && p >= pair[1].pressure)
                    .map(|pair| interpolate_parcel(&pair[0], &pair[1], p))
            })
            .collect()
    }
}

fn optioned<T: Noned + Copy>(vals: &[T]) -> Vec<Optioned<T>> {
    vals.iter().map(|&val| some(val)).collect()
}

fn interpolate_parcel(below: &ProfilePoint, above: &ProfilePoint, p: HectoPascal) -> Celsius {
    let (p0, p1) = (below.pressure.unpack().ln(), above.pressure.unpack().ln());
    let (t0, t1) = (below.parcel.unpack(), above.parcel.unpack());

    if (p0 - p1).abs() < std::f64::EPSILON {
        return below.parcel;
    }

    Celsius(t0 + (t1 - t0) * (p.unpack().ln() - p0) / (p1 - p0))
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
