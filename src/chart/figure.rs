use chrono::NaiveDateTime;
use itertools::izip;
use metfor::{Celsius, HectoPascal, JpKg, Knots, Quantity};

use super::{
    background::Background, barbs::WindBarb, clip::ClipRect, hodograph::Hodograph,
    transform::SkewTransform,
};
use crate::{
    errors::SkewTErr,
    sounding::Sounding,
    station::StationId,
    thermo::{Level, ParcelAnalysis, ProfilePoint},
};

/// Buoyancy smaller than this is treated as a crossing.
const NEUTRAL: f64 = 1.0e-6;

/// Which parcel level a horizontal reference line marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Lifted condensation level, drawn in black.
    Lcl,
    /// Level of free convection, drawn in grey.
    Lfc,
}

/// A horizontal line across the chart at a parcel level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceLine {
    /// The level marked.
    pub kind: ReferenceKind,
    /// Where it is.
    pub level: Level,
}

/// Sign of a shaded region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AreaKind {
    /// Parcel warmer than the environment.
    Cape,
    /// Parcel cooler than the environment.
    Cin,
}

/// A region between the parcel path and the environment, as a closed outline in chart
/// coordinates clipped to the chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ShadedArea {
    /// Positive or negative area.
    pub kind: AreaKind,
    /// Polygon outline, parcel side first going up then the environment side coming down.
    pub outline: Vec<(f64, f64)>,
}

/// The observed values at one level, shown when hovering over the chart.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Readout {
    pressure: HectoPascal,
    temperature: Celsius,
    dew_point: Celsius,
    parcel: Option<Celsius>,
    wind_speed: Knots,
}

/// Everything drawn on a Skew-T, laid out in chart coordinates.
#[derive(Clone, Debug)]
pub struct SkewTFigure {
    /// Station and time.
    pub title: String,
    /// Name, location, and elevation of the station as reported with the data, may be empty.
    pub station: String,
    /// Mapping from pressure and temperature to chart coordinates.
    pub transform: SkewTransform,
    /// Environmental temperature profile.
    pub temperature: Vec<(f64, f64)>,
    /// Environmental dew point profile.
    pub dew_point: Vec<(f64, f64)>,
    /// Path of the surface parcel, in virtual temperature.
    pub parcel: Vec<(f64, f64)>,
    /// LCL, LFC, EL, CAPE, and CIN of the surface parcel.
    pub analysis: ParcelAnalysis,
    /// Lines at the LCL and LFC, when they exist.
    pub reference_lines: Vec<ReferenceLine>,
    /// CAPE and CIN shading.
    pub shaded: Vec<ShadedArea>,
    /// Wind at every level on the chart.
    pub barbs: Vec<(HectoPascal, WindBarb)>,
    /// Hodograph inset.
    pub hodograph: Hodograph,
    pub(crate) background: Background,
    readouts: Vec<Readout>,
}

impl SkewTFigure {
    /// Lift the surface parcel and lay out every layer of the chart.
    pub fn compose(
        snd: &Sounding,
        station: &StationId,
        time: NaiveDateTime,
    ) -> Result<Self, SkewTErr> {
        let transform = SkewTransform::default();
        let analysis = ParcelAnalysis::surface_parcel(snd)?;

        let pressure = snd.pressure_profile();
        let to_chart = |t: &[Celsius]| -> Vec<(f64, f64)> {
            izip!(pressure, t)
                .map(|(&p, &t)| transform.to_chart(p, t))
                .collect()
        };

        let temperature = to_chart(snd.temperature_profile());
        let dew_point = to_chart(snd.dew_point_profile());
        let parcel = analysis
            .profile
            .iter()
            .map(|pt| transform.to_chart(pt.pressure, pt.parcel))
            .collect();

        let reference_lines = analysis
            .lcl
            .map(|level| ReferenceLine {
                kind: ReferenceKind::Lcl,
                level,
            })
            .into_iter()
            .chain(analysis.lfc.map(|level| ReferenceLine {
                kind: ReferenceKind::Lfc,
                level,
            }))
            .collect();

        let shaded = shaded_areas(&analysis.profile, &transform);

        let barbs = snd
            .rows()
            .filter(|row| transform.in_range(row.pressure))
            .map(|row| {
                (
                    row.pressure,
                    WindBarb {
                        u: row.u_wind,
                        v: row.v_wind,
                    },
                )
            })
            .collect();

        let readouts = izip!(snd.rows(), analysis.parcel_at(pressure))
            .map(|(row, parcel)| Readout {
                pressure: row.pressure,
                temperature: row.temperature,
                dew_point: row.dew_point,
                parcel,
                wind_speed: row.wind_speed,
            })
            .collect();

        let title = format!("{} {}", station, time.format("%Y-%m-%d %HZ"));

        tracing::debug!(
            message = "composed figure",
            title = %title,
            reference_lines = ?reference_lines,
            shaded_areas = shaded.len()
        );

        Ok(SkewTFigure {
            title,
            station: snd.station_info().to_string(),
            transform,
            temperature,
            dew_point,
            parcel,
            analysis,
            reference_lines,
            shaded,
            barbs,
            hodograph: Hodograph::new(snd),
            background: Background::new(&transform),
            readouts,
        })
    }

    /// The reference line of a kind, if the level exists.
    pub fn reference_line(&self, kind: ReferenceKind) -> Option<&ReferenceLine> {
        self.reference_lines.iter().find(|line| line.kind == kind)
    }

    /// Describe the observation nearest to `pressure`, shown when hovering over the chart.
    pub fn identify(&self, pressure: HectoPascal) -> String {
        let distance = |rd: &Readout| (rd.pressure.unpack() - pressure.unpack()).abs();

        let nearest = self.readouts.iter().min_by(|a, b| {
            distance(a)
                .partial_cmp(&distance(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        match nearest {
            Some(rd) => {
                let parcel = rd
                    .parcel
                    .map(|t| format!("  Tp {:.1}C", t.unpack()))
                    .unwrap_or_default();

                format!(
                    "{:.0} hPa  T {:.1}C  Td {:.1}C{}  {:.0} kt",
                    rd.pressure.unpack(),
                    rd.temperature.unpack(),
                    rd.dew_point.unpack(),
                    parcel,
                    rd.wind_speed.unpack()
                )
            }
            None => String::new(),
        }
    }

    /// One line summary of the parcel analysis.
    pub fn summary(&self) -> String {
        let level = |lvl: Option<Level>| match lvl {
            Some(lvl) => format!("{:.0} hPa", lvl.pressure.unpack()),
            None => "none".to_owned(),
        };

        let energy = |val: Option<JpKg>| match val {
            Some(val) => format!("{:.0} J/kg", val.unpack()),
            None => "none".to_owned(),
        };

        format!(
            "LCL {}  LFC {}  EL {}  CAPE {}  CIN {}",
            level(self.analysis.lcl),
            level(self.analysis.lfc),
            level(self.analysis.el),
            energy(self.analysis.cape),
            energy(self.analysis.cin)
        )
    }
}

fn sign(buoyancy: f64) -> i8 {
    if buoyancy > NEUTRAL {
        1
    } else if buoyancy < -NEUTRAL {
        -1
    } else {
        0
    }
}

/// Split the profile where the parcel crosses the environment and outline each piece.
fn shaded_areas(points: &[ProfilePoint], tx: &SkewTransform) -> Vec<ShadedArea> {
    let rect = ClipRect::new(tx.x_range(), tx.y_range());
    let mut areas = vec![];

    let mut finish = |run: &[ProfilePoint], run_sign: i8| {
        let kind = match run_sign {
            1 => AreaKind::Cape,
            -1 => AreaKind::Cin,
            _ => return,
        };
        if run.len() < 2 {
            return;
        }

        let parcel_side = run.iter().map(|pt| tx.to_chart(pt.pressure, pt.parcel));
        let env_side = run.iter().rev().map(|pt| tx.to_chart(pt.pressure, pt.environment));
        let outline: Vec<(f64, f64)> = parcel_side.chain(env_side).collect();

        let outline = rect.polygon(&outline);
        if outline.len() >= 3 {
            areas.push(ShadedArea { kind, outline });
        }
    };

    let mut run: Vec<ProfilePoint> = vec![];
    let mut run_sign = 0;
    for &pt in points {
        match sign(pt.buoyancy()) {
            0 => {
                run.push(pt);
                finish(&run, run_sign);
                run = vec![pt];
                run_sign = 0;
            }
            s if run_sign == 0 || s == run_sign => {
                run.push(pt);
                run_sign = s;
            }
            s => {
                finish(&run, run_sign);
                run = vec![pt];
                run_sign = s;
            }
        }
    }
    finish(&run, run_sign);

    areas
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    use crate::thermo::unit::{stable_sounding, unstable_sounding};
    use chrono::NaiveDate;

    fn time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_stable_figure_has_no_lfc_line() {
        let snd = stable_sounding();
        let fig = SkewTFigure::compose(&snd, &StationId::default(), time()).unwrap();

        assert!(fig.reference_line(ReferenceKind::Lcl).is_some());
        assert!(fig.reference_line(ReferenceKind::Lfc).is_none());
        assert!(fig.shaded.iter().all(|area| area.kind == AreaKind::Cin));
        assert_eq!(fig.title, "OUN 2020-01-01 12Z");
        assert!(fig.summary().contains("LFC none"));
        assert_eq!(fig.station, "");
    }

    #[test]
    fn test_unstable_figure() {
        let snd = unstable_sounding();
        let fig = SkewTFigure::compose(&snd, &StationId::default(), time()).unwrap();

        assert!(fig.reference_line(ReferenceKind::Lcl).is_some());
        assert!(fig.reference_line(ReferenceKind::Lfc).is_some());

        assert!(fig.shaded.iter().any(|area| area.kind == AreaKind::Cape));
        assert_eq!(fig.temperature.len(), snd.len());
        assert_eq!(fig.parcel.len(), fig.analysis.profile.len());
        assert!(fig.summary().contains("CAPE") && !fig.summary().contains("CAPE none"));
        assert_eq!(fig.barbs.len(), snd.len());
        assert_eq!(fig.hodograph.points.len(), snd.len());
    }

    #[test]
    fn test_identify_nearest_level() {
        let snd = unstable_sounding();
        let fig = SkewTFigure::compose(&snd, &StationId::default(), time()).unwrap();

        let text = fig.identify(HectoPascal(510.0));
        assert!(text.starts_with("500 hPa"));
        assert!(text.contains("T -14.0C"));
        assert!(text.contains("Tp "));
        assert!(text.ends_with("50 kt"));
    }

    #[test]
    fn test_station_line_from_sounding() {
        use crate::station::StationInfo;
        use metfor::Meters;

        let info = StationInfo {
            id: Some("OUN".to_owned()),
            name: Some("Norman".to_owned()),
            station_num: Some(72357),
            elevation: Some(Meters(357.0)),
            ..StationInfo::default()
        };
        let snd = Sounding::from_rows(info, unstable_sounding().rows()).unwrap();

        let fig = SkewTFigure::compose(&snd, &StationId::default(), time()).unwrap();
        assert_eq!(fig.station, "Norman (72357)  357 m");
    }

    #[test]
    fn test_shaded_areas_split_at_crossings() {
        let tx = SkewTransform::default();
        let pt = |p: f64, env: f64, parcel: f64| ProfilePoint {
            pressure: HectoPascal(p),
            environment: Celsius(env),
            parcel: Celsius(parcel),
        };

        let points = vec![
            pt(1000.0, 20.0, 20.0),
            pt(900.0, 16.0, 14.0),
            pt(800.0, 8.0, 8.0),
            pt(700.0, 0.0, 3.0),
            pt(600.0, -9.0, -6.0),
            pt(500.0, -18.0, -18.0),
        ];

        let areas = shaded_areas(&points, &tx);
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].kind, AreaKind::Cin);
        assert_eq!(areas[1].kind, AreaKind::Cape);
    }
}
