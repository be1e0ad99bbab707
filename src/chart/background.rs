//! Reference lines drawn behind the data: isotherms, isobars, adiabats, and mixing ratio lines.

use metfor::{self, Celsius, HectoPascal, Kelvin};

use super::{clip::ClipRect, transform::SkewTransform};

type Polyline = Vec<(f64, f64)>;

/// Mixing ratios (kg/kg) of the dashed lines drawn from 1000 to 600 hPa.
const MIXING_RATIOS: [f64; 9] = [
    0.0004, 0.001, 0.002, 0.004, 0.007, 0.01, 0.016, 0.024, 0.032,
];

/// Top of the mixing ratio lines.
const MIXING_TOP: HectoPascal = HectoPascal(600.0);

/// Number of points along each curved line.
const CURVE_POINTS: usize = 60;

/// Every background line, in chart coordinates and already clipped to the chart.
#[derive(Clone, Debug, Default)]
pub(crate) struct Background {
    pub isotherms: Vec<Polyline>,
    pub isobars: Vec<Polyline>,
    pub dry_adiabats: Vec<Polyline>,
    pub moist_adiabats: Vec<Polyline>,
    pub mixing_lines: Vec<Polyline>,
}

impl Background {
    pub fn new(tx: &SkewTransform) -> Self {
        let rect = ClipRect::new(tx.x_range(), tx.y_range());
        let levels = tx.pressure_levels(CURVE_POINTS);

        let clip_all = |lines: Vec<Polyline>| -> Vec<Polyline> {
            lines
                .iter()
                .flat_map(|line| rect.polyline(line))
                .collect()
        };

        let isotherms = (-10..=5)
            .map(|i| f64::from(i) * 10.0)
            .map(|t| {
                vec![
                    tx.to_chart(tx.bottom, Celsius(t)),
                    tx.to_chart(tx.top, Celsius(t)),
                ]
            })
            .collect();

        let isobars = (1..=10)
            .map(|i| HectoPascal(f64::from(i) * 100.0))
            .filter(|&p| tx.in_range(p))
            .map(|p| {
                let y = tx.y(p);
                vec![(tx.left.0, y), (tx.right.0, y)]
            })
            .collect();

        let dry_adiabats = (-3..=20)
            .map(|i| Celsius(f64::from(i) * 10.0))
            .map(|t0| dry_adiabat(tx, &levels, t0))
            .collect();

        let moist_adiabats = (-10..=9)
            .map(|i| Celsius(f64::from(i) * 5.0))
            .filter_map(|t0| moist_adiabat(tx, &levels, t0))
            .collect();

        let mixing_lines = MIXING_RATIOS
            .iter()
            .filter_map(|&mw| mixing_line(tx, &levels, mw))
            .collect();

        Background {
            isotherms: clip_all(isotherms),
            isobars: clip_all(isobars),
            dry_adiabats: clip_all(dry_adiabats),
            moist_adiabats: clip_all(moist_adiabats),
            mixing_lines: clip_all(mixing_lines),
        }
    }
}

/// Dry adiabat through `t0` at 1000 hPa.
fn dry_adiabat(tx: &SkewTransform, levels: &[HectoPascal], t0: Celsius) -> Polyline {
    let theta: Kelvin = metfor::theta(HectoPascal(1000.0), t0);

    levels
        .iter()
        .map(|&p| tx.to_chart(p, Celsius::from(metfor::temperature_from_theta(theta, p))))
        .collect()
}

/// Saturated adiabat through `t0` at 1000 hPa, cut off where metfor can't solve for it.
fn moist_adiabat(tx: &SkewTransform, levels: &[HectoPascal], t0: Celsius) -> Option<Polyline> {
    let theta_e = metfor::theta_e(t0, t0, HectoPascal(1000.0))?;

    let line: Polyline = levels
        .iter()
        .map_while(|&p| {
            metfor::temperature_from_theta_e_saturated_and_pressure(p, theta_e)
                .map(|t| tx.to_chart(p, Celsius::from(t)))
        })
        .collect();

    if line.len() > 1 {
        Some(line)
    } else {
        None
    }
}

/// Constant mixing ratio line from the bottom of the chart up to 600 hPa.
fn mixing_line(tx: &SkewTransform, levels: &[HectoPascal], mw: f64) -> Option<Polyline> {
    let line: Polyline = levels
        .iter()
        .filter(|&&p| p >= MIXING_TOP)
        .chain(std::iter::once(&MIXING_TOP))
        .filter_map(|&p| {
            metfor::dew_point_from_p_and_mw(p, mw).map(|dp| tx.to_chart(p, Celsius::from(dp)))
        })
        .collect();

    if line.len() > 1 {
        Some(line)
    } else {
        None
    }
}

/// Break a polyline into dashes `on` long with gaps `off` long, measured in the same units as the
/// points.
pub(crate) fn dashes(line: &[(f64, f64)], on: f64, off: f64) -> Vec<Polyline> {
    let mut dashes = vec![];
    let mut current: Polyline = vec![];
    let mut drawing = true;
    let mut left = on;

    for pair in line.windows(2) {
        let (mut a, b) = (pair[0], pair[1]);
        if drawing && current.is_empty() {
            current.push(a);
        }

        let mut seg = ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
        while seg > left {
            let frac = left / seg;
            let split = (a.0 + frac * (b.0 - a.0), a.1 + frac * (b.1 - a.1));

            if drawing {
                current.push(split);
                dashes.push(std::mem::take(&mut current));
            } else {
                current.push(split);
            }

            drawing = !drawing;
            left = if drawing { on } else { off };
            seg -= ((split.0 - a.0).powi(2) + (split.1 - a.1).powi(2)).sqrt();
            a = split;
        }

        left -= seg;
        if drawing {
            current.push(b);
        } else {
            current.clear();
        }
    }

    if drawing && current.len() > 1 {
        dashes.push(current);
    }

    dashes
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn test_background_line_counts() {
        let tx = SkewTransform::default();
        let bg = Background::new(&tx);

        // 100 through 1000 hPa
        assert_eq!(bg.isobars.len(), 10);
        assert!(!bg.isotherms.is_empty());
        assert!(!bg.dry_adiabats.is_empty());
        assert!(!bg.moist_adiabats.is_empty());
        assert!(!bg.mixing_lines.is_empty());
    }

    #[test]
    fn test_background_inside_chart() {
        let tx = SkewTransform::default();
        let bg = Background::new(&tx);
        let (xr, yr) = (tx.x_range(), tx.y_range());

        let inside = |&(x, y): &(f64, f64)| {
            x >= xr.start - 1.0e-9
                && x <= xr.end + 1.0e-9
                && y >= yr.start - 1.0e-9
                && y <= yr.end + 1.0e-9
        };

        for line in bg
            .isotherms
            .iter()
            .chain(&bg.dry_adiabats)
            .chain(&bg.moist_adiabats)
            .chain(&bg.mixing_lines)
        {
            assert!(line.iter().all(inside));
        }
    }

    #[test]
    fn test_mixing_lines_stop_at_600() {
        let tx = SkewTransform::default();
        let bg = Background::new(&tx);
        let top = tx.y(MIXING_TOP);

        for line in &bg.mixing_lines {
            assert!(line.iter().all(|&(_, y)| y <= top + 1.0e-9));
        }
    }

    #[test]
    fn test_dashes() {
        let line = vec![(0.0, 0.0), (10.0, 0.0)];
        let dashes = dashes(&line, 2.0, 1.0);

        // on 0-2, 3-5, 6-8, 9-10
        assert_eq!(dashes.len(), 4);
        assert_eq!(dashes[0], vec![(0.0, 0.0), (2.0, 0.0)]);
        assert!((dashes[1][0].0 - 3.0).abs() < 1.0e-9);
        assert!((dashes[3][1].0 - 10.0).abs() < 1.0e-9);
    }
}
