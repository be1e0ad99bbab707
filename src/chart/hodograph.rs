use metfor::{HectoPascal, Knots, Quantity};
use plotters::style::{
    colors::colormaps::{ColorMap, ViridisRGB},
    RGBColor,
};

use crate::sounding::Sounding;

/// Highest level plotted on the hodograph.
const HODOGRAPH_TOP: HectoPascal = HectoPascal(100.0);

/// Wind vectors from the surface up to 100 hPa, plotted tail to tail.
#[derive(Clone, Debug)]
pub struct Hodograph {
    /// The u and v axes both run from `-component_range` to `component_range`.
    pub component_range: Knots,
    /// Spacing of the grid rings.
    pub increment: Knots,
    /// (u, v, speed) at each level.
    pub points: Vec<(Knots, Knots, Knots)>,
}

impl Hodograph {
    /// Collect the winds to plot from a sounding.
    pub fn new(snd: &Sounding) -> Self {
        Hodograph {
            component_range: Knots(100.0),
            increment: Knots(20.0),
            points: snd.winds_at_or_below(HODOGRAPH_TOP),
        }
    }

    /// Radii of the grid rings.
    pub fn rings(&self) -> Vec<Knots> {
        let inc = self.increment.unpack();
        let max = self.component_range.unpack();
        if inc <= 0.0 {
            return vec![];
        }

        (1..)
            .map(|i| f64::from(i) * inc)
            .take_while(|&r| r <= max + 1.0e-9)
            .map(Knots)
            .collect()
    }

    /// Line segments between successive levels, colored by the mean speed of their end points.
    pub fn segments(&self) -> Vec<((f64, f64), (f64, f64), RGBColor)> {
        let speeds = self.points.iter().map(|&(_, _, spd)| spd.unpack());
        let min = speeds.clone().fold(f64::INFINITY, f64::min);
        let max = speeds.fold(f64::NEG_INFINITY, f64::max);

        let color = |spd: f64| -> RGBColor {
            if max > min {
                ViridisRGB.get_color_normalized(spd, min, max)
            } else {
                ViridisRGB.get_color(0.0_f64)
            }
        };

        self.points
            .windows(2)
            .map(|pair| {
                let (u0, v0, s0) = pair[0];
                let (u1, v1, s1) = pair[1];
                let mean = 0.5 * (s0.unpack() + s1.unpack());

                ((u0.unpack(), v0.unpack()), (u1.unpack(), v1.unpack()), color(mean))
            })
            .collect()
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    use crate::{sounding::unit::row, station::StationInfo};

    #[test]
    fn test_only_levels_up_to_100_hpa() {
        let snd = Sounding::from_rows(
            StationInfo::default(),
            vec![
                row(1000.0, 100.0, 20.0, 10.0, 180.0, 10.0),
                row(500.0, 5600.0, -10.0, -20.0, 250.0, 40.0),
                row(100.0, 16000.0, -60.0, -80.0, 270.0, 60.0),
                row(99.0, 16100.0, -60.0, -80.0, 270.0, 61.0),
            ],
        )
        .unwrap();

        let hodo = Hodograph::new(&snd);
        assert_eq!(hodo.points.len(), 3);
        assert_eq!(hodo.points[2].2, Knots(60.0));
        assert_eq!(hodo.segments().len(), 2);
    }

    #[test]
    fn test_rings() {
        let hodo = Hodograph {
            component_range: Knots(100.0),
            increment: Knots(20.0),
            points: vec![],
        };

        let rings: Vec<f64> = hodo.rings().into_iter().map(|r| r.unpack()).collect();
        assert_eq!(rings, vec![20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn test_segment_colors_follow_speed() {
        let snd = Sounding::from_rows(
            StationInfo::default(),
            vec![
                row(1000.0, 100.0, 20.0, 10.0, 180.0, 10.0),
                row(900.0, 1000.0, 15.0, 5.0, 200.0, 10.0),
                row(800.0, 2000.0, 10.0, 0.0, 220.0, 10.0),
                row(500.0, 5500.0, -10.0, -20.0, 250.0, 90.0),
                row(300.0, 9000.0, -40.0, -50.0, 260.0, 90.0),
            ],
        )
        .unwrap();

        let segments = Hodograph::new(&snd).segments();
        assert_eq!(segments.len(), 4);

        let slowest: RGBColor = ViridisRGB.get_color(0.0_f64);
        let fastest: RGBColor = ViridisRGB.get_color(1.0_f64);
        assert_eq!(segments[0].2, slowest);
        assert_eq!(segments[3].2, fastest);
        assert_ne!(segments[2].2, slowest);
        assert_ne!(segments[2].2, fastest);
    }

    #[test]
    fn test_calm_segments_one_color() {
        let snd = Sounding::from_rows(
            StationInfo::default(),
            vec![
                row(1000.0, 100.0, 20.0, 10.0, 180.0, 10.0),
                row(900.0, 1000.0, 15.0, 5.0, 270.0, 10.0),
                row(800.0, 2000.0, 10.0, 0.0, 360.0, 10.0),
            ],
        )
        .unwrap();

        let segments = Hodograph::new(&snd).segments();
        assert!(segments.iter().all(|seg| seg.2 == segments[0].2));
    }
}
