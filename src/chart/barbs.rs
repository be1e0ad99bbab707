//! Wind barbs.
//!
//! Speeds are rounded to the nearest 5 knots. A pennant is 50 knots, a full barb 10, and a half
//! barb 5. Barb geometry is computed in pixels relative to the point being plotted, with y
//! increasing downward like the drawing backends.

use metfor::{Knots, Quantity};

/// Fraction of the staff length between feathers.
const SPACING: f64 = 0.15;
/// Fraction of the staff length a full barb sticks out from the staff.
const HEIGHT: f64 = 0.4;
/// Fraction of the staff length covered by the base of a pennant.
const WIDTH: f64 = 0.25;

/// Number of each kind of feather on a barb.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BarbCounts {
    /// 50 knot triangles.
    pub pennants: u32,
    /// 10 knot lines.
    pub barbs: u32,
    /// A 5 knot half line.
    pub half: bool,
}

impl BarbCounts {
    /// Break a wind speed into feathers.
    pub fn from_speed(speed: Knots) -> Self {
        let fives = (speed.unpack().abs() / 5.0).round() as u32;

        BarbCounts {
            pennants: fives / 10,
            barbs: (fives % 10) / 2,
            half: fives % 2 == 1,
        }
    }

    /// No feathers at all.
    pub fn is_calm(&self) -> bool {
        self.pennants == 0 && self.barbs == 0 && !self.half
    }
}

type Point = (f64, f64);

/// The lines and triangles that make up a barb, in pixel offsets from the plotted point.
#[derive(Clone, Debug, PartialEq)]
pub enum BarbShape {
    /// Winds under 2.5 knots are drawn as a circle.
    Calm,
    /// A staff with feathers.
    Staff {
        /// The staff from the plotted point to its tip, pointing into the wind.
        staff: (Point, Point),
        /// Filled triangles.
        pennants: Vec<[Point; 3]>,
        /// Full and half barbs.
        lines: Vec<(Point, Point)>,
    },
}

/// The wind at one level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindBarb {
    /// Eastward component.
    pub u: Knots,
    /// Northward component.
    pub v: Knots,
}

impl WindBarb {
    /// Wind speed.
    pub fn speed(&self) -> Knots {
        Knots(self.u.unpack().hypot(self.v.unpack()))
    }

    /// Lay out the barb with a staff `length` pixels long.
    pub fn shape(&self, length: f64) -> BarbShape {
        let counts = BarbCounts::from_speed(self.speed());
        if counts.is_calm() {
            return BarbShape::Calm;
        }

        // Unit vector toward where the wind comes from, flipped into screen coordinates.
        let spd = self.speed().unpack();
        let dir = (-self.u.unpack() / spd, self.v.unpack() / spd);
        // Feathers go clockwise from the staff, as seen on the page.
        let norm = (-dir.1, dir.0);

        let along = |base: Point, dist: f64| (base.0 + dir.0 * dist, base.1 + dir.1 * dist);
        let out = |base: Point, dist: f64| (base.0 + norm.0 * dist, base.1 + norm.1 * dist);

        let tip = along((0.0, 0.0), length);
        let (spacing, height, width) = (SPACING * length, HEIGHT * length, WIDTH * length);

        let mut pos = tip;
        let mut pennants = vec![];
        for _ in 0..counts.pennants {
            let base = along(pos, -width);
            pennants.push([pos, base, out(along(pos, -width / 2.0), height)]);
            pos = along(base, -spacing / 2.0);
        }

        let mut lines = vec![];
        for _ in 0..counts.barbs {
            lines.push((pos, out(along(pos, width / 2.0), height)));
            pos = along(pos, -spacing);
        }

        if counts.half {
            // A lone half barb sits a little way down the staff so it isn't read as a full barb.
            if counts.pennants == 0 && counts.barbs == 0 {
                pos = along(pos, -spacing);
            }
            lines.push((pos, out(along(pos, width / 4.0), height / 2.0)));
        }

        BarbShape::Staff {
            staff: ((0.0, 0.0), tip),
            pennants,
            lines,
        }
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn test_counts() {
        let counts = BarbCounts::from_speed(Knots(65.0));
        assert_eq!(counts.pennants, 1);
        assert_eq!(counts.barbs, 1);
        assert!(counts.half);

        assert!(BarbCounts::from_speed(Knots(2.0)).is_calm());

        let counts = BarbCounts::from_speed(Knots(3.0));
        assert_eq!(counts.pennants, 0);
        assert_eq!(counts.barbs, 0);
        assert!(counts.half);

        let counts = BarbCounts::from_speed(Knots(23.0));
        assert_eq!(counts.barbs, 2);
        assert!(counts.half);
    }

    #[test]
    fn test_calm_shape() {
        let barb = WindBarb {
            u: Knots(1.0),
            v: Knots(-1.0),
        };
        assert_eq!(barb.shape(30.0), BarbShape::Calm);
    }

    #[test]
    fn test_staff_points_into_wind() {
        // Westerly wind, blowing toward the east.
        let barb = WindBarb {
            u: Knots(20.0),
            v: Knots(0.0),
        };

        match barb.shape(30.0) {
            BarbShape::Staff {
                staff,
                pennants,
                lines,
            } => {
                assert!((staff.1 .0 + 30.0).abs() < 1.0e-9);
                assert!(staff.1 .1.abs() < 1.0e-9);
                assert!(pennants.is_empty());
                assert_eq!(lines.len(), 2);

                // Feathers on the north side, which is up the page.
                assert!(lines.iter().all(|(_, end)| end.1 < 0.0));
            }
            BarbShape::Calm => panic!("20 knots is not calm"),
        }
    }

    #[test]
    fn test_lone_half_barb_offset_from_tip() {
        let barb = WindBarb {
            u: Knots(0.0),
            v: Knots(-5.0),
        };

        match barb.shape(30.0) {
            BarbShape::Staff { staff, lines, .. } => {
                assert_eq!(lines.len(), 1);
                assert!(lines[0].0 != staff.1);
            }
            BarbShape::Calm => panic!("5 knots is not calm"),
        }
    }
}
