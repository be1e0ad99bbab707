//! Clip lines and polygons to the chart so nothing is drawn over the axes.

use std::ops::Range;

/// An axis aligned rectangle in chart coordinates.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ClipRect {
    pub x: Range<f64>,
    pub y: Range<f64>,
}

impl ClipRect {
    pub fn new(x: Range<f64>, y: Range<f64>) -> Self {
        ClipRect { x, y }
    }

    fn contains(&self, (x, y): (f64, f64)) -> bool {
        x >= self.x.start && x <= self.x.end && y >= self.y.start && y <= self.y.end
    }

    /// Clip a polyline, which may break it into several pieces.
    pub fn polyline(&self, points: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
        let mut pieces: Vec<Vec<(f64, f64)>> = vec![];
        let mut current: Vec<(f64, f64)> = vec![];

        for pair in points.windows(2) {
            match self.segment(pair[0], pair[1]) {
                Some((a, b)) => {
                    if current.last() != Some(&a) {
                        if current.len() > 1 {
                            pieces.push(std::mem::take(&mut current));
                        }
                        current.clear();
                        current.push(a);
                    }
                    current.push(b);
                }
                None => {
                    if current.len() > 1 {
                        pieces.push(std::mem::take(&mut current));
                    }
                    current.clear();
                }
            }
        }

        if current.len() > 1 {
            pieces.push(current);
        }

        pieces
    }

    /// Liang-Barsky clipping of one segment.
    fn segment(&self, a: (f64, f64), b: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let mut t0 = 0.0f64;
        let mut t1 = 1.0f64;

        for (p, q) in [
            (-dx, a.0 - self.x.start),
            (dx, self.x.end - a.0),
            (-dy, a.1 - self.y.start),
            (dy, self.y.end - a.1),
        ]
        .iter()
        {
            if *p == 0.0 {
                if *q < 0.0 {
                    return None;
                }
            } else {
                let r = q / p;
                if *p < 0.0 {
                    t0 = t0.max(r);
                } else {
                    t1 = t1.min(r);
                }
            }
        }

        if t0 > t1 {
            return None;
        }

        let at = |t: f64| (a.0 + t * dx, a.1 + t * dy);
        Some((at(t0), at(t1)))
    }

    /// Sutherland-Hodgman clipping of a closed polygon. The result may be empty.
    pub fn polygon(&self, points: &[(f64, f64)]) -> Vec<(f64, f64)> {
        type Inside = fn(&ClipRect, (f64, f64)) -> bool;
        type Intersect = fn(&ClipRect, (f64, f64), (f64, f64)) -> (f64, f64);

        fn cross_x(a: (f64, f64), b: (f64, f64), x: f64) -> (f64, f64) {
            let t = (x - a.0) / (b.0 - a.0);
            (x, a.1 + t * (b.1 - a.1))
        }

        fn cross_y(a: (f64, f64), b: (f64, f64), y: f64) -> (f64, f64) {
            let t = (y - a.1) / (b.1 - a.1);
            (a.0 + t * (b.0 - a.0), y)
        }

        let edges: [(Inside, Intersect); 4] = [
            (|r, p| p.0 >= r.x.start, |r, a, b| cross_x(a, b, r.x.start)),
            (|r, p| p.0 <= r.x.end, |r, a, b| cross_x(a, b, r.x.end)),
            (|r, p| p.1 >= r.y.start, |r, a, b| cross_y(a, b, r.y.start)),
            (|r, p| p.1 <= r.y.end, |r, a, b| cross_y(a, b, r.y.end)),
        ];

        let mut output = points.to_vec();
        for (inside, intersect) in edges.iter() {
            let input = std::mem::take(&mut output);
            let prev_points = input.iter().cycle().skip(input.len().saturating_sub(1));

            for (&cur, &prev) in input.iter().zip(prev_points) {
                match (inside(self, cur), inside(self, prev)) {
                    (true, true) => output.push(cur),
                    (true, false) => {
                        output.push(intersect(self, prev, cur));
                        output.push(cur);
                    }
                    (false, true) => output.push(intersect(self, prev, cur)),
                    (false, false) => {}
                }
            }
        }

        output
    }

    /// True if any of the points are in the rectangle.
    pub fn any_inside(&self, points: &[(f64, f64)]) -> bool {
        points.iter().any(|&pnt| self.contains(pnt))
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    fn unit_square() -> ClipRect {
        ClipRect::new(0.0..1.0, 0.0..1.0)
    }

    #[test]
    fn test_polyline_inside_untouched() {
        let line = vec![(0.1, 0.1), (0.5, 0.5), (0.9, 0.2)];
        assert_eq!(unit_square().polyline(&line), vec![line]);
    }

    #[test]
    fn test_polyline_crossing_out_and_back_splits() {
        let line = vec![(0.5, 0.5), (1.5, 0.5), (0.5, 0.6)];
        let pieces = unit_square().polyline(&line);

        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0], vec![(0.5, 0.5), (1.0, 0.5)]);
        assert!((pieces[1][0].0 - 1.0).abs() < 1.0e-12);
    }

    #[test]
    fn test_polyline_outside_dropped() {
        let line = vec![(2.0, 2.0), (3.0, 3.0)];
        assert!(unit_square().polyline(&line).is_empty());
    }

    #[test]
    fn test_polygon_clipped_to_rect() {
        let square = vec![(-1.0, -1.0), (0.5, -1.0), (0.5, 0.5), (-1.0, 0.5)];
        let clipped = unit_square().polygon(&square);

        assert!(!clipped.is_empty());
        assert!(clipped
            .iter()
            .all(|&(x, y)| x >= 0.0 && x <= 0.5 && y >= 0.0 && y <= 0.5));
    }

    #[test]
    fn test_polygon_outside_is_empty() {
        let square = vec![(2.0, 2.0), (3.0, 2.0), (3.0, 3.0)];
        assert!(unit_square().polygon(&square).is_empty());
    }
}
