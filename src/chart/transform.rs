use metfor::{Celsius, HectoPascal, Quantity};

/// Maps pressure and temperature onto the skewed, log-pressure chart coordinates.
///
/// The vertical coordinate is `ln(1000 / p)`, zero at the bottom of the chart. The horizontal
/// coordinate is the temperature shifted right in proportion to height, so isotherms lean to the
/// right and the x value at the bottom of the chart is the temperature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkewTransform {
    /// Pressure at the bottom of the chart.
    pub bottom: HectoPascal,
    /// Pressure at the top of the chart.
    pub top: HectoPascal,
    /// Temperature at the lower left corner.
    pub left: Celsius,
    /// Temperature at the lower right corner.
    pub right: Celsius,
    /// Degrees of shift per unit of ln(p).
    pub skew: f64,
}

impl Default for SkewTransform {
    fn default() -> Self {
        SkewTransform {
            bottom: HectoPascal(1000.0),
            top: HectoPascal(100.0),
            left: Celsius(-40.0),
            right: Celsius(60.0),
            skew: 35.0,
        }
    }
}

impl SkewTransform {
    /// Chart coordinates of a pressure and temperature.
    pub fn to_chart(&self, pressure: HectoPascal, temperature: Celsius) -> (f64, f64) {
        let y = self.y(pressure);
        (temperature.unpack() + self.skew * y, y)
    }

    /// Pressure and temperature at chart coordinates.
    pub fn from_chart(&self, x: f64, y: f64) -> (HectoPascal, Celsius) {
        let pressure = HectoPascal(self.bottom.unpack() * (-y).exp());
        (pressure, Celsius(x - self.skew * y))
    }

    /// The vertical chart coordinate of a pressure.
    pub fn y(&self, pressure: HectoPascal) -> f64 {
        (self.bottom.unpack() / pressure.unpack()).ln()
    }

    /// Horizontal extent of the chart.
    pub fn x_range(&self) -> std::ops::Range<f64> {
        self.left.unpack()..self.right.unpack()
    }

    /// Vertical extent of the chart.
    pub fn y_range(&self) -> std::ops::Range<f64> {
        0.0..self.y(self.top)
    }

    /// True if the pressure is between the top and bottom of the chart, inclusive.
    pub fn in_range(&self, pressure: HectoPascal) -> bool {
        pressure <= self.bottom && pressure >= self.top
    }

    /// Log spaced pressures from the bottom to the top of the chart, for drawing curves.
    pub fn pressure_levels(&self, count: usize) -> Vec<HectoPascal> {
        let top = self.y(self.top);
        let steps = count.max(2) - 1;

        (0..=steps)
            .map(|i| {
                let y = top * i as f64 / steps as f64;
                self.from_chart(0.0, y).0
            })
            .collect()
    }
}

#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn test_bottom_of_chart_is_temperature() {
        let tx = SkewTransform::default();

        let (x, y) = tx.to_chart(HectoPascal(1000.0), Celsius(0.0));
        assert!(x.abs() < 1.0e-9);
        assert!(y.abs() < 1.0e-9);

        let (x, _) = tx.to_chart(HectoPascal(1000.0), Celsius(25.0));
        assert!((x - 25.0).abs() < 1.0e-9);
    }

    #[test]
    fn test_isotherms_lean_right() {
        let tx = SkewTransform::default();

        let (x_low, y_low) = tx.to_chart(HectoPascal(900.0), Celsius(-10.0));
        let (x_high, y_high) = tx.to_chart(HectoPascal(300.0), Celsius(-10.0));

        assert!(y_high > y_low);
        assert!(x_high > x_low);
    }

    #[test]
    fn test_from_chart_inverts_to_chart() {
        let tx = SkewTransform::default();

        let (x, y) = tx.to_chart(HectoPascal(500.0), Celsius(-20.0));
        let (p, t) = tx.from_chart(x, y);

        assert!((p.unpack() - 500.0).abs() < 1.0e-6);
        assert!((t.unpack() + 20.0).abs() < 1.0e-6);
    }

    #[test]
    fn test_pressure_levels_span_chart() {
        let tx = SkewTransform::default();
        let levels = tx.pressure_levels(10);

        assert_eq!(levels.len(), 10);
        assert!((levels[0].unpack() - 1000.0).abs() < 1.0e-6);
        assert!((levels[9].unpack() - 100.0).abs() < 1.0e-6);
        assert!(levels.windows(2).all(|pair| pair[1] < pair[0]));
    }
}
