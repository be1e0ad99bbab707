use metfor::{Celsius, HectoPascal, Quantity};
use plotters::{
    coord::{cartesian::Cartesian2d, types::RangedCoordf64, Shift},
    prelude::*,
};
use std::ops::Range;

use super::{
    background::dashes,
    barbs::BarbShape,
    clip::ClipRect,
    figure::{AreaKind, ReferenceKind, SkewTFigure},
    transform::SkewTransform,
};
use crate::errors::SkewTErr;

type SkewChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const TEMPERATURE: RGBColor = RGBColor(214, 39, 40);
const DEW_POINT: RGBColor = RGBColor(0, 0, 255);
const PARCEL: RGBColor = BLACK;
const LCL_LINE: RGBColor = BLACK;
const LFC_LINE: RGBColor = RGBColor(179, 179, 179);
const ZERO_ISOTHERM: RGBColor = RGBColor(0, 191, 191);
const GRID: RGBColor = RGBColor(217, 217, 217);
const DRY_ADIABAT: RGBColor = RGBColor(255, 0, 0);
const MOIST_ADIABAT: RGBColor = RGBColor(0, 0, 255);
const MIXING_LINE: RGBColor = RGBColor(0, 128, 0);
const CAPE_FILL: RGBColor = RGBColor(214, 39, 40);
const CIN_FILL: RGBColor = RGBColor(31, 119, 180);

/// Staff length of the wind barbs in pixels.
const BARB_LENGTH: f64 = 25.0;
/// Fraction of the plot area covered by the hodograph inset.
const INSET_FRACTION: f64 = 0.3;
/// Gap in pixels between the inset and the edge of the plot area.
const INSET_PAD: i32 = 30;

const FONT: &str = "sans-serif";

/// Where the chart landed on the drawing backend, in backend pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartFrame {
    /// Horizontal pixel range of the plot area.
    pub x_px: Range<i32>,
    /// Vertical pixel range of the plot area.
    pub y_px: Range<i32>,
    /// Mapping used to draw the chart.
    pub transform: SkewTransform,
}

impl ChartFrame {
    /// The pressure and temperature under a pixel, `None` outside the plot area.
    pub fn data_at(&self, px: i32, py: i32) -> Option<(HectoPascal, Celsius)> {
        if !self.x_px.contains(&px) || !self.y_px.contains(&py) {
            return None;
        }

        let xr = self.transform.x_range();
        let yr = self.transform.y_range();

        let width = (self.x_px.end - self.x_px.start - 1).max(1);
        let height = (self.y_px.end - self.y_px.start - 1).max(1);
        let fx = f64::from(px - self.x_px.start) / f64::from(width);
        let fy = f64::from(py - self.y_px.start) / f64::from(height);

        let x = xr.start + fx * (xr.end - xr.start);
        // Pixel rows count down from the top, chart y counts up from the bottom.
        let y = yr.end - fy * (yr.end - yr.start);

        Some(self.transform.from_chart(x, y))
    }
}

impl SkewTFigure {
    /// Draw the figure filling `root`.
    pub fn draw<DB>(&self, root: &DrawingArea<DB, Shift>) -> Result<ChartFrame, SkewTErr>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let tx = self.transform;
        let rect = ClipRect::new(tx.x_range(), tx.y_range());

        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, (FONT, 22))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(tx.x_range(), tx.y_range())?;

        chart
            .configure_mesh()
            .disable_mesh()
            .disable_y_axis()
            .x_labels(11)
            .x_label_formatter(&|t| format!("{:.0}", t))
            .x_desc("Temperature (C)")
            .label_style((FONT, 14))
            .draw()?;

        let (x_px, y_px) = chart.plotting_area().get_pixel_range();
        let base = root.get_base_pixel();

        //
        // Background
        //
        let bg = &self.background;
        chart.draw_series(
            bg.isotherms
                .iter()
                .chain(&bg.isobars)
                .map(|line| PathElement::new(line.clone(), GRID.stroke_width(1))),
        )?;

        for (lines, color) in &[
            (&bg.dry_adiabats, DRY_ADIABAT.mix(0.5)),
            (&bg.moist_adiabats, MOIST_ADIABAT.mix(0.5)),
            (&bg.mixing_lines, MIXING_LINE.mix(0.8)),
        ] {
            for line in lines.iter() {
                draw_dashed(root, &chart, line, color.stroke_width(1))?;
            }
        }

        //
        // Shading goes under the profiles.
        //
        chart.draw_series(self.shaded.iter().map(|area| {
            let fill = match area.kind {
                AreaKind::Cape => CAPE_FILL.mix(0.3),
                AreaKind::Cin => CIN_FILL.mix(0.3),
            };
            Polygon::new(area.outline.clone(), fill.filled())
        }))?;

        //
        // Profiles
        //
        for (profile, style) in &[
            (&self.temperature, TEMPERATURE.stroke_width(2)),
            (&self.dew_point, DEW_POINT.stroke_width(2)),
            (&self.parcel, PARCEL.stroke_width(2)),
        ] {
            for piece in rect.polyline(profile) {
                chart.draw_series(LineSeries::new(piece, *style))?;
            }
        }

        //
        // Reference lines
        //
        let xr = tx.x_range();
        for line in &self.reference_lines {
            if !tx.in_range(line.level.pressure) {
                continue;
            }

            let color = match line.kind {
                ReferenceKind::Lcl => LCL_LINE,
                ReferenceKind::Lfc => LFC_LINE,
            };
            let y = tx.y(line.level.pressure);
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(xr.start, y), (xr.end, y)],
                color.stroke_width(1),
            )))?;
        }

        let zero = [
            tx.to_chart(tx.bottom, Celsius(0.0)),
            tx.to_chart(tx.top, Celsius(0.0)),
        ];
        for piece in rect.polyline(&zero) {
            draw_dashed(root, &chart, &piece, ZERO_ISOTHERM.stroke_width(2))?;
        }

        chart.plotting_area().draw(&Rectangle::new(
            [(xr.start, 0.0), (xr.end, tx.y(tx.top))],
            BLACK.stroke_width(1),
        ))?;

        //
        // Labels
        //
        for p in (1..=10).map(|i| HectoPascal(f64::from(i) * 100.0)) {
            let (px, py) = chart.backend_coord(&(xr.start, tx.y(p)));
            root.draw(&Text::new(
                format!("{:.0}", p.unpack()),
                (px - 40 - base.0, py - 7 - base.1),
                (FONT, 14),
            ))?;
        }

        let (px, py) = chart.backend_coord(&(xr.start, tx.y(tx.bottom)));
        root.draw(&Text::new(
            self.summary(),
            (px + 5 - base.0, py - 20 - base.1),
            (FONT, 13),
        ))?;
        if !self.station.is_empty() {
            root.draw(&Text::new(
                self.station.as_str(),
                (px + 5 - base.0, py - 38 - base.1),
                (FONT, 13),
            ))?;
        }

        //
        // Wind barbs along the right edge.
        //
        for (p, barb) in &self.barbs {
            let (px, py) = chart.backend_coord(&(xr.end, tx.y(*p)));
            let at = |(dx, dy): (f64, f64)| {
                (
                    px - base.0 + dx.round() as i32,
                    py - base.1 + dy.round() as i32,
                )
            };

            match barb.shape(BARB_LENGTH) {
                BarbShape::Calm => {
                    root.draw(&Circle::new(at((0.0, 0.0)), 3, BLACK.stroke_width(1)))?;
                }
                BarbShape::Staff {
                    staff,
                    pennants,
                    lines,
                } => {
                    root.draw(&PathElement::new(
                        vec![at(staff.0), at(staff.1)],
                        BLACK.stroke_width(1),
                    ))?;
                    for tri in &pennants {
                        root.draw(&Polygon::new(
                            tri.iter().map(|&pnt| at(pnt)).collect::<Vec<_>>(),
                            BLACK.filled(),
                        ))?;
                    }
                    for (start, end) in &lines {
                        root.draw(&PathElement::new(
                            vec![at(*start), at(*end)],
                            BLACK.stroke_width(1),
                        ))?;
                    }
                }
            }
        }

        self.draw_hodograph(root, (&x_px, &y_px))?;

        Ok(ChartFrame { x_px, y_px, transform: tx })
    }

    /// The hodograph inset in the upper right corner of the plot area.
    fn draw_hodograph<DB>(
        &self,
        root: &DrawingArea<DB, Shift>,
        (x_px, y_px): (&Range<i32>, &Range<i32>),
    ) -> Result<(), SkewTErr>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let base = root.get_base_pixel();
        let width = x_px.end - x_px.start;
        let height = y_px.end - y_px.start;
        let size = (f64::from(width.min(height)) * INSET_FRACTION).round() as i32;
        if size <= 2 * INSET_PAD {
            return Ok(());
        }

        let left = x_px.end - base.0 - INSET_PAD - size;
        let top = y_px.start - base.1 + INSET_PAD;
        let inset = root.clone().shrink((left, top), (size, size));
        inset.fill(&WHITE)?;

        let hodo = &self.hodograph;
        let range = hodo.component_range.unpack();
        let mut chart = ChartBuilder::on(&inset)
            .margin(2)
            .build_cartesian_2d(-range..range, -range..range)?;

        let rect = ClipRect::new(-range..range, -range..range);

        chart.draw_series(hodo.rings().into_iter().map(|radius| {
            let radius = radius.unpack();
            let ring: Vec<(f64, f64)> = (0..=72)
                .map(|i| f64::from(i) * 5.0_f64.to_radians())
                .map(|theta| (radius * theta.cos(), radius * theta.sin()))
                .collect();
            PathElement::new(ring, GRID.stroke_width(1))
        }))?;

        chart.draw_series(
            [
                vec![(-range, 0.0), (range, 0.0)],
                vec![(0.0, -range), (0.0, range)],
            ]
            .iter()
            .map(|axis| PathElement::new(axis.clone(), BLACK.mix(0.5).stroke_width(1))),
        )?;

        for (start, end, color) in hodo.segments() {
            for piece in rect.polyline(&[start, end]) {
                chart.draw_series(std::iter::once(PathElement::new(
                    piece,
                    color.stroke_width(2),
                )))?;
            }
        }

        chart.plotting_area().draw(&Rectangle::new(
            [(-range, -range), (range, range)],
            BLACK.stroke_width(1),
        ))?;

        Ok(())
    }
}

/// Draw a chart line as dashes of a fixed pixel length.
fn draw_dashed<DB>(
    root: &DrawingArea<DB, Shift>,
    chart: &SkewChart<DB>,
    line: &[(f64, f64)],
    style: ShapeStyle,
) -> Result<(), SkewTErr>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let base = root.get_base_pixel();
    let pixels: Vec<(f64, f64)> = line
        .iter()
        .map(|pnt| {
            let (px, py) = chart.backend_coord(pnt);
            (f64::from(px - base.0), f64::from(py - base.1))
        })
        .collect();

    for dash in dashes(&pixels, 6.0, 4.0) {
        let dash: Vec<(i32, i32)> = dash
            .iter()
            .map(|&(x, y)| (x.round() as i32, y.round() as i32))
            .collect();
        root.draw(&PathElement::new(dash, style))?;
    }

    Ok(())
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    fn frame() -> ChartFrame {
        ChartFrame {
            x_px: 100..301,
            y_px: 50..251,
            transform: SkewTransform::default(),
        }
    }

    #[test]
    fn test_data_at_corners() {
        let frame = frame();

        let (p, t) = frame.data_at(100, 250).unwrap();
        assert!((p.unpack() - 1000.0).abs() < 1.0e-6);
        assert!((t.unpack() + 40.0).abs() < 1.0e-6);

        let (p, _) = frame.data_at(300, 50).unwrap();
        assert!((p.unpack() - 100.0).abs() < 1.0e-6);
    }

    #[test]
    fn test_data_at_outside() {
        let frame = frame();

        assert!(frame.data_at(99, 100).is_none());
        assert!(frame.data_at(150, 251).is_none());
    }
}
