//! Show a figure in a window until it is closed.
//!
//! Moving the mouse over the chart shows the nearest observation in the title bar.

use crate::{chart::SkewTFigure, errors::SkewTErr};

#[cfg(feature = "viewer")]
pub use self::window::show;

/// Show a figure in a window. This build has no window support, so it always fails.
#[cfg(not(feature = "viewer"))]
pub fn show(_fig: &SkewTFigure) -> Result<(), SkewTErr> {
    Err(SkewTErr::ViewerUnavailable)
}

#[cfg(feature = "viewer")]
mod window {
    use minifb::{Key, MouseMode, Window, WindowOptions};
    use std::time::Duration;

    use super::*;
    use crate::chart::{render_rgb, FIGURE_SIZE};

    /// About 60 frames per second.
    const FRAME_TIME: Duration = Duration::from_micros(16_600);

    /// Show a figure in a window, returns when the window is closed or escape is pressed.
    pub fn show(fig: &SkewTFigure) -> Result<(), SkewTErr> {
        let (width, height) = (FIGURE_SIZE.0 as usize, FIGURE_SIZE.1 as usize);

        let mut rgb = vec![0u8; width * height * 3];
        let frame = render_rgb(fig, &mut rgb)?;
        let pixels = pack_pixels(&rgb);

        let mut window = Window::new(&fig.title, width, height, WindowOptions::default())?;
        window.limit_update_rate(Some(FRAME_TIME));

        let mut title = fig.title.clone();
        while window.is_open() && !window.is_key_down(Key::Escape) {
            let hover = window
                .get_mouse_pos(MouseMode::Discard)
                .and_then(|(x, y)| frame.data_at(x.round() as i32, y.round() as i32))
                .map(|(pressure, _)| format!("{}  {}", fig.title, fig.identify(pressure)))
                .unwrap_or_else(|| fig.title.clone());

            if hover != title {
                window.set_title(&hover);
                title = hover;
            }

            window.update_with_buffer(&pixels, width, height)?;
        }

        tracing::debug!(message = "window closed");

        Ok(())
    }

    /// Pack RGB bytes into the 0RGB words minifb wants.
    pub(super) fn pack_pixels(rgb: &[u8]) -> Vec<u32> {
        rgb.chunks_exact(3)
            .map(|px| (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2]))
            .collect()
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    #[cfg(feature = "viewer")]
    #[test]
    fn test_pack_pixels() {
        let rgb = [255, 0, 0, 0, 128, 1];
        assert_eq!(
            super::window::pack_pixels(&rgb),
            vec![0x00ff_0000, 0x0000_8001]
        );
    }

    #[cfg(not(feature = "viewer"))]
    #[test]
    fn test_no_viewer() {
        use crate::{chart::SkewTFigure, station::StationId, thermo::unit::stable_sounding};
        use chrono::NaiveDate;

        let snd = stable_sounding();
        let time = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let fig = SkewTFigure::compose(&snd, &StationId::default(), time).unwrap();

        assert!(super::show(&fig).is_err());
    }
}
