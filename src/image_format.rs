//! Image formats a chart can be saved as.

use std::fmt;

use strum::AsStaticRef;

/// Image formats a chart can be saved as, keyed by file extension.
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumString, AsStaticStr, EnumIter, Hash)]
pub enum ImageFormat {
    /// Portable Network Graphics
    #[strum(to_string = "png", serialize = "PNG")]
    Png,
    /// JPEG, lossy compression
    #[strum(
        to_string = "jpg",
        serialize = "jpeg",
        serialize = "JPG",
        serialize = "JPEG"
    )]
    Jpeg,
    /// Windows bitmap
    #[strum(to_string = "bmp", serialize = "BMP")]
    Bmp,
    /// Scalable Vector Graphics, drawn with a different backend than the rest.
    #[strum(to_string = "svg", serialize = "SVG")]
    Svg,
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_static())
    }
}

impl ImageFormat {
    /// Raster formats are drawn into a pixel buffer and encoded, everything else is vector.
    pub fn is_raster(self) -> bool {
        match self {
            ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp => true,
            ImageFormat::Svg => false,
        }
    }
}

impl Default for ImageFormat {
    fn default() -> Self {
        ImageFormat::Png
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
#[cfg(test)]
mod unit {
    use super::*;

    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_from_extension() {
        assert_eq!(ImageFormat::from_str("png").unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_str("PNG").unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_str("jpeg").unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_str("jpg").unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_str("svg").unwrap(), ImageFormat::Svg);
        assert!(ImageFormat::from_str("docx").is_err());
    }

    #[test]
    fn test_default_is_png() {
        assert_eq!(ImageFormat::default(), ImageFormat::Png);
        assert_eq!(ImageFormat::default().to_string(), "png");
    }

    #[test]
    fn test_extensions_are_lower_case() {
        for fmt in ImageFormat::iter() {
            let ext = fmt.as_static();
            assert_eq!(ext, ext.to_lowercase());
        }
    }

    #[test]
    fn test_raster() {
        assert!(ImageFormat::Png.is_raster());
        assert!(!ImageFormat::Svg.is_raster());
    }
}
