use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, OverlayResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
            1.0,
        )
    }

    /// Parses `#RGB` or `#RRGGBB`.
    pub fn from_hex(input: &str) -> OverlayResult<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        let channel = |range: std::ops::Range<usize>, repeat: bool| -> OverlayResult<u8> {
            let raw = digits
                .get(range)
                .ok_or_else(|| OverlayError::InvalidData(format!("invalid hex color `{input}`")))?;
            let value = u8::from_str_radix(raw, 16)
                .map_err(|_| OverlayError::InvalidData(format!("invalid hex color `{input}`")))?;
            Ok(if repeat { value * 17 } else { value })
        };
        match digits.len() {
            3 => Ok(Self::from_rgb8(
                channel(0..1, true)?,
                channel(1..2, true)?,
                channel(2..3, true)?,
            )),
            6 => Ok(Self::from_rgb8(
                channel(0..2, false)?,
                channel(2..4, false)?,
                channel(4..6, false)?,
            )),
            _ => Err(OverlayError::InvalidData(format!(
                "invalid hex color `{input}`"
            ))),
        }
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Fill and border styling applied to one region polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionStyle {
    pub fill_color: Color,
    pub fill_opacity: f64,
    pub border_color: Color,
    pub border_opacity: f64,
    pub weight: f64,
}

impl RegionStyle {
    #[must_use]
    pub fn base(fill_color: Color) -> Self {
        Self {
            fill_color,
            fill_opacity: 0.7,
            border_color: Color::from_rgb8(0x66, 0x66, 0x66),
            border_opacity: 1.0,
            weight: 1.5,
        }
    }

    /// Hover emphasis: heavier, darker border and denser fill.
    #[must_use]
    pub fn highlighted(self) -> Self {
        Self {
            fill_opacity: 0.85,
            border_color: Color::from_rgb8(0x22, 0x22, 0x22),
            weight: 3.0,
            ..self
        }
    }
}

/// Step scale from latest rate to fill color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoroplethPalette {
    /// `(threshold, color)` pairs in descending threshold order; a rate strictly
    /// above a threshold takes its color.
    stops: Vec<(f64, Color)>,
    floor: Color,
}

impl Default for ChoroplethPalette {
    fn default() -> Self {
        Self {
            stops: vec![
                (4.0, Color::from_rgb8(0x80, 0x00, 0x26)),
                (3.0, Color::from_rgb8(0xBD, 0x00, 0x26)),
                (2.5, Color::from_rgb8(0xE3, 0x1A, 0x1C)),
                (2.0, Color::from_rgb8(0xFC, 0x4E, 0x2A)),
                (1.8, Color::from_rgb8(0xFD, 0x8D, 0x3C)),
                (1.5, Color::from_rgb8(0xFE, 0xB2, 0x4C)),
                (1.2, Color::from_rgb8(0xFE, 0xD9, 0x76)),
            ],
            floor: Color::from_rgb8(0xFF, 0xFF, 0xCC),
        }
    }
}

impl ChoroplethPalette {
    /// Builds a palette from arbitrary-order stops.
    pub fn new(mut stops: Vec<(f64, Color)>, floor: Color) -> OverlayResult<Self> {
        if stops.iter().any(|(threshold, _)| !threshold.is_finite()) {
            return Err(OverlayError::InvalidData(
                "palette thresholds must be finite".to_owned(),
            ));
        }
        stops.sort_by(|a, b| b.0.total_cmp(&a.0));
        Ok(Self { stops, floor })
    }

    #[must_use]
    pub fn color_for(&self, rate: f64) -> Color {
        self.stops
            .iter()
            .find(|(threshold, _)| rate > *threshold)
            .map_or(self.floor, |(_, color)| *color)
    }

    /// Base style for a region whose latest rate is `latest_rate` (missing reads as 0).
    #[must_use]
    pub fn style_for(&self, latest_rate: Option<f64>) -> RegionStyle {
        RegionStyle::base(self.color_for(latest_rate.unwrap_or(0.0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing_accepts_short_and_long_forms() {
        let long = Color::from_hex("#FC4E2A").expect("long form");
        assert_eq!(long, Color::from_rgb8(0xFC, 0x4E, 0x2A));
        let short = Color::from_hex("#666").expect("short form");
        assert_eq!(short, Color::from_rgb8(0x66, 0x66, 0x66));
        assert!(Color::from_hex("#12").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
    }

    #[test]
    fn palette_uses_strict_thresholds() {
        let palette = ChoroplethPalette::default();
        assert_eq!(palette.color_for(4.5), Color::from_rgb8(0x80, 0x00, 0x26));
        assert_eq!(palette.color_for(2.0), Color::from_rgb8(0xFD, 0x8D, 0x3C));
        assert_eq!(palette.color_for(1.0), Color::from_rgb8(0xFF, 0xFF, 0xCC));
    }
}
