use crate::domain::errors::ConfigurationError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, EnumIter, EnumString};

/// Half-span used when every value is zero and the padded range collapses
pub const DEGENERATE_HALF_SPAN: f64 = 1.0;

/// Value Object - padding added around the data on the value axis, as fractions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisPadding {
    pub below: f64,
    pub above: f64,
}

impl Default for AxisPadding {
    fn default() -> Self {
        Self { below: 0.05, above: 0.05 }
    }
}

impl AxisPadding {
    pub fn lower_factor(&self) -> f64 {
        1.0 - self.below
    }

    pub fn upper_factor(&self) -> f64 {
        1.0 + self.above
    }
}

/// Value Object - value axis range, always with `min < max`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Pad `[low, high]` outward by `padding`.
    ///
    /// For non-negative values this is `low * 0.95`, `high * 1.05` with the default padding.
    /// Negative values are padded away from zero so the range still holds every value.
    pub fn padded(low: f64, high: f64, padding: AxisPadding) -> Self {
        let min = if low >= 0.0 {
            low * padding.lower_factor()
        } else {
            low * padding.upper_factor()
        };
        let max = if high >= 0.0 {
            high * padding.upper_factor()
        } else {
            high * padding.lower_factor()
        };

        if min < max {
            Self { min, max }
        } else {
            let center = (min + max) / 2.0;
            Self {
                min: center - DEGENERATE_HALF_SPAN,
                max: center + DEGENERATE_HALF_SPAN,
            }
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Position of `value` inside the range, 0.0 at `min` and 1.0 at `max`
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }
}

/// Value Object - 2D point in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// Value Object - axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// Value Object - legend placement relative to the plot
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LegendPosition {
    #[display(fmt = "top")]
    Top,
    #[display(fmt = "bottom")]
    Bottom,
    #[display(fmt = "left")]
    Left,
    #[display(fmt = "right")]
    Right,
}

/// Value Object - legend alignment along its edge
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LegendAlign {
    #[display(fmt = "start")]
    Start,
    #[display(fmt = "center")]
    Center,
    #[display(fmt = "end")]
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[display(fmt = "normal")]
    Normal,
    #[display(fmt = "bold")]
    Bold,
}

/// Value Object - canvas font
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontSpec {
    pub size: f64,
    pub weight: FontWeight,
    pub family: &'static str,
}

impl FontSpec {
    pub const DEFAULT_FAMILY: &'static str = "'Helvetica Neue', 'Helvetica', 'Arial', sans-serif";

    pub fn new(size: f64) -> Self {
        Self { size, weight: FontWeight::Normal, family: Self::DEFAULT_FAMILY }
    }

    pub fn bold(size: f64) -> Self {
        Self { weight: FontWeight::Bold, ..Self::new(size) }
    }

    pub fn line_height(&self) -> f64 {
        self.size * 1.2
    }

    /// CSS shorthand accepted by `CanvasRenderingContext2d::set_font`
    pub fn to_css(&self) -> String {
        match self.weight {
            FontWeight::Normal => format!("{}px {}", self.size, self.family),
            FontWeight::Bold => format!("bold {}px {}", self.size, self.family),
        }
    }
}

/// Value Object - Color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn from_hex(hex: u32) -> Self {
        Self::rgb(((hex >> 16) & 0xFF) as u8, ((hex >> 8) & 0xFF) as u8, (hex & 0xFF) as u8)
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self { a: alpha, ..*self }
    }

    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }

    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 1.0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 1.0 };
    pub const TEXT: Color = Color { r: 102, g: 102, b: 102, a: 1.0 };
    pub const GRID: Color = Color { r: 0, g: 0, b: 0, a: 0.1 };
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

/// Accepts `#rrggbb`, `rgb(r, g, b)` and `rgba(r, g, b, a)`
impl FromStr for Color {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigurationError::InvalidParameter {
            field: "color",
            reason: format!("unsupported color `{}`", s),
        };
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 {
                return Err(invalid());
            }
            return u32::from_str_radix(hex, 16).map(Color::from_hex).map_err(|_| invalid());
        }

        let (body, with_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = s.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(invalid());
        };
        let body = body.strip_suffix(')').ok_or_else(invalid)?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();

        match (with_alpha, parts.as_slice()) {
            (false, [r, g, b]) => Ok(Color::rgb(
                r.parse().map_err(|_| invalid())?,
                g.parse().map_err(|_| invalid())?,
                b.parse().map_err(|_| invalid())?,
            )),
            (true, [r, g, b, a]) => {
                let alpha: f32 = a.parse().map_err(|_| invalid())?;
                if !(0.0..=1.0).contains(&alpha) {
                    return Err(invalid());
                }
                Ok(Color::new(
                    r.parse().map_err(|_| invalid())?,
                    g.parse().map_err(|_| invalid())?,
                    b.parse().map_err(|_| invalid())?,
                    alpha,
                ))
            }
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_round_trips_through_css() {
        let color: Color = "rgb(75, 192, 192)".parse().unwrap();
        assert_eq!(color, Color::rgb(75, 192, 192));
        assert_eq!(color.to_css(), "rgb(75, 192, 192)");
        assert_eq!(Color::GRID.to_css(), "rgba(0, 0, 0, 0.1)");
    }

    #[test]
    fn color_rejects_garbage() {
        assert!("teal".parse::<Color>().is_err());
        assert!("rgb(300, 0, 0)".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
    }

    #[test]
    fn legend_enums_parse_lowercase() {
        assert_eq!("end".parse::<LegendAlign>().unwrap(), LegendAlign::End);
        assert_eq!("top".parse::<LegendPosition>().unwrap(), LegendPosition::Top);
        assert_eq!(LegendPosition::Right.as_ref(), "right");
    }
}
