//! RenderSpec: everything a drawing layer needs to paint one chart frame.
//!
//! The core never touches a drawing surface. A front end asks the navigator
//! for a fresh `RenderSpec` after every command and redraws from scratch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::assessment::BUCKET_COUNT;

/// 24-bit color, written as `#rrggbb` in config files and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}': expected #rrggbb")]
pub struct ParseColorError(String);

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| ParseColorError(s.to_string()))?;
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ParseColorError(s.to_string()))
        };
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// How the mean line position is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeanMode {
    /// floor(sum / n): the chart has always drawn an integer mean line.
    #[default]
    Truncated,
    /// sum / n
    Exact,
}

/// Bar palette plus band and marker colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    /// Bars of assessment `i` use `palette[i % palette.len()]`. Never empty.
    pub palette: Vec<Rgb>,
    pub band_color: Rgb,
    pub marker_color: Rgb,
    pub mean_mode: MeanMode,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            palette: vec![
                Rgb::new(0x33, 0xaa, 0x33),
                Rgb::new(0x33, 0xbb, 0x33),
                Rgb::new(0x22, 0xcc, 0x22),
                Rgb::new(0x11, 0xcc, 0x22),
                Rgb::new(0x00, 0xdd, 0x00),
            ],
            band_color: Rgb::new(0xee, 0xff, 0xee),
            marker_color: Rgb::new(0x00, 0xff, 0x00),
            mean_mode: MeanMode::Truncated,
        }
    }
}

impl ChartStyle {
    pub fn bar_color(&self, index: usize) -> Rgb {
        self.palette[index % self.palette.len()]
    }
}

/// Shaded ±1 standard deviation rectangle around the mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bar {
    pub bucket: u8,
    pub height: u32,
}

/// Vertical line at the mean. `y_from`/`y_to` are fractions of the plot's
/// vertical extent, so 0.0..1.0 spans the whole axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeanMarker {
    pub x: f64,
    pub y_from: f64,
    pub y_to: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSpec {
    /// `"{label}/{total}"`
    pub title: String,
    pub label: String,
    pub position: usize,
    pub total: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub peak_count: u32,
    pub band: Band,
    pub bars: Vec<Bar>,
    pub bar_color: Rgb,
    pub band_color: Rgb,
    pub mean_marker: MeanMarker,
    pub marker_color: Rgb,
}

impl RenderSpec {
    /// Lowest and highest bucket on the x axis. Bars are centered on these.
    pub fn x_range(&self) -> (f64, f64) {
        (0.0, (BUCKET_COUNT - 1) as f64)
    }

    pub fn total_count(&self) -> u32 {
        self.bars.iter().map(|b| b.height).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex_roundtrip() {
        let c: Rgb = "#33aa33".parse().unwrap();
        assert_eq!(c, Rgb::new(0x33, 0xaa, 0x33));
        assert_eq!(c.to_string(), "#33aa33");
        assert_eq!("#EEFFEE".parse::<Rgb>().unwrap(), Rgb::new(0xee, 0xff, 0xee));
    }

    #[test]
    fn bad_colors_rejected() {
        for bad in ["33aa33", "#33aa3", "#33aa33ff", "#gg0000", "lime", "#ééé"] {
            assert!(bad.parse::<Rgb>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn palette_cycles() {
        let style = ChartStyle::default();
        assert_eq!(style.bar_color(0), style.palette[0]);
        assert_eq!(style.bar_color(5), style.palette[0]);
        assert_eq!(style.bar_color(7), style.palette[2]);
    }

    #[test]
    fn x_range_covers_every_bar() {
        let spec = RenderSpec {
            title: "DS/1".into(),
            label: "DS".into(),
            position: 0,
            total: 1,
            mean: 10.0,
            std_dev: 0.0,
            peak_count: 1,
            band: Band {
                x_min: 10.0,
                x_max: 10.0,
                y_min: 0.0,
                y_max: 1.0,
            },
            bars: (0..BUCKET_COUNT as u8)
                .map(|bucket| Bar {
                    bucket,
                    height: u32::from(bucket == 10),
                })
                .collect(),
            bar_color: Rgb::new(0, 0, 0),
            band_color: Rgb::new(0, 0, 0),
            mean_marker: MeanMarker {
                x: 10.0,
                y_from: 0.0,
                y_to: 1.0,
            },
            marker_color: Rgb::new(0, 0, 0),
        };
        let (lo, hi) = spec.x_range();
        assert!(spec
            .bars
            .iter()
            .all(|b| (lo..=hi).contains(&f64::from(b.bucket))));
        assert_eq!((lo, hi), (0.0, 20.0));
        assert_eq!(spec.total_count(), 1);
    }
}
