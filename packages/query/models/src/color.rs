//! Linear color scales.

use serde::{Deserialize, Serialize};

/// An RGB color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Rgb {
    pub const LIGHT_GREEN: Self = Self::new(0.2, 0.8, 0.8);
    pub const DARK_GREEN: Self = Self::new(0.0, 0.5, 0.5);
    pub const LIGHT_BLUE: Self = Self::new(0.7, 0.7, 1.0);
    pub const DARK_BLUE: Self = Self::new(0.0, 0.0, 0.8);
    pub const LIGHT_PURPLE: Self = Self::new(1.0, 0.7, 1.0);
    pub const DARK_PURPLE: Self = Self::new(0.5, 0.0, 0.5);
    pub const LIGHT_ORANGE: Self = Self::new(1.0, 0.9, 0.7);
    pub const DARK_ORANGE: Self = Self::new(0.8, 0.4, 0.0);
    /// Fallback for locations a metric does not apply to.
    pub const GRAY: Self = Self::new(0.5, 0.5, 0.5);

    #[must_use]
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Interpolates each channel; `t` is clamped to `0.0..=1.0`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f64, b: f64| a.mul_add(1.0 - t, b * t);
        Self {
            red: mix(self.red, other.red),
            green: mix(self.green, other.green),
            blue: mix(self.blue, other.blue),
        }
    }

    /// `#rrggbb` form.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_hex(self) -> String {
        let byte = |channel: f64| (channel.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        )
    }
}

/// Value span a color scale is stretched over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Fraction of the observed span added below the minimum and above the
    /// maximum.
    pub const PADDING: f64 = 0.1;

    /// Range spanning `values`, padded on both sides. No values gives `0..0`.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let bounds = values.into_iter().fold(None, |bounds, value| match bounds {
            None => Some((value, value)),
            Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
        });

        let Some((min, max)) = bounds else {
            return Self { min: 0.0, max: 0.0 };
        };

        let pad = (max - min) * Self::PADDING;
        Self {
            min: min - pad,
            max: max + pad,
        }
    }

    /// Position of `value` within the range, clamped to `0.0..=1.0`. A
    /// zero-width range puts every value in the middle.
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// A low/high color pair stretched over a value range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorConfig {
    pub low: Rgb,
    pub high: Rgb,
    pub range: ValueRange,
}

impl ColorConfig {
    #[must_use]
    pub const fn new(colors: (Rgb, Rgb), range: ValueRange) -> Self {
        Self {
            low: colors.0,
            high: colors.1,
            range,
        }
    }

    #[must_use]
    pub fn color_for(&self, value: f64) -> Rgb {
        self.low.lerp(self.high, self.range.normalize(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn range_is_padded_by_ten_percent() {
        let range = ValueRange::from_values([100.0, 200.0, 150.0]);
        assert!(close(range.min, 90.0));
        assert!(close(range.max, 210.0));
    }

    #[test]
    fn empty_range_is_zero() {
        let range = ValueRange::from_values(std::iter::empty());
        assert!(close(range.min, 0.0));
        assert!(close(range.max, 0.0));
        assert!(close(range.normalize(42.0), 0.5));
    }

    #[test]
    fn single_value_range_is_midpoint() {
        let range = ValueRange::from_values([7.0]);
        assert!(close(range.normalize(7.0), 0.5));
    }

    #[test]
    fn normalize_clamps() {
        let range = ValueRange { min: 0.0, max: 10.0 };
        assert!(close(range.normalize(-5.0), 0.0));
        assert!(close(range.normalize(5.0), 0.5));
        assert!(close(range.normalize(50.0), 1.0));
    }

    #[test]
    fn color_interpolates_between_ends() {
        let config = ColorConfig::new(
            (Rgb::LIGHT_BLUE, Rgb::DARK_BLUE),
            ValueRange { min: 0.0, max: 10.0 },
        );
        assert_eq!(config.color_for(0.0), Rgb::LIGHT_BLUE);
        assert_eq!(config.color_for(10.0), Rgb::DARK_BLUE);

        let mid = config.color_for(5.0);
        assert!(close(mid.red, 0.35));
        assert!(close(mid.green, 0.35));
        assert!(close(mid.blue, 0.9));
    }

    #[test]
    fn hex_form() {
        assert_eq!(Rgb::GRAY.to_hex(), "#808080");
        assert_eq!(Rgb::DARK_BLUE.to_hex(), "#0000cc");
    }
}
