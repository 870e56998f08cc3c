//! Brightness remapping curves.
//!
//! Each curve is a pure transform on normalized brightness `x` in `[0, 1]`.
//! The curve is chosen once at configuration time; per-cell evaluation is a
//! plain `match`.

use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// Default exponent denominator for [`BrightnessMapping::Power`].
pub const DEFAULT_GAMMA: f64 = 2.2;

/// Named brightness curve.
///
/// | variant | formula |
/// |---|---|
/// | `Linear` | `x` |
/// | `Logarithmic` | `ln(1 + x) / ln(2)` |
/// | `Exponential` | `e^(x - 1)` |
/// | `Sigmoid` | `1 / (1 + e^-(6x - 3))` |
/// | `Power` | `x^(1 / gamma)` |
/// | `Adaptive` | logarithmic below 0.2, sigmoid above 0.8, power between |
///
/// `Exponential` maps 0 to `e^-1`, not 0, and `Sigmoid` only approaches the
/// endpoints; neither is renormalized. Dark cells stay visible under those
/// curves unless the darkness threshold removes them.
///
/// # Example
///
/// ```
/// use halftone::BrightnessMapping;
///
/// let curve: BrightnessMapping = "logarithmic".parse().unwrap();
/// assert!((curve.apply(1.0, 2.2) - 1.0).abs() < 1e-12);
/// assert!("sepia".parse::<BrightnessMapping>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrightnessMapping {
    #[default]
    Linear,
    Logarithmic,
    Exponential,
    Sigmoid,
    Power,
    Adaptive,
}

impl BrightnessMapping {
    /// Every curve, in declaration order.
    pub const ALL: [BrightnessMapping; 6] = [
        BrightnessMapping::Linear,
        BrightnessMapping::Logarithmic,
        BrightnessMapping::Exponential,
        BrightnessMapping::Sigmoid,
        BrightnessMapping::Power,
        BrightnessMapping::Adaptive,
    ];

    /// Canonical lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            BrightnessMapping::Linear => "linear",
            BrightnessMapping::Logarithmic => "logarithmic",
            BrightnessMapping::Exponential => "exponential",
            BrightnessMapping::Sigmoid => "sigmoid",
            BrightnessMapping::Power => "power",
            BrightnessMapping::Adaptive => "adaptive",
        }
    }

    /// Returns true if the curve reads the `gamma` parameter.
    #[inline]
    pub fn uses_gamma(self) -> bool {
        matches!(self, BrightnessMapping::Power | BrightnessMapping::Adaptive)
    }

    /// Map normalized brightness through the curve.
    #[inline]
    pub fn apply(self, x: f64, gamma: f64) -> f64 {
        match self {
            BrightnessMapping::Linear => x,
            BrightnessMapping::Logarithmic => logarithmic(x),
            BrightnessMapping::Exponential => (x - 1.0).exp(),
            BrightnessMapping::Sigmoid => sigmoid(x),
            BrightnessMapping::Power => power(x, gamma),
            BrightnessMapping::Adaptive => {
                if x < 0.2 {
                    logarithmic(x)
                } else if x > 0.8 {
                    sigmoid(x)
                } else {
                    power(x, gamma)
                }
            }
        }
    }
}

#[inline]
fn logarithmic(x: f64) -> f64 {
    x.ln_1p() / std::f64::consts::LN_2
}

#[inline]
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-(6.0 * x - 3.0)).exp())
}

#[inline]
fn power(x: f64, gamma: f64) -> f64 {
    x.powf(1.0 / gamma)
}

impl fmt::Display for BrightnessMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BrightnessMapping {
    type Err = ConfigError;

    /// Strict, case-insensitive parse of a curve name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        BrightnessMapping::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::UnknownMapping {
                name: s.to_string(),
            })
    }
}
