//! Brightness curves and the per-cell draw decision
//!
//! [`BrightnessMapping`] is the closed family of remapping curves;
//! [`BrightnessMapper`] combines the selected curve with the darkness
//! threshold and neighborhood heuristic to produce a [`Decision`].

mod curve;
mod mapper;

pub use curve::{BrightnessMapping, DEFAULT_GAMMA};
pub use mapper::{BrightnessMapper, CurvePolicy, Decision};
