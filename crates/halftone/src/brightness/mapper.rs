//! Per-cell draw decision.
//!
//! [`BrightnessMapper`] turns a cell's average brightness and its
//! neighborhood statistics into a [`Decision`]: whether to draw a circle and
//! at which brightness. With smoothing enabled it runs the context-aware
//! suppression and blend heuristic before the curve; without smoothing the
//! decision is a plain threshold test.

use super::curve::BrightnessMapping;
use crate::grid::RegionStats;

/// Cells darker than `threshold * DARK_CELL_FACTOR` are suppression candidates.
const DARK_CELL_FACTOR: f64 = 1.2;
/// ...and are suppressed if their neighborhood is below `threshold * DARK_NEIGHBORHOOD_FACTOR`.
const DARK_NEIGHBORHOOD_FACTOR: f64 = 1.5;
/// Neighborhood standard deviation above which the cell leans on its context.
const HIGH_CONTRAST_STD: f64 = 0.15;
/// Cell weight in the high-contrast blend (the neighborhood gets the rest).
const HIGH_CONTRAST_CELL_WEIGHT: f64 = 0.3;
/// Open interval of mid-tones that are averaged with their neighborhood.
const MIDTONE_RANGE: (f64, f64) = (0.2, 0.8);

/// Where the brightness curve is applied.
///
/// The two historical processor variants disagreed here, so the choice is an
/// explicit flag rather than an implicit difference between code paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurvePolicy {
    /// Apply the curve only on the smoothing path. Without smoothing the raw
    /// cell brightness is thresholded and drawn as-is.
    #[default]
    SmoothedOnly,
    /// Apply the curve on both paths.
    Always,
}

impl CurvePolicy {
    pub fn name(self) -> &'static str {
        match self {
            CurvePolicy::SmoothedOnly => "smoothed-only",
            CurvePolicy::Always => "always",
        }
    }
}

/// Outcome for one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// Whether a circle is drawn.
    pub draw: bool,
    /// Brightness driving the circle size; 0 when not drawing.
    pub brightness: f64,
}

impl Decision {
    /// A cell that draws nothing.
    pub const SKIP: Decision = Decision {
        draw: false,
        brightness: 0.0,
    };

    #[inline]
    fn thresholded(mapped: f64, threshold: f64) -> Self {
        if mapped > threshold {
            Decision {
                draw: true,
                brightness: mapped,
            }
        } else {
            Decision::SKIP
        }
    }

    /// Circle diameter in pixels for a cell of `cell_size`:
    /// `floor(brightness * cell_size * 0.8)`, or 0 when not drawing.
    #[inline]
    pub fn diameter(&self, cell_size: usize) -> usize {
        if !self.draw {
            return 0;
        }
        let d = (self.brightness * cell_size as f64 * 0.8).floor();
        if d > 0.0 {
            d as usize
        } else {
            0
        }
    }
}

/// Resolved brightness parameters, copied out of the validated config.
#[derive(Debug, Clone, Copy)]
pub struct BrightnessMapper {
    mapping: BrightnessMapping,
    gamma: f64,
    threshold: f64,
    smoothing: bool,
    policy: CurvePolicy,
}

impl BrightnessMapper {
    pub fn new(
        mapping: BrightnessMapping,
        gamma: f64,
        threshold: f64,
        smoothing: bool,
        policy: CurvePolicy,
    ) -> Self {
        Self {
            mapping,
            gamma,
            threshold,
            smoothing,
            policy,
        }
    }

    /// Decide for a cell with normalized mean brightness `cell` and the
    /// statistics of its neighborhood.
    pub fn decide(&self, cell: f64, neighborhood: RegionStats) -> Decision {
        if !self.smoothing {
            let mapped = match self.policy {
                CurvePolicy::SmoothedOnly => cell,
                CurvePolicy::Always => self.mapping.apply(cell, self.gamma),
            };
            return Decision::thresholded(mapped, self.threshold);
        }

        let n = neighborhood.mean;
        if cell < self.threshold * DARK_CELL_FACTOR && n < self.threshold * DARK_NEIGHBORHOOD_FACTOR
        {
            return Decision::SKIP;
        }

        let mut effective = cell;
        if neighborhood.std_dev > HIGH_CONTRAST_STD {
            effective = HIGH_CONTRAST_CELL_WEIGHT * cell + (1.0 - HIGH_CONTRAST_CELL_WEIGHT) * n;
        }
        if MIDTONE_RANGE.0 < effective && effective < MIDTONE_RANGE.1 {
            effective = (effective + n) / 2.0;
        }

        let mapped = self.mapping.apply(effective, self.gamma);
        Decision::thresholded(mapped, self.threshold)
    }
}
