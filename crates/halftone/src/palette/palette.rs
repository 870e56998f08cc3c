//! Ordered color palettes and nearest-color matching.

use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;
use crate::image::Rgb;

/// Algorithm used to reduce an image to a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaletteStrategy {
    /// Recursive split on the channel of greatest range.
    #[default]
    MedianCut,
    /// Lloyd iterations from a farthest-point seeding.
    KMeans,
}

impl PaletteStrategy {
    pub const ALL: [PaletteStrategy; 2] = [PaletteStrategy::MedianCut, PaletteStrategy::KMeans];

    pub fn name(self) -> &'static str {
        match self {
            PaletteStrategy::MedianCut => "median-cut",
            PaletteStrategy::KMeans => "kmeans",
        }
    }
}

impl fmt::Display for PaletteStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaletteStrategy {
    type Err = ConfigError;

    /// Case-insensitive; accepts `median-cut`, `median_cut`, `mediancut`,
    /// `kmeans` and `k-means`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "median-cut" | "median_cut" | "mediancut" => Ok(PaletteStrategy::MedianCut),
            "kmeans" | "k-means" | "k_means" => Ok(PaletteStrategy::KMeans),
            _ => Err(ConfigError::UnknownStrategy {
                name: s.to_string(),
            }),
        }
    }
}

/// Error returned by [`Palette::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteError {
    /// No colors provided.
    EmptyPalette,
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::EmptyPalette => write!(f, "palette must contain at least one color"),
        }
    }
}

impl std::error::Error for PaletteError {}

/// A non-empty, ordered sequence of RGB colors.
///
/// Palettes produced by [`extract_palette`](super::extract_palette) are
/// ordered by descending frequency among the sampled source pixels.
/// Duplicate entries are allowed.
///
/// # Example
///
/// ```
/// use halftone::{Palette, Rgb};
///
/// let palette = Palette::new(vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
/// assert_eq!(palette.nearest(Rgb::new(200, 190, 210)), Rgb::WHITE);
/// assert_eq!(palette.nearest_index(Rgb::new(20, 0, 40)), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from `colors`, keeping their order.
    ///
    /// # Errors
    ///
    /// [`PaletteError::EmptyPalette`] if `colors` is empty.
    pub fn new(colors: Vec<Rgb>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// `k` copies of `color` (at least one).
    pub fn solid(color: Rgb, k: usize) -> Self {
        Self {
            colors: vec![color; k.max(1)],
        }
    }

    /// The same entries in the order given by `order` (indices into `self`).
    pub(super) fn reordered(&self, order: &[usize]) -> Self {
        Self {
            colors: order.iter().map(|&i| self.colors[i]).collect(),
        }
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never true for a constructed palette.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Index of the entry closest to `color` in Euclidean RGB distance.
    /// Ties go to the lowest index.
    pub fn nearest_index(&self, color: Rgb) -> usize {
        let mut best = 0;
        let mut best_dist = u32::MAX;
        for (i, &entry) in self.colors.iter().enumerate() {
            let d = entry.distance_sq(color);
            if d < best_dist {
                best = i;
                best_dist = d;
                if d == 0 {
                    break;
                }
            }
        }
        best
    }

    /// The entry closest to `color`.
    #[inline]
    pub fn nearest(&self, color: Rgb) -> Rgb {
        self.colors[self.nearest_index(color)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_palette() -> Palette {
        Palette::new(vec![
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert_eq!(Palette::new(Vec::new()), Err(PaletteError::EmptyPalette));
    }

    #[test]
    fn test_nearest_exact_and_approximate() {
        let palette = rgb_palette();
        assert_eq!(palette.nearest(Rgb::new(255, 0, 0)), Rgb::new(255, 0, 0));
        assert_eq!(palette.nearest(Rgb::new(10, 200, 40)), Rgb::new(0, 255, 0));
        assert_eq!(palette.nearest_index(Rgb::new(0, 30, 180)), 2);
    }

    #[test]
    fn test_nearest_tie_goes_to_lowest_index() {
        let palette = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(2, 0, 0)]).unwrap();
        assert_eq!(palette.nearest_index(Rgb::new(1, 0, 0)), 0);
    }

    #[test]
    fn test_nearest_is_idempotent() {
        let palette = rgb_palette();
        let query = Rgb::new(90, 91, 92);
        let first = palette.nearest(query);
        assert_eq!(palette.nearest(query), first);
        assert_eq!(palette.nearest(first), first);
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("median-cut".parse::<PaletteStrategy>(), Ok(PaletteStrategy::MedianCut));
        assert_eq!(" KMeans ".parse::<PaletteStrategy>(), Ok(PaletteStrategy::KMeans));
        assert_eq!(
            "octree".parse::<PaletteStrategy>(),
            Err(ConfigError::UnknownStrategy {
                name: "octree".to_string()
            })
        );
        for strategy in PaletteStrategy::ALL {
            assert_eq!(strategy.name().parse::<PaletteStrategy>(), Ok(strategy));
        }
    }
}
