//! Palette extraction for color mode.
//!
//! [`extract_palette`] reduces an RGB image to `k` representative colors
//! with either [`PaletteStrategy::MedianCut`] or [`PaletteStrategy::KMeans`],
//! then orders them by how many sampled pixels each one wins. Large images
//! are subsampled to [`MAX_SAMPLES`] pixels first; the sample is drawn from a
//! fixed-seed generator, so the same image always yields the same palette.
//!
//! ```
//! use halftone::{extract_palette, PaletteStrategy, PixelBuffer, Rgb};
//!
//! let image = PixelBuffer::rgb_from_fn(10, 10, |x, _| {
//!     if x < 7 { Rgb::new(200, 30, 30) } else { Rgb::new(20, 20, 180) }
//! });
//! let palette = extract_palette(&image, 2, PaletteStrategy::KMeans);
//!
//! // The red half covers more pixels, so it comes first
//! assert_eq!(palette.colors(), &[Rgb::new(200, 30, 30), Rgb::new(20, 20, 180)]);
//! ```

mod cache;
mod kmeans;
mod median_cut;
mod palette;

pub use cache::NearestColorCache;
pub use kmeans::{kmeans, MAX_ITERATIONS};
pub use median_cut::median_cut;
pub use palette::{Palette, PaletteError, PaletteStrategy};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::image::{PixelBuffer, PixelFormat, Rgb};

/// Pixel sample size used for fitting and frequency counting.
pub const MAX_SAMPLES: usize = 10_000;

const SAMPLE_SEED: u64 = 0x5717_1500;

/// Up to `max` pixels of an RGB buffer.
///
/// Returns every pixel when the image is small enough, otherwise a
/// deterministic sample without replacement, in ascending pixel order.
pub fn sample_pixels(image: &PixelBuffer, max: usize) -> Vec<Rgb> {
    debug_assert_eq!(image.format(), PixelFormat::Rgb);
    let pixels = image.data().chunks_exact(3);
    let total = pixels.len();
    if total <= max {
        return pixels.map(|p| Rgb::new(p[0], p[1], p[2])).collect();
    }

    let mut rng = StdRng::seed_from_u64(SAMPLE_SEED);
    let mut indices = rand::seq::index::sample(&mut rng, total, max).into_vec();
    indices.sort_unstable();
    let data = image.data();
    indices
        .into_iter()
        .map(|i| Rgb::new(data[i * 3], data[i * 3 + 1], data[i * 3 + 2]))
        .collect()
}

/// Reorder `palette` by descending count of `samples` nearest to each entry.
/// Ties, including entries no sample picked, keep their original order.
fn order_by_frequency(palette: &Palette, samples: &[Rgb]) -> Palette {
    let mut counts = vec![0usize; palette.len()];
    for &s in samples {
        counts[palette.nearest_index(s)] += 1;
    }
    let mut order: Vec<usize> = (0..palette.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(counts[i]));
    palette.reordered(&order)
}

/// Extract a `k`-entry palette from an RGB image.
///
/// `k` of zero is treated as one. The result always has exactly
/// `max(k, 1)` entries, even when the image has fewer distinct colors.
pub fn extract_palette(image: &PixelBuffer, k: usize, strategy: PaletteStrategy) -> Palette {
    let k = k.max(1);
    let samples = sample_pixels(image, MAX_SAMPLES);
    let colors = match strategy {
        PaletteStrategy::MedianCut => median_cut(&mut samples.clone(), k),
        PaletteStrategy::KMeans => kmeans(&samples, k),
    };
    match Palette::new(colors) {
        Ok(fitted) => order_by_frequency(&fitted, &samples),
        Err(_) => Palette::solid(Rgb::BLACK, k),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_small_image_keeps_all_pixels() {
        let image = PixelBuffer::rgb_from_fn(4, 3, |x, y| Rgb::new(x as u8, y as u8, 0));
        let samples = sample_pixels(&image, MAX_SAMPLES);
        assert_eq!(samples.len(), 12);
        assert_eq!(samples[5], Rgb::new(1, 1, 0));
    }

    #[test]
    fn test_sample_large_image_is_deterministic() {
        let image = PixelBuffer::rgb_from_fn(200, 100, |x, y| {
            Rgb::new(x as u8, y as u8, ((x + y) % 256) as u8)
        });
        let a = sample_pixels(&image, 500);
        let b = sample_pixels(&image, 500);
        assert_eq!(a.len(), 500);
        assert_eq!(a, b);
    }

    #[test]
    fn test_subsampling_keeps_palette_size() {
        let image = PixelBuffer::rgb_from_fn(150, 100, |x, y| {
            Rgb::new((x * 255 / 149) as u8, (y * 255 / 99) as u8, 128)
        });
        for strategy in PaletteStrategy::ALL {
            for k in [1, 2, 5, 8] {
                assert_eq!(extract_palette(&image, k, strategy).len(), k);
            }
        }
    }

    #[test]
    fn test_solid_image_palette() {
        let color = Rgb::new(12, 140, 77);
        let image = PixelBuffer::rgb_from_fn(9, 9, |_, _| color);
        for strategy in PaletteStrategy::ALL {
            let palette = extract_palette(&image, 4, strategy);
            assert!(
                palette.colors().iter().all(|&c| c == color),
                "{}: {:?}",
                strategy,
                palette
            );
        }
    }

    #[test]
    fn test_frequency_order() {
        // 3 parts blue, 2 parts green, 1 part red
        let image = PixelBuffer::rgb_from_fn(6, 4, |x, _| match x {
            0 => Rgb::new(230, 10, 10),
            1 | 2 => Rgb::new(10, 230, 10),
            _ => Rgb::new(10, 10, 230),
        });
        let palette = extract_palette(&image, 3, PaletteStrategy::KMeans);
        assert_eq!(
            palette.colors(),
            &[
                Rgb::new(10, 10, 230),
                Rgb::new(10, 230, 10),
                Rgb::new(230, 10, 10)
            ]
        );
    }

    #[test]
    fn test_unassigned_entries_go_last() {
        let samples = vec![Rgb::WHITE; 3];
        let fitted = Palette::new(vec![Rgb::BLACK, Rgb::BLACK, Rgb::WHITE]).unwrap();
        let ordered = order_by_frequency(&fitted, &samples);
        assert_eq!(ordered.colors(), &[Rgb::WHITE, Rgb::BLACK, Rgb::BLACK]);
    }
}
