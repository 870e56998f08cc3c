//! Median-cut color reduction.

use crate::image::Rgb;

/// Truncated per-channel mean, or `fallback` for an empty set.
pub(super) fn centroid(pixels: &[Rgb], fallback: Rgb) -> Rgb {
    if pixels.is_empty() {
        return fallback;
    }
    let n = pixels.len() as u64;
    let mut sums = [0u64; 3];
    for p in pixels {
        sums[0] += p.r as u64;
        sums[1] += p.g as u64;
        sums[2] += p.b as u64;
    }
    Rgb::new((sums[0] / n) as u8, (sums[1] / n) as u8, (sums[2] / n) as u8)
}

/// Channel (0 = R, 1 = G, 2 = B) with the widest value range; ties pick the
/// first.
fn widest_channel(pixels: &[Rgb]) -> usize {
    let mut lo = [u8::MAX; 3];
    let mut hi = [u8::MIN; 3];
    for p in pixels {
        for (c, v) in p.to_bytes().into_iter().enumerate() {
            lo[c] = lo[c].min(v);
            hi[c] = hi[c].max(v);
        }
    }
    let mut best = 0;
    for c in 1..3 {
        if hi[c].saturating_sub(lo[c]) > hi[best].saturating_sub(lo[best]) {
            best = c;
        }
    }
    best
}

fn split(pixels: &mut [Rgb], leaves: usize, parent: Rgb, out: &mut Vec<Rgb>) {
    let here = centroid(pixels, parent);
    if leaves == 1 || pixels.is_empty() {
        out.extend(std::iter::repeat(here).take(leaves));
        return;
    }

    let channel = widest_channel(pixels);
    pixels.sort_by_key(|p| p.to_bytes()[channel]);

    let left_leaves = leaves / 2;
    let at = pixels.len() * left_leaves / leaves;
    let (left, right) = pixels.split_at_mut(at);
    split(left, left_leaves, here, out);
    split(right, leaves - left_leaves, here, out);
}

/// Reduce `pixels` to exactly `k` colors.
///
/// Each split sorts the population by its widest channel and divides it in
/// proportion to the leaves assigned to each side, so for a power-of-two `k`
/// this is the classic `log2(k)` levels of median splits. A leaf's color is
/// the truncated mean of its pixels; a leaf left without pixels takes its
/// parent's color. The order of `pixels` is not preserved.
pub fn median_cut(pixels: &mut [Rgb], k: usize) -> Vec<Rgb> {
    let mut out = Vec::with_capacity(k);
    if k > 0 {
        split(pixels, k, Rgb::BLACK, &mut out);
    }
    out
}
