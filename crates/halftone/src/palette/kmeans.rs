//! K-means color reduction.

use crate::image::Rgb;

/// Upper bound on Lloyd iterations.
pub const MAX_ITERATIONS: usize = 20;

type Centroid = [f64; 3];

#[inline]
fn to_point(c: Rgb) -> Centroid {
    [c.r as f64, c.g as f64, c.b as f64]
}

#[inline]
fn dist_sq(a: &Centroid, b: &Centroid) -> f64 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}

fn closest(point: &Centroid, centroids: &[Centroid]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = dist_sq(point, c);
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}

/// Farthest-point seeding: the middle sample first, then repeatedly the
/// sample farthest from every centroid chosen so far.
fn seed(points: &[Centroid], k: usize) -> Vec<Centroid> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[points.len() / 2]);
    let mut min_dist: Vec<f64> = points.iter().map(|p| dist_sq(p, &centroids[0])).collect();

    while centroids.len() < k {
        let mut far = 0;
        for (i, &d) in min_dist.iter().enumerate() {
            if d > min_dist[far] {
                far = i;
            }
        }
        let next = points[far];
        for (d, p) in min_dist.iter_mut().zip(points) {
            *d = d.min(dist_sq(p, &next));
        }
        centroids.push(next);
    }
    centroids
}

/// Reduce `pixels` to exactly `k` colors with Lloyd's algorithm.
///
/// Deterministic for a given input order. Iterates until no assignment
/// changes or [`MAX_ITERATIONS`] is reached; a cluster that loses all its
/// members keeps its previous centroid. Centroids are truncated to `u8`.
pub fn kmeans(pixels: &[Rgb], k: usize) -> Vec<Rgb> {
    if k == 0 {
        return Vec::new();
    }
    if pixels.is_empty() {
        return vec![Rgb::BLACK; k];
    }

    let points: Vec<Centroid> = pixels.iter().copied().map(to_point).collect();
    let mut centroids = seed(&points, k);
    let mut labels = vec![usize::MAX; points.len()];

    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;
        for (label, p) in labels.iter_mut().zip(&points) {
            let c = closest(p, &centroids);
            if *label != c {
                *label = c;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        let mut sums = vec![[0.0f64; 3]; k];
        let mut counts = vec![0usize; k];
        for (&label, p) in labels.iter().zip(&points) {
            counts[label] += 1;
            for c in 0..3 {
                sums[label][c] += p[c];
            }
        }
        for ((centroid, sum), &count) in centroids.iter_mut().zip(&sums).zip(&counts) {
            if count > 0 {
                let n = count as f64;
                *centroid = [sum[0] / n, sum[1] / n, sum[2] / n];
            }
        }
    }

    centroids
        .iter()
        .map(|c| Rgb::new(c[0] as u8, c[1] as u8, c[2] as u8))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separates_obvious_clusters() {
        let mut pixels = Vec::new();
        for i in 0..30u8 {
            pixels.push(Rgb::new(250, i % 4, 0));
            pixels.push(Rgb::new(0, 0, 250 - i % 4));
            pixels.push(Rgb::new(i % 4, 250, 0));
        }
        let mut palette = kmeans(&pixels, 3);
        palette.sort_by_key(|c| c.to_bytes());
        assert_eq!(palette.len(), 3);
        assert!(palette[0].b > 240, "blue cluster: {:?}", palette[0]);
        assert!(palette[1].g > 240, "green cluster: {:?}", palette[1]);
        assert!(palette[2].r > 240, "red cluster: {:?}", palette[2]);
    }

    #[test]
    fn test_deterministic() {
        let pixels: Vec<Rgb> = (0..200u32)
            .map(|i| Rgb::new((i * 7 % 256) as u8, (i * 13 % 256) as u8, (i * 29 % 256) as u8))
            .collect();
        assert_eq!(kmeans(&pixels, 5), kmeans(&pixels, 5));
    }

    #[test]
    fn test_fewer_distinct_colors_than_k() {
        let pixels = vec![Rgb::new(9, 9, 9); 12];
        assert_eq!(kmeans(&pixels, 4), vec![Rgb::new(9, 9, 9); 4]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(kmeans(&[], 2), vec![Rgb::BLACK; 2]);
        assert!(kmeans(&[Rgb::WHITE], 0).is_empty());
    }
}
