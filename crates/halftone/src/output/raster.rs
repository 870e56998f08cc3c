//! Exact scanline circle fill.

use super::canvas::OutputCanvas;
use crate::image::Rgb;

/// `floor(sqrt(n))` for non-negative integers.
fn isqrt(n: i64) -> i64 {
    let mut r = (n as f64).sqrt() as i64;
    while r * r > n {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= n {
        r += 1;
    }
    r
}

/// Fill a circle of `diameter` pixels centered at `(cx, cy)`.
///
/// With `r = diameter / 2`, every row `cy + dy` for `dy` in `-r..=r` is
/// filled from `cx - dx` to `cx + dx` inclusive, where
/// `dx = floor(sqrt(r^2 - dy^2))`. A diameter of 1 sets only the center
/// pixel; 0 draws nothing. Pixels outside the canvas are skipped. Returns
/// the number of pixels written.
///
/// ```
/// use halftone::output::{draw_circle, OutputCanvas};
/// use halftone::{RenderMode, Rgb};
///
/// let mut canvas = OutputCanvas::new(9, 9, RenderMode::Grayscale);
/// // r = 2: rows of width 1, 3, 5, 3, 1
/// assert_eq!(draw_circle(&mut canvas, 4, 4, 5, Rgb::WHITE), 13);
/// ```
pub fn draw_circle(
    canvas: &mut OutputCanvas,
    cx: i64,
    cy: i64,
    diameter: usize,
    color: Rgb,
) -> usize {
    if diameter == 0 {
        return 0;
    }
    let (w, h) = (canvas.width() as i64, canvas.height() as i64);
    let r = (diameter / 2) as i64;

    let mut written = 0;
    for dy in -r..=r {
        let y = cy + dy;
        if y < 0 || y >= h {
            continue;
        }
        let dx = isqrt(r * r - dy * dy);
        let x0 = (cx - dx).max(0);
        let x1 = (cx + dx).min(w - 1);
        if x0 > x1 {
            continue;
        }
        canvas.fill_span(y as usize, x0 as usize, x1 as usize, color);
        written += (x1 - x0 + 1) as usize;
    }
    written
}
