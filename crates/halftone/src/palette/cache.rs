//! Memoized nearest-color lookup.

use std::collections::HashMap;

use super::palette::Palette;
use crate::image::Rgb;

/// Nearest-color lookups memoized for one palette.
///
/// Borrowing the palette ties the cache to it: a cache can never answer for
/// a different palette, and it is dropped with the `process` call that
/// created it. Results are identical to [`Palette::nearest`].
#[derive(Debug)]
pub struct NearestColorCache<'a> {
    palette: &'a Palette,
    memo: HashMap<Rgb, Rgb>,
}

impl<'a> NearestColorCache<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self {
            palette,
            memo: HashMap::new(),
        }
    }

    pub fn palette(&self) -> &'a Palette {
        self.palette
    }

    /// Nearest palette entry to `color`.
    pub fn nearest(&mut self, color: Rgb) -> Rgb {
        let palette = self.palette;
        *self
            .memo
            .entry(color)
            .or_insert_with(|| palette.nearest(color))
    }

    /// Number of distinct colors looked up so far.
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }
}
