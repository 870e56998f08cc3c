//! Grid decomposition of the working buffer.
//!
//! The grid is resolved once into an immutable [`RenderContext`] (working
//! dimensions after upscaling, cell size) which every later step borrows.

use crate::api::HalftoneError;

/// Base cell size: `floor(min(width, height) / divisions)`.
///
/// # Errors
///
/// [`HalftoneError::Geometry`] if the result is 0, i.e. the image is smaller
/// than `divisions` along its shorter side.
///
/// # Example
///
/// ```
/// use halftone::grid::cell_size;
///
/// assert_eq!(cell_size(100, 200, 10).unwrap(), 10);
/// assert!(cell_size(3, 3, 4).is_err());
/// ```
pub fn cell_size(width: usize, height: usize, divisions: usize) -> Result<usize, HalftoneError> {
    let size = if divisions == 0 {
        0
    } else {
        width.min(height) / divisions
    };
    if size == 0 {
        return Err(HalftoneError::Geometry {
            width,
            height,
            divisions,
        });
    }
    Ok(size)
}

/// Immutable geometry for one `process` call.
///
/// Computed once from the original image and the upscale factor; every
/// dimension here is already in working (post-upscale) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// Working width in pixels.
    pub width: usize,
    /// Working height in pixels.
    pub height: usize,
    /// Working cell size in pixels.
    pub cell_size: usize,
    /// Grid divisions along the shorter side of the original image.
    pub divisions: usize,
    /// Integer upscale factor applied to the original image.
    pub upscale_factor: usize,
}

impl RenderContext {
    /// Resolve geometry from the original (pre-upscale) dimensions.
    ///
    /// The base cell size is computed on the original image and then scaled
    /// with it, so upscaling never changes the grid layout, only its
    /// resolution.
    pub fn new(
        original_width: usize,
        original_height: usize,
        divisions: usize,
        upscale_factor: usize,
    ) -> Result<Self, HalftoneError> {
        if original_width == 0 || original_height == 0 {
            return Err(HalftoneError::DegenerateInput {
                width: original_width,
                height: original_height,
            });
        }
        let base = cell_size(original_width, original_height, divisions)?;
        let factor = upscale_factor.max(1);
        Ok(Self {
            width: original_width * factor,
            height: original_height * factor,
            cell_size: base * factor,
            divisions,
            upscale_factor: factor,
        })
    }

    /// Cells along x and y (the last column/row may be clipped).
    #[inline]
    pub fn grid_dims(&self) -> (usize, usize) {
        (
            self.width.div_ceil(self.cell_size),
            self.height.div_ceil(self.cell_size),
        )
    }

    /// Iterate over every cell, row by row.
    pub fn cells(&self) -> Cells {
        Cells {
            ctx: *self,
            x: 0,
            y: 0,
        }
    }

    /// Up to 3x3 block of cells centered on `cell`, clipped to the buffer.
    #[inline]
    pub fn neighborhood(&self, cell: &Cell) -> Region {
        let cs = self.cell_size;
        Region {
            x0: cell.x.saturating_sub(cs),
            y0: cell.y.saturating_sub(cs),
            x1: (cell.x + 2 * cs).min(self.width),
            y1: (cell.y + 2 * cs).min(self.height),
        }
    }
}

/// Half-open pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Region {
    #[inline]
    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }
}

/// One grid tile, addressed by its top-left pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    /// Pixel extent, clipped at the image edge.
    pub region: Region,
}

impl Cell {
    /// Circle center: `(x + cell_size / 2, y + cell_size / 2)`.
    ///
    /// Uses the nominal cell size even for clipped edge cells.
    #[inline]
    pub fn center(&self, cell_size: usize) -> (i64, i64) {
        (
            (self.x + cell_size / 2) as i64,
            (self.y + cell_size / 2) as i64,
        )
    }
}

/// Row-major iterator over the cells of a [`RenderContext`].
#[derive(Debug, Clone)]
pub struct Cells {
    ctx: RenderContext,
    x: usize,
    y: usize,
}

impl Iterator for Cells {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        let ctx = &self.ctx;
        if self.y >= ctx.height {
            return None;
        }
        let (x, y) = (self.x, self.y);
        let cell = Cell {
            x,
            y,
            region: Region {
                x0: x,
                y0: y,
                x1: (x + ctx.cell_size).min(ctx.width),
                y1: (y + ctx.cell_size).min(ctx.height),
            },
        };

        self.x += ctx.cell_size;
        if self.x >= ctx.width {
            self.x = 0;
            self.y += ctx.cell_size;
        }
        Some(cell)
    }
}
