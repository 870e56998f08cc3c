//! 8-bit RGB color type
//!
//! The engine works on display-referred 8-bit samples throughout: cell
//! averages, palette entries and canvas fills are all plain `u8` triples.

/// An 8-bit RGB color.
///
/// # Example
/// ```
/// use halftone::Rgb;
///
/// let orange = Rgb::new(255, 128, 0);
/// assert_eq!(orange.to_bytes(), [255, 128, 0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Pure black, the canvas background.
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    /// Pure white, the grayscale circle fill.
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array [R, G, B].
    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Luma with ITU-R 601-2 weights in 16.16 fixed point.
    ///
    /// `L = R * 299/1000 + G * 587/1000 + B * 114/1000`, rounded. This is
    /// the same integer transform common imaging libraries use for their
    /// "L" conversion, so grayscale planes match what users see elsewhere.
    #[inline]
    pub fn luma(self) -> u8 {
        let l = self.r as u32 * 19595 + self.g as u32 * 38470 + self.b as u32 * 7471 + 0x8000;
        (l >> 16) as u8
    }

    /// Squared Euclidean distance in RGB space.
    #[inline]
    pub fn distance_sq(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}
