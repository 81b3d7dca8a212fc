//! Bitmap font store
//!
//! Glyphs are fixed 11x11 bitmaps packed into 16 bytes:
//!
//! - pixel (x, y) is bit `7 - (y * 11 + x) % 8` of byte `(y * 11 + x) / 8`
//! - 121 pixels fill 15 bytes plus the top bit of byte 15
//! - the low 4 bits of byte 15 hold the advance width (0-15)
//!
//! A [`Font`] is a table of glyphs sorted by ascending code point, which
//! lets lookups use binary search. The table is built once and never
//! mutated; an unsorted or duplicated entry is a data bug.

mod builtin;

pub use builtin::BUILTIN;

/// Glyph bitmap edge length in pixels
pub const GLYPH_SIZE: usize = 11;

/// Packed glyph record size in bytes
pub const GLYPH_BYTES: usize = 16;

/// Font table format version
pub const FONT_VERSION: u8 = 1;

/// Byte and bit holding glyph pixel (x, y)
#[inline]
pub(crate) const fn glyph_bit(x: usize, y: usize) -> (usize, u8) {
    let index = y * GLYPH_SIZE + x;
    (index / 8, 7 - (index % 8) as u8)
}

/// One renderable character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph {
    /// Unicode code point
    pub code: u16,
    /// Packed bitmap and advance width
    pub data: [u8; GLYPH_BYTES],
}

impl Glyph {
    /// Create a glyph from a packed record
    pub const fn new(code: u16, data: [u8; GLYPH_BYTES]) -> Self {
        Self { code, data }
    }

    /// Horizontal distance to the next glyph's origin
    pub const fn advance(&self) -> u8 {
        self.data[GLYPH_BYTES - 1] & 0x0F
    }

    /// Whether pixel (x, y) of the bitmap is set
    ///
    /// Coordinates outside the 11x11 cell read as unset.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= GLYPH_SIZE || y >= GLYPH_SIZE {
            return false;
        }
        let (byte, bit) = glyph_bit(x, y);
        self.data[byte] & (1 << bit) != 0
    }
}

/// A sorted, immutable glyph table
#[derive(Debug, Clone, Copy)]
pub struct Font {
    version: u8,
    glyphs: &'static [Glyph],
}

impl Font {
    /// Wrap a glyph table
    ///
    /// `glyphs` must be sorted by strictly ascending code point.
    pub const fn new(glyphs: &'static [Glyph]) -> Self {
        Self {
            version: FONT_VERSION,
            glyphs,
        }
    }

    /// Table format version
    pub const fn version(&self) -> u8 {
        self.version
    }

    /// All glyphs, in code point order
    pub const fn glyphs(&self) -> &'static [Glyph] {
        self.glyphs
    }

    /// Number of glyphs
    pub const fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the table is empty
    pub const fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Look up a glyph by code point
    ///
    /// Returns `None` for code points the font does not cover, including
    /// anything beyond the 16-bit range the table can key.
    pub fn find_character(&self, code: u32) -> Option<&'static Glyph> {
        let code = u16::try_from(code).ok()?;
        let glyphs = self.glyphs;
        glyphs
            .binary_search_by_key(&code, |glyph| glyph.code)
            .ok()
            .map(|index| &glyphs[index])
    }

    /// Check the table is strictly ascending (sorted, no duplicates)
    pub fn is_well_formed(&self) -> bool {
        self.glyphs.windows(2).all(|pair| pair[0].code < pair[1].code)
    }
}
