//! Display framebuffer
//!
//! The panel is a 12x12 grid of LEDs wired to the HT1632C in its
//! N-MOS 24 ROW x 16 COM mode. Each panel row lives in four consecutive
//! 4-bit cells of chip memory (`4 * y .. 4 * y + 3`), so a row is 16 bits
//! wide on the chip even though only the first 12 columns are wired.
//!
//! Two packings of the same logical grid are provided:
//!
//! - [`WordFramebuffer`]: one `u16` per row, column `x` at bit `15 - x`.
//!   Suits the bit-banged transport, which clocks whole rows MSB-first.
//! - [`NibbleFramebuffer`]: 24 bytes, row stride 16, with the bit order
//!   reversed inside each nibble. Suits the SPI transport, which writes
//!   one 4-bit cell per transaction.
//!
//! Both expose the same [`Framebuffer`] interface, and either one can be
//! handed to either transport. [`AnyFramebuffer`] picks one at runtime.

mod nibble;
mod word;

pub use nibble::NibbleFramebuffer;
pub use word::WordFramebuffer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Visible columns
pub const WIDTH: usize = 12;

/// Visible rows
pub const HEIGHT: usize = 12;

/// Chip memory cells (4 bits each) per panel row
pub const NIBBLES_PER_ROW: usize = 4;

/// Chip memory cells covering the visible rows
pub const FRAME_NIBBLES: usize = HEIGHT * NIBBLES_PER_ROW;

/// Row word with every visible column lit (columns 12..15 are padding)
pub const ROW_MASK: u16 = 0xFFF0;

/// Convert signed coordinates into an in-range `(x, y)` pair
#[inline]
pub(crate) fn in_bounds(x: i32, y: i32) -> Option<(usize, usize)> {
    if (0..WIDTH as i32).contains(&x) && (0..HEIGHT as i32).contains(&y) {
        Some((x as usize, y as usize))
    } else {
        None
    }
}

/// A 12x12 monochrome pixel surface
///
/// Coordinates outside `[0, 12)` are not errors: writes are dropped and
/// reads return unlit. Text that scrolls off either edge relies on this.
pub trait Framebuffer {
    /// Light or clear the pixel at (x, y)
    fn set(&mut self, x: i32, y: i32, on: bool);

    /// Whether the pixel at (x, y) is lit
    fn get(&self, x: i32, y: i32) -> bool;

    /// Set every visible pixel to `on`
    fn fill(&mut self, on: bool);

    /// Clear every pixel
    fn clear(&mut self) {
        self.fill(false);
    }

    /// Row `row` as a 16-bit word, column `x` at bit `15 - x`
    ///
    /// Rows outside the panel read as zero.
    fn row_word(&self, row: usize) -> u16 {
        if row >= HEIGHT {
            return 0;
        }
        let mut word = 0u16;
        for x in 0..WIDTH {
            if self.get(x as i32, row as i32) {
                word |= 0x8000 >> x;
            }
        }
        word
    }

    /// The chip memory cell at `address`, in wire order
    ///
    /// Bit 3 is shifted out first and lands in the chip's D0, which drives
    /// the lowest column of the cell. Addresses past the visible rows read
    /// as zero.
    fn memory_nibble(&self, address: usize) -> u8 {
        let row = address / NIBBLES_PER_ROW;
        let cell = address % NIBBLES_PER_ROW;
        let shift = 12 - 4 * cell;
        ((self.row_word(row) >> shift) & 0x0F) as u8
    }
}

impl<F: Framebuffer + ?Sized> Framebuffer for &mut F {
    fn set(&mut self, x: i32, y: i32, on: bool) {
        (**self).set(x, y, on);
    }

    fn get(&self, x: i32, y: i32) -> bool {
        (**self).get(x, y)
    }

    fn fill(&mut self, on: bool) {
        (**self).fill(on);
    }

    fn row_word(&self, row: usize) -> u16 {
        (**self).row_word(row)
    }

    fn memory_nibble(&self, address: usize) -> u8 {
        (**self).memory_nibble(address)
    }
}

/// Physical packing used for the in-memory framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BufferLayout {
    /// One 16-bit word per row
    #[default]
    Word,
    /// Nibble-reversed bytes, row stride 16
    Nibble,
}

/// Framebuffer whose layout is chosen at runtime from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnyFramebuffer {
    /// Row-word packing
    Word(WordFramebuffer),
    /// Nibble packing
    Nibble(NibbleFramebuffer),
}

impl AnyFramebuffer {
    /// Create a blank framebuffer with the given layout
    pub fn new(layout: BufferLayout) -> Self {
        match layout {
            BufferLayout::Word => Self::Word(WordFramebuffer::new()),
            BufferLayout::Nibble => Self::Nibble(NibbleFramebuffer::new()),
        }
    }

    /// Layout of this framebuffer
    pub fn layout(&self) -> BufferLayout {
        match self {
            Self::Word(_) => BufferLayout::Word,
            Self::Nibble(_) => BufferLayout::Nibble,
        }
    }
}

impl Default for AnyFramebuffer {
    fn default() -> Self {
        Self::new(BufferLayout::default())
    }
}

impl Framebuffer for AnyFramebuffer {
    fn set(&mut self, x: i32, y: i32, on: bool) {
        match self {
            Self::Word(fb) => fb.set(x, y, on),
            Self::Nibble(fb) => fb.set(x, y, on),
        }
    }

    fn get(&self, x: i32, y: i32) -> bool {
        match self {
            Self::Word(fb) => fb.get(x, y),
            Self::Nibble(fb) => fb.get(x, y),
        }
    }

    fn fill(&mut self, on: bool) {
        match self {
            Self::Word(fb) => fb.fill(on),
            Self::Nibble(fb) => fb.fill(on),
        }
    }

    fn row_word(&self, row: usize) -> u16 {
        match self {
            Self::Word(fb) => fb.row_word(row),
            Self::Nibble(fb) => fb.row_word(row),
        }
    }

    fn memory_nibble(&self, address: usize) -> u8 {
        match self {
            Self::Word(fb) => fb.memory_nibble(address),
            Self::Nibble(fb) => fb.memory_nibble(address),
        }
    }
}
