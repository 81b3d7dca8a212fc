//! Nibble-packed framebuffer layout
//!
//! Mirrors HT1632C display memory byte for byte: pixel index is
//! `y * 16 + x`, eight pixels per byte, and inside each nibble the bit
//! order is reversed because the chip takes D0 (the lowest column) first.
//!
//! ```text
//! byte offset  0 1 2 3 4 5 6 7
//! bit          3 2 1 0 7 6 5 4
//! ```

use super::{in_bounds, Framebuffer, HEIGHT, NIBBLES_PER_ROW};

/// Bytes per row (16 columns of chip memory)
pub const BYTES_PER_ROW: usize = 2;

/// Total buffer size
pub const BUFFER_BYTES: usize = HEIGHT * BYTES_PER_ROW;

/// Row byte pair with every visible column lit
///
/// The second byte's high nibble holds the unwired columns 12..15.
const ROW_FILL: [u8; BYTES_PER_ROW] = [0xFF, 0x0F];

/// Byte index and bit number of pixel (x, y)
#[inline]
const fn locate(x: usize, y: usize) -> (usize, u8) {
    let index = y * 16 + x;
    let offset = (index % 8) as u8;
    let bit = if offset < 4 { 3 - offset } else { 11 - offset };
    (index / 8, bit)
}

/// Framebuffer packed the way the chip stores it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NibbleFramebuffer {
    bytes: [u8; BUFFER_BYTES],
}

impl NibbleFramebuffer {
    /// Create a blank framebuffer
    pub const fn new() -> Self {
        Self {
            bytes: [0; BUFFER_BYTES],
        }
    }

    /// Build from raw bytes, dropping any padding bits
    pub fn from_bytes(mut bytes: [u8; BUFFER_BYTES]) -> Self {
        for pair in bytes.chunks_exact_mut(BYTES_PER_ROW) {
            pair[0] &= ROW_FILL[0];
            pair[1] &= ROW_FILL[1];
        }
        Self { bytes }
    }

    /// Raw bytes, two per row
    pub fn as_bytes(&self) -> &[u8; BUFFER_BYTES] {
        &self.bytes
    }
}

impl Framebuffer for NibbleFramebuffer {
    fn set(&mut self, x: i32, y: i32, on: bool) {
        if let Some((x, y)) = in_bounds(x, y) {
            let (byte, bit) = locate(x, y);
            if on {
                self.bytes[byte] |= 1 << bit;
            } else {
                self.bytes[byte] &= !(1 << bit);
            }
        }
    }

    fn get(&self, x: i32, y: i32) -> bool {
        match in_bounds(x, y) {
            Some((x, y)) => {
                let (byte, bit) = locate(x, y);
                self.bytes[byte] & (1 << bit) != 0
            }
            None => false,
        }
    }

    fn fill(&mut self, on: bool) {
        for pair in self.bytes.chunks_exact_mut(BYTES_PER_ROW) {
            if on {
                pair.copy_from_slice(&ROW_FILL);
            } else {
                pair.fill(0);
            }
        }
    }

    fn row_word(&self, row: usize) -> u16 {
        if row >= HEIGHT {
            return 0;
        }
        (0..NIBBLES_PER_ROW).fold(0u16, |word, cell| {
            (word << 4) | u16::from(self.memory_nibble(row * NIBBLES_PER_ROW + cell))
        })
    }

    fn memory_nibble(&self, address: usize) -> u8 {
        // Cells alternate low nibble, high nibble through the bytes
        match self.bytes.get(address / 2) {
            Some(&byte) if address % 2 == 0 => byte & 0x0F,
            Some(&byte) => byte >> 4,
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_reverses_nibbles() {
        assert_eq!(locate(0, 0), (0, 3));
        assert_eq!(locate(3, 0), (0, 0));
        assert_eq!(locate(4, 0), (0, 7));
        assert_eq!(locate(7, 0), (0, 4));
        assert_eq!(locate(8, 0), (1, 3));
        assert_eq!(locate(11, 0), (1, 0));
        assert_eq!(locate(0, 1), (2, 3));
        assert_eq!(locate(11, 11), (23, 0));
    }

    #[test]
    fn test_set_get() {
        let mut fb = NibbleFramebuffer::new();
        fb.set(0, 0, true);
        assert_eq!(fb.as_bytes()[0], 0b0000_1000);
        assert!(fb.get(0, 0));

        fb.set(4, 0, true);
        assert_eq!(fb.as_bytes()[0], 0b1000_1000);

        fb.set(0, 0, false);
        assert_eq!(fb.as_bytes()[0], 0b1000_0000);
        assert!(!fb.get(0, 0));
        assert!(fb.get(4, 0));
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut fb = NibbleFramebuffer::new();
        fb.set(12, 3, true);
        fb.set(3, 12, true);
        fb.set(-5, 3, true);

        assert_eq!(fb, NibbleFramebuffer::new());
        assert!(!fb.get(12, 3));
        assert!(!fb.get(15, 0));
    }

    #[test]
    fn test_fill_keeps_padding_clear() {
        let mut fb = NibbleFramebuffer::new();
        fb.fill(true);
        for pair in fb.as_bytes().chunks_exact(2) {
            assert_eq!(pair, [0xFF, 0x0F]);
        }
        assert_eq!(fb.row_word(5), 0xFFF0);

        fb.fill(false);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_memory_nibble_order() {
        let mut fb = NibbleFramebuffer::new();
        // Row 2: columns 0 and 9
        fb.set(0, 2, true);
        fb.set(9, 2, true);

        assert_eq!(fb.memory_nibble(8), 0b1000);
        assert_eq!(fb.memory_nibble(9), 0);
        assert_eq!(fb.memory_nibble(10), 0b0100);
        assert_eq!(fb.memory_nibble(11), 0);
        assert_eq!(fb.row_word(2), 0x8040);
        assert_eq!(fb.memory_nibble(200), 0);
    }

    #[test]
    fn test_rows_outside_panel_read_zero() {
        let mut fb = NibbleFramebuffer::new();
        fb.fill(true);
        assert_eq!(fb.row_word(HEIGHT - 1), 0xFFF0);
        assert_eq!(fb.row_word(HEIGHT), 0);
        assert_eq!(fb.row_word(usize::MAX), 0);
        assert_eq!(fb.memory_nibble(usize::MAX), 0);
    }
}
