//! Row-word framebuffer layout

use super::{in_bounds, Framebuffer, HEIGHT, ROW_MASK};

/// Framebuffer packed as one 16-bit word per row
///
/// Column `x` of row `y` is bit `15 - x` of `rows[y]`. Bits 3..0 stand for
/// the unwired columns 12..15 and are never set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WordFramebuffer {
    rows: [u16; HEIGHT],
}

impl WordFramebuffer {
    /// Create a blank framebuffer
    pub const fn new() -> Self {
        Self { rows: [0; HEIGHT] }
    }

    /// Build from raw row words, dropping any padding bits
    pub fn from_rows(rows: [u16; HEIGHT]) -> Self {
        Self {
            rows: rows.map(|row| row & ROW_MASK),
        }
    }

    /// Raw row words
    pub fn rows(&self) -> &[u16; HEIGHT] {
        &self.rows
    }
}

impl Framebuffer for WordFramebuffer {
    fn set(&mut self, x: i32, y: i32, on: bool) {
        if let Some((x, y)) = in_bounds(x, y) {
            let mask = 0x8000 >> x;
            if on {
                self.rows[y] |= mask;
            } else {
                self.rows[y] &= !mask;
            }
        }
    }

    fn get(&self, x: i32, y: i32) -> bool {
        match in_bounds(x, y) {
            Some((x, y)) => self.rows[y] & (0x8000 >> x) != 0,
            None => false,
        }
    }

    fn fill(&mut self, on: bool) {
        let row = if on { ROW_MASK } else { 0 };
        self.rows = [row; HEIGHT];
    }

    fn row_word(&self, row: usize) -> u16 {
        self.rows.get(row).copied().unwrap_or(0)
    }
}
