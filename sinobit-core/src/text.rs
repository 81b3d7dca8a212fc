//! Glyph rendering
//!
//! The panel is mounted rotated against the chip's addressing, so glyph
//! pixel (x, y) lands on framebuffer pixel `(y0 + y, x0 + x)`. The text
//! cursor `x0` therefore walks down framebuffer rows, which reads left to
//! right on the physical panel.
//!
//! Rendering only ever lights pixels. Anything already on the
//! framebuffer shows through the gaps in a glyph.

use crate::font::{Font, Glyph, GLYPH_SIZE};
use crate::framebuffer::Framebuffer;

/// Cursor advance for a code point the font does not cover
pub const MISSING_GLYPH_ADVANCE: u32 = 11;

/// Draw one glyph with its origin at `(x0, y0)`
///
/// Pixels falling outside the panel are dropped.
pub fn draw_glyph<F: Framebuffer + ?Sized>(fb: &mut F, x0: i32, y0: i32, glyph: &Glyph) {
    for y in 0..GLYPH_SIZE {
        for x in 0..GLYPH_SIZE {
            if glyph.pixel(x, y) {
                fb.set(
                    y0.saturating_add(y as i32),
                    x0.saturating_add(x as i32),
                    true,
                );
            }
        }
    }
}

/// Draw the glyph for `code`, or nothing if the font lacks it
pub fn draw_char<F: Framebuffer + ?Sized>(fb: &mut F, font: &Font, x0: i32, y0: i32, code: u32) {
    if let Some(glyph) = font.find_character(code) {
        draw_glyph(fb, x0, y0, glyph);
    }
}

/// Draw `text` starting at `(x0, y0)` and return the final cursor position
///
/// Characters the font does not cover draw nothing and advance the cursor
/// by [`MISSING_GLYPH_ADVANCE`].
pub fn draw_string<F: Framebuffer + ?Sized>(
    fb: &mut F,
    font: &Font,
    x0: i32,
    y0: i32,
    text: &str,
) -> i32 {
    let mut cursor = x0;
    for c in text.chars() {
        let advance = match font.find_character(c as u32) {
            Some(glyph) => {
                draw_glyph(fb, cursor, y0, glyph);
                u32::from(glyph.advance())
            }
            None => MISSING_GLYPH_ADVANCE,
        };
        cursor = cursor.saturating_add(advance as i32);
    }
    cursor
}

/// Total cursor advance `text` would take, without drawing
pub fn measure_string(font: &Font, text: &str) -> u32 {
    text.chars()
        .map(|c| {
            font.find_character(c as u32)
                .map_or(MISSING_GLYPH_ADVANCE, |glyph| u32::from(glyph.advance()))
        })
        .fold(0u32, u32::saturating_add)
}
