//! Built-in glyph table
//!
//! Printable ASCII plus the degree sign, drawn as 5x8 column bitmaps
//! (bit 0 at the top, bit 7 for descenders) and packed into 11x11 glyph
//! records at compile time. Blank leading and trailing columns are
//! trimmed so narrow characters get a narrow advance.

use super::{glyph_bit, Font, Glyph, GLYPH_BYTES};

/// Rows of blank space above the 5x8 cell inside the 11x11 glyph
const TOP: usize = 2;

/// Advance width of glyphs with no ink (space)
const BLANK_ADVANCE: u8 = 4;

/// Pack a 5x8 column bitmap into a glyph record
const fn glyph(code: u16, columns: [u8; 5]) -> Glyph {
    let mut first = 0;
    while first < columns.len() && columns[first] == 0 {
        first += 1;
    }
    let mut last = columns.len();
    while last > first && columns[last - 1] == 0 {
        last -= 1;
    }

    let mut data = [0u8; GLYPH_BYTES];
    let mut column = first;
    while column < last {
        let mut row = 0;
        while row < 8 {
            if columns[column] & (1 << row) != 0 {
                let (byte, bit) = glyph_bit(column - first, row + TOP);
                data[byte] |= 1 << bit;
            }
            row += 1;
        }
        column += 1;
    }

    let advance = if last > first {
        (last - first + 1) as u8
    } else {
        BLANK_ADVANCE
    };
    data[GLYPH_BYTES - 1] |= advance & 0x0F;

    Glyph::new(code, data)
}

static GLYPHS: [Glyph; 96] = [
    glyph(0x20, [0x00, 0x00, 0x00, 0x00, 0x00]), // space
    glyph(0x21, [0x00, 0x00, 0x5F, 0x00, 0x00]), // !
    glyph(0x22, [0x00, 0x07, 0x00, 0x07, 0x00]), // "
    glyph(0x23, [0x14, 0x7F, 0x14, 0x7F, 0x14]), // #
    glyph(0x24, [0x24, 0x2A, 0x7F, 0x2A, 0x12]), // $
    glyph(0x25, [0x23, 0x13, 0x08, 0x64, 0x62]), // %
    glyph(0x26, [0x36, 0x49, 0x56, 0x20, 0x50]), // &
    glyph(0x27, [0x00, 0x08, 0x07, 0x03, 0x00]), // '
    glyph(0x28, [0x00, 0x1C, 0x22, 0x41, 0x00]), // (
    glyph(0x29, [0x00, 0x41, 0x22, 0x1C, 0x00]), // )
    glyph(0x2A, [0x2A, 0x1C, 0x7F, 0x1C, 0x2A]), // *
    glyph(0x2B, [0x08, 0x08, 0x3E, 0x08, 0x08]), // +
    glyph(0x2C, [0x00, 0x80, 0x70, 0x30, 0x00]), // ,
    glyph(0x2D, [0x08, 0x08, 0x08, 0x08, 0x08]), // -
    glyph(0x2E, [0x00, 0x00, 0x60, 0x60, 0x00]), // .
    glyph(0x2F, [0x20, 0x10, 0x08, 0x04, 0x02]), // /
    glyph(0x30, [0x3E, 0x51, 0x49, 0x45, 0x3E]), // 0
    glyph(0x31, [0x00, 0x42, 0x7F, 0x40, 0x00]), // 1
    glyph(0x32, [0x72, 0x49, 0x49, 0x49, 0x46]), // 2
    glyph(0x33, [0x21, 0x41, 0x49, 0x4D, 0x33]), // 3
    glyph(0x34, [0x18, 0x14, 0x12, 0x7F, 0x10]), // 4
    glyph(0x35, [0x27, 0x45, 0x45, 0x45, 0x39]), // 5
    glyph(0x36, [0x3C, 0x4A, 0x49, 0x49, 0x31]), // 6
    glyph(0x37, [0x41, 0x21, 0x11, 0x09, 0x07]), // 7
    glyph(0x38, [0x36, 0x49, 0x49, 0x49, 0x36]), // 8
    glyph(0x39, [0x46, 0x49, 0x49, 0x29, 0x1E]), // 9
    glyph(0x3A, [0x00, 0x00, 0x14, 0x00, 0x00]), // :
    glyph(0x3B, [0x00, 0x40, 0x34, 0x00, 0x00]), // ;
    glyph(0x3C, [0x00, 0x08, 0x14, 0x22, 0x41]), // <
    glyph(0x3D, [0x14, 0x14, 0x14, 0x14, 0x14]), // =
    glyph(0x3E, [0x00, 0x41, 0x22, 0x14, 0x08]), // >
    glyph(0x3F, [0x02, 0x01, 0x59, 0x09, 0x06]), // ?
    glyph(0x40, [0x3E, 0x41, 0x5D, 0x59, 0x4E]), // @
    glyph(0x41, [0x7C, 0x12, 0x11, 0x12, 0x7C]), // A
    glyph(0x42, [0x7F, 0x49, 0x49, 0x49, 0x36]), // B
    glyph(0x43, [0x3E, 0x41, 0x41, 0x41, 0x22]), // C
    glyph(0x44, [0x7F, 0x41, 0x41, 0x41, 0x3E]), // D
    glyph(0x45, [0x7F, 0x49, 0x49, 0x49, 0x41]), // E
    glyph(0x46, [0x7F, 0x09, 0x09, 0x09, 0x01]), // F
    glyph(0x47, [0x3E, 0x41, 0x41, 0x51, 0x73]), // G
    glyph(0x48, [0x7F, 0x08, 0x08, 0x08, 0x7F]), // H
    glyph(0x49, [0x00, 0x41, 0x7F, 0x41, 0x00]), // I
    glyph(0x4A, [0x20, 0x40, 0x41, 0x3F, 0x01]), // J
    glyph(0x4B, [0x7F, 0x08, 0x14, 0x22, 0x41]), // K
    glyph(0x4C, [0x7F, 0x40, 0x40, 0x40, 0x40]), // L
    glyph(0x4D, [0x7F, 0x02, 0x1C, 0x02, 0x7F]), // M
    glyph(0x4E, [0x7F, 0x04, 0x08, 0x10, 0x7F]), // N
    glyph(0x4F, [0x3E, 0x41, 0x41, 0x41, 0x3E]), // O
    glyph(0x50, [0x7F, 0x09, 0x09, 0x09, 0x06]), // P
    glyph(0x51, [0x3E, 0x41, 0x51, 0x21, 0x5E]), // Q
    glyph(0x52, [0x7F, 0x09, 0x19, 0x29, 0x46]), // R
    glyph(0x53, [0x26, 0x49, 0x49, 0x49, 0x32]), // S
    glyph(0x54, [0x03, 0x01, 0x7F, 0x01, 0x03]), // T
    glyph(0x55, [0x3F, 0x40, 0x40, 0x40, 0x3F]), // U
    glyph(0x56, [0x1F, 0x20, 0x40, 0x20, 0x1F]), // V
    glyph(0x57, [0x3F, 0x40, 0x38, 0x40, 0x3F]), // W
    glyph(0x58, [0x63, 0x14, 0x08, 0x14, 0x63]), // X
    glyph(0x59, [0x03, 0x04, 0x78, 0x04, 0x03]), // Y
    glyph(0x5A, [0x61, 0x59, 0x49, 0x4D, 0x43]), // Z
    glyph(0x5B, [0x00, 0x7F, 0x41, 0x41, 0x41]), // [
    glyph(0x5C, [0x02, 0x04, 0x08, 0x10, 0x20]), // backslash
    glyph(0x5D, [0x00, 0x41, 0x41, 0x41, 0x7F]), // ]
    glyph(0x5E, [0x04, 0x02, 0x01, 0x02, 0x04]), // ^
    glyph(0x5F, [0x40, 0x40, 0x40, 0x40, 0x40]), // _
    glyph(0x60, [0x00, 0x03, 0x07, 0x08, 0x00]), // `
    glyph(0x61, [0x20, 0x54, 0x54, 0x78, 0x40]), // a
    glyph(0x62, [0x7F, 0x28, 0x44, 0x44, 0x38]), // b
    glyph(0x63, [0x38, 0x44, 0x44, 0x44, 0x28]), // c
    glyph(0x64, [0x38, 0x44, 0x44, 0x28, 0x7F]), // d
    glyph(0x65, [0x38, 0x54, 0x54, 0x54, 0x18]), // e
    glyph(0x66, [0x00, 0x08, 0x7E, 0x09, 0x02]), // f
    glyph(0x67, [0x18, 0xA4, 0xA4, 0x9C, 0x78]), // g
    glyph(0x68, [0x7F, 0x08, 0x04, 0x04, 0x78]), // h
    glyph(0x69, [0x00, 0x44, 0x7D, 0x40, 0x00]), // i
    glyph(0x6A, [0x20, 0x40, 0x40, 0x3D, 0x00]), // j
    glyph(0x6B, [0x7F, 0x10, 0x28, 0x44, 0x00]), // k
    glyph(0x6C, [0x00, 0x41, 0x7F, 0x40, 0x00]), // l
    glyph(0x6D, [0x7C, 0x04, 0x78, 0x04, 0x78]), // m
    glyph(0x6E, [0x7C, 0x08, 0x04, 0x04, 0x78]), // n
    glyph(0x6F, [0x38, 0x44, 0x44, 0x44, 0x38]), // o
    glyph(0x70, [0xFC, 0x18, 0x24, 0x24, 0x18]), // p
    glyph(0x71, [0x18, 0x24, 0x24, 0x18, 0xFC]), // q
    glyph(0x72, [0x7C, 0x08, 0x04, 0x04, 0x08]), // r
    glyph(0x73, [0x48, 0x54, 0x54, 0x54, 0x24]), // s
    glyph(0x74, [0x04, 0x04, 0x3F, 0x44, 0x24]), // t
    glyph(0x75, [0x3C, 0x40, 0x40, 0x20, 0x7C]), // u
    glyph(0x76, [0x1C, 0x20, 0x40, 0x20, 0x1C]), // v
    glyph(0x77, [0x3C, 0x40, 0x30, 0x40, 0x3C]), // w
    glyph(0x78, [0x44, 0x28, 0x10, 0x28, 0x44]), // x
    glyph(0x79, [0x4C, 0x90, 0x90, 0x90, 0x7C]), // y
    glyph(0x7A, [0x44, 0x64, 0x54, 0x4C, 0x44]), // z
    glyph(0x7B, [0x00, 0x08, 0x36, 0x41, 0x00]), // {
    glyph(0x7C, [0x00, 0x00, 0x77, 0x00, 0x00]), // |
    glyph(0x7D, [0x00, 0x41, 0x36, 0x08, 0x00]), // }
    glyph(0x7E, [0x02, 0x01, 0x02, 0x04, 0x02]), // ~
    glyph(0xB0, [0x00, 0x06, 0x09, 0x09, 0x06]), // degree sign
];

/// Font covering printable ASCII and the degree sign
pub static BUILTIN: Font = Font::new(&GLYPHS);
