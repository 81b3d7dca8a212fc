//! Drawing through the facade and checking what reaches the wire

use sinobit_core::font::BUILTIN;
use sinobit_core::framebuffer::{HEIGHT, WIDTH};
use sinobit_display::{Display, DisplayBackend};
use sinobit_drivers::mock::{Line, MockDataPin, MockPin, MockSpi, Transaction, WireLog};
use sinobit_drivers::{BitBang, Ht1632c, SpiTransport};

type GpioDisplay<'a> =
    Display<Ht1632c<BitBang<MockPin<'a>, MockPin<'a>, MockDataPin<'a>, MockPin<'a>>>>;

fn gpio_display(log: &WireLog) -> GpioDisplay<'_> {
    let bus = BitBang::new(
        MockPin::new(log, Line::Cs),
        MockPin::new(log, Line::Wr),
        MockDataPin::new(log),
        MockPin::new(log, Line::Rd),
    );
    let mut display = Display::new(Ht1632c::new(bus));
    display.backend_mut().init().unwrap();
    log.clear();
    display
}

/// Row words carried by a bit-banged write transaction
fn rows(frame: &Transaction) -> [u16; HEIGHT] {
    let mut rows = [0u16; HEIGHT];
    for (row, word) in rows.iter_mut().enumerate() {
        *word = frame.field(10 + row * 16, 16) as u16;
    }
    rows
}

#[test]
fn glyph_reaches_the_wire_transposed() {
    let log = WireLog::new();
    let mut display = gpio_display(&log);

    display.text_char(0, 0, 'A');
    display.write().unwrap();

    let glyph = BUILTIN.find_character('A' as u32).unwrap();
    let mut expected = [0u16; HEIGHT];
    for (y, word) in expected.iter_mut().enumerate() {
        for x in 0..WIDTH.min(11) {
            // Glyph pixel (gx, gy) lands on framebuffer column gy, row gx
            if y < 11 && glyph.pixel(y, x) {
                *word |= 0x8000 >> x;
            }
        }
    }

    let transactions = log.transactions();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].field(0, 3), 0b101);
    assert_eq!(rows(&transactions[0]), expected);
    assert_ne!(expected, [0u16; HEIGHT]);
}

#[test]
fn pixel_lands_on_its_row_word() {
    let log = WireLog::new();
    let mut display = gpio_display(&log);

    display.set_pixel(3, 7, true);
    display.write().unwrap();

    let words = rows(&log.transactions()[0]);
    for (row, word) in words.iter().enumerate() {
        let expected = if row == 7 { 0x8000 >> 3 } else { 0 };
        assert_eq!(*word, expected, "row {}", row);
    }
}

#[test]
fn brightness_above_range_matches_maximum() {
    let log = WireLog::new();
    let mut display = gpio_display(&log);

    display.brightness(20).unwrap();
    let high = log.transactions();
    log.clear();

    display.brightness(15).unwrap();
    let max = log.transactions();

    assert_eq!(high.len(), 1);
    assert_eq!(high[0].bits, max[0].bits);
    assert_eq!(high[0].field(3, 8), 0xAF);
}

#[test]
fn negative_brightness_is_darkest() {
    let log = WireLog::new();
    let mut display = gpio_display(&log);

    display.brightness(-5).unwrap();
    assert_eq!(log.transactions()[0].field(3, 8), 0xA0);
    assert_eq!(display.backend().brightness().get(), 0);
}

#[test]
fn clear_does_not_touch_the_wire() {
    let log = WireLog::new();
    let mut display = gpio_display(&log);

    display.fill(true);
    display.clear();
    assert!(log.transactions().is_empty());

    display.write().unwrap();
    assert_eq!(rows(&log.transactions()[0]), [0u16; HEIGHT]);
}

#[test]
fn spi_display_sends_one_frame_per_cell() {
    let log = WireLog::new();
    let bus = SpiTransport::new(MockSpi::new(&log), MockPin::new(&log, Line::Cs));
    let mut display = Display::new(Ht1632c::new(bus));
    display.backend_mut().init().unwrap();
    log.clear();

    display.set_pixel(0, 0, true);
    display.write().unwrap();

    let transactions = log.transactions();
    assert_eq!(transactions.len(), 48);
    // Column 0 is D0, the top data bit of the first cell
    assert_eq!(transactions[0].spi_word(), (0x2800 | 0b1000) << 2);
    assert!(transactions[1..]
        .iter()
        .all(|frame| frame.spi_word() & 0x3C == 0));
}

#[test]
fn text_cursor_and_dimensions() {
    let log = WireLog::new();
    let mut display = gpio_display(&log);

    let width = display.text_width("Hi") as i32;
    assert_eq!(display.text(1, 0, "Hi"), 1 + width);
    assert_eq!(display.backend().dimensions(), (12, 12));
}
