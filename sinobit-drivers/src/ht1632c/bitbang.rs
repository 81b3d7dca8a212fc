//! Bit-banged GPIO transport
//!
//! The chip samples DATA on the rising edge of WR, so every bit is sent as
//! WR low, DATA set, WR high. Nothing else may be reordered: there is no
//! independent clock, and a late DATA change lands in the shift register.
//!
//! Writes use the chip's address auto-increment: after one `101` header
//! with address 0, the 12 row words follow back to back inside a single
//! chip select.

use core::convert::Infallible;

use sinobit_core::framebuffer::{HEIGHT, NIBBLES_PER_ROW};
use sinobit_core::Framebuffer;
use sinobit_hal::{DataPin, OutputPin};

use super::frame::{header, Frame, ADDRESS_MASK, HEADER_BITS, ID_READ, ID_WRITE};
use super::{Transport, MEMORY_NIBBLES};

/// HT1632C over four GPIO lines
pub struct BitBang<CS, WR, DATA, RD> {
    cs: CS,
    wr: WR,
    data: DATA,
    rd: RD,
}

impl<CS, WR, DATA, RD> BitBang<CS, WR, DATA, RD>
where
    CS: OutputPin,
    WR: OutputPin,
    DATA: DataPin,
    RD: OutputPin,
{
    /// Take the pins and park every control line idle (high)
    pub fn new(mut cs: CS, mut wr: WR, mut data: DATA, mut rd: RD) -> Self {
        cs.set_high();
        wr.set_high();
        rd.set_high();
        data.set_as_output();
        Self { cs, wr, data, rd }
    }

    /// Drive DATA and assert chip select
    pub fn select(&mut self) {
        self.data.set_as_output();
        self.cs.set_low();
    }

    /// Clock one bit into the chip
    #[inline]
    pub fn clock_bit(&mut self, bit: bool) {
        self.wr.set_low();
        self.data.set_state(bit);
        self.wr.set_high();
    }

    /// Clock the top `count` bits of `word`, most significant first
    pub fn clock_bits(&mut self, word: u16, count: u8) {
        for i in 0..count.min(16) {
            self.clock_bit(word & (0x8000 >> i) != 0);
        }
    }

    /// Release chip select
    pub fn deselect(&mut self) {
        self.cs.set_high();
    }

    /// Read one bit driven by the chip
    fn read_bit(&mut self) -> bool {
        self.rd.set_low();
        let bit = self.data.is_high();
        self.rd.set_high();
        bit
    }

    /// Read back four memory cells starting at `4 * row`
    ///
    /// The result is laid out like a row word: the first bit the chip
    /// shifts out (D0 of the first cell) is bit 15.
    pub fn read_row(&mut self, row: u8) -> u16 {
        let address = row.wrapping_mul(NIBBLES_PER_ROW as u8) & ADDRESS_MASK;

        self.select();
        self.clock_bits(header(ID_READ, address), HEADER_BITS);
        self.data.set_as_input();

        let mut word = 0u16;
        for _ in 0..16 {
            word = (word << 1) | u16::from(self.read_bit());
        }

        self.data.set_as_output();
        self.deselect();

        #[cfg(feature = "defmt")]
        defmt::trace!("HT1632C read row {}: {:04x}", row, word);

        word
    }

    /// Give the pins back
    pub fn release(self) -> (CS, WR, DATA, RD) {
        (self.cs, self.wr, self.data, self.rd)
    }
}

impl<CS, WR, DATA, RD> Transport for BitBang<CS, WR, DATA, RD>
where
    CS: OutputPin,
    WR: OutputPin,
    DATA: DataPin,
    RD: OutputPin,
{
    type Error = Infallible;

    fn send(&mut self, frame: Frame) -> Result<(), Self::Error> {
        self.select();
        self.clock_bits(frame.word(), frame.bit_len());
        self.deselect();
        Ok(())
    }

    fn write_frame<F: Framebuffer + ?Sized>(&mut self, fb: &F) -> Result<(), Self::Error> {
        self.select();
        self.clock_bits(header(ID_WRITE, 0), HEADER_BITS);
        for row in 0..HEIGHT {
            self.clock_bits(fb.row_word(row), 16);
        }
        self.deselect();
        Ok(())
    }

    fn clear_memory(&mut self) -> Result<(), Self::Error> {
        self.select();
        self.clock_bits(header(ID_WRITE, 0), HEADER_BITS);
        for _ in 0..MEMORY_NIBBLES {
            self.clock_bits(0, 4);
        }
        self.deselect();
        Ok(())
    }
}
