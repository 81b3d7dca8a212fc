//! Holtek HT1632C LED driver
//!
//! The HT1632C has a 96-cell, 4-bit display memory and a 3-wire serial
//! interface (CS, WR, DATA, plus RD for read-back). The sinobit panel uses
//! it in N-MOS 24 ROW x 16 COM mode with only 12 x 12 LEDs fitted.
//!
//! Two transports move frames to the chip:
//!
//! - [`BitBang`]: GPIO toggling, one chip select per frame, and the whole
//!   framebuffer streamed in a single auto-incrementing write
//! - [`SpiTransport`]: an 8-bit SPI bus, one two-byte transaction per frame
//!   and one frame per memory cell
//!
//! [`Ht1632c`] sits on either transport and owns the framebuffer.

mod bitbang;
mod command;
mod driver;
mod frame;
mod spi;

pub use bitbang::BitBang;
pub use command::{opcode, Brightness, Command};
pub use driver::Ht1632c;
pub use frame::{header, Frame, ADDRESS_MASK, HEADER_BITS, ID_COMMAND, ID_READ, ID_WRITE};
pub use spi::{SpiTransport, BUS_CONFIG};

use sinobit_core::Framebuffer;

/// Display memory cells (24 rows x 4 cells)
pub const MEMORY_NIBBLES: usize = 96;

/// A way of delivering protocol frames to the chip
///
/// Transports never retry: the chip has no acknowledge to retry against.
pub trait Transport {
    /// Error type for bus operations
    type Error;

    /// Send a single frame inside its own chip select
    fn send(&mut self, frame: Frame) -> Result<(), Self::Error>;

    /// Send a command
    fn command(&mut self, command: Command) -> Result<(), Self::Error> {
        self.send(Frame::Command(command))
    }

    /// Copy the visible rows of `fb` into display memory
    fn write_frame<F: Framebuffer + ?Sized>(&mut self, fb: &F) -> Result<(), Self::Error>;

    /// Zero the whole display memory, including rows the panel does not use
    fn clear_memory(&mut self) -> Result<(), Self::Error>;
}

impl<T: Transport> Transport for &mut T {
    type Error = T::Error;

    fn send(&mut self, frame: Frame) -> Result<(), Self::Error> {
        (**self).send(frame)
    }

    fn write_frame<F: Framebuffer + ?Sized>(&mut self, fb: &F) -> Result<(), Self::Error> {
        (**self).write_frame(fb)
    }

    fn clear_memory(&mut self) -> Result<(), Self::Error> {
        (**self).clear_memory()
    }
}
