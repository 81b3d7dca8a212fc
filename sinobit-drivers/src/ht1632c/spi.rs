//! SPI transport
//!
//! The bus only moves whole bytes, so each frame is padded to 16 bits and
//! sent as two bytes inside its own chip select. The chip ignores the
//! trailing clocks. A 16-bit write frame carries a single 4-bit cell, so
//! a full framebuffer is 48 transactions.

use sinobit_core::config::SpiSettings;
use sinobit_core::framebuffer::FRAME_NIBBLES;
use sinobit_core::Framebuffer;
use sinobit_hal::spi::{Mode, Phase, Polarity};
use sinobit_hal::{OutputPin, SpiBus, SpiConfig};

use super::frame::Frame;
use super::{Transport, MEMORY_NIBBLES};

/// Bus setup the chip needs: 8-bit words, mode 0, 1 MHz
pub const BUS_CONFIG: SpiConfig = SpiConfig {
    frequency: 1_000_000,
    word_size: 8,
    polarity: Polarity::IdleLow,
    phase: Phase::CaptureOnFirstTransition,
};

/// HT1632C over an SPI bus with a GPIO chip select
pub struct SpiTransport<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> SpiTransport<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Bus setup the chip needs
    pub const BUS_CONFIG: SpiConfig = BUS_CONFIG;

    /// Take the bus and chip select, leaving the chip deselected
    ///
    /// The bus must already be configured, normally with [`BUS_CONFIG`].
    pub fn new(spi: SPI, mut cs: CS) -> Self {
        cs.set_high();
        Self { spi, cs }
    }

    /// Bus setup for configured settings
    ///
    /// Returns `None` if the SPI mode number is not 0-3.
    pub fn bus_config(settings: &SpiSettings) -> Option<SpiConfig> {
        Mode::from_number(settings.mode).map(|mode| SpiConfig::new(settings.frequency_hz, mode))
    }

    /// One chip-select bracketed transfer
    ///
    /// Chip select is released even when the bus write fails.
    fn transaction(&mut self, bytes: &[u8]) -> Result<(), SPI::Error> {
        self.cs.set_low();
        let result = self.spi.write(bytes);
        self.cs.set_high();
        result
    }

    /// Give the bus and chip select back
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI, CS> Transport for SpiTransport<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    type Error = SPI::Error;

    fn send(&mut self, frame: Frame) -> Result<(), Self::Error> {
        self.transaction(&frame.to_bytes())
    }

    fn write_frame<F: Framebuffer + ?Sized>(&mut self, fb: &F) -> Result<(), Self::Error> {
        for address in 0..FRAME_NIBBLES {
            self.send(Frame::Write {
                address: address as u8,
                data: fb.memory_nibble(address),
            })?;
        }
        Ok(())
    }

    fn clear_memory(&mut self) -> Result<(), Self::Error> {
        for address in 0..MEMORY_NIBBLES {
            self.send(Frame::Write {
                address: address as u8,
                data: 0,
            })?;
        }
        Ok(())
    }
}
