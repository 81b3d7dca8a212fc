//! Configuration types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::framebuffer::BufferLayout;

/// Maximum PWM duty step
pub const MAX_BRIGHTNESS: u8 = 15;

/// How bits reach the HT1632C
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TransportKind {
    /// GPIO bit-banging of CS, WR, DATA and RD
    #[default]
    BitBang,
    /// Hardware SPI with a GPIO chip select
    Spi,
}

impl TransportKind {
    /// Framebuffer layout that suits this transport
    pub const fn preferred_layout(self) -> BufferLayout {
        match self {
            TransportKind::BitBang => BufferLayout::Word,
            TransportKind::Spi => BufferLayout::Nibble,
        }
    }
}

/// System clock source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockMode {
    /// On-chip RC oscillator, clock output on OSC pin
    #[default]
    RcMaster,
    /// External clock input, clock output on OSC pin
    ExtClockMaster,
    /// Clock taken from a master chip
    Slave,
}

/// Row/common driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CommonMode {
    /// N-MOS open drain, 32 ROW x 8 COM
    NMos8,
    /// N-MOS open drain, 24 ROW x 16 COM
    #[default]
    NMos16,
    /// P-MOS open drain, 32 ROW x 8 COM
    PMos8,
    /// P-MOS open drain, 24 ROW x 16 COM
    PMos16,
}

/// GPIO numbers of the four chip lines
///
/// The driver never reads these: it takes already-constructed pins. The
/// map is parsed and stored only so board code can look up which GPIOs
/// to hand it.
///
/// With the SPI transport `data` is MOSI, `wr` is SCK and `rd` is MISO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinMap {
    /// Chip select (active low)
    pub cs: u8,
    /// Serial data
    pub data: u8,
    /// Write clock
    pub wr: u8,
    /// Read clock
    pub rd: u8,
}

impl PinMap {
    /// sino:bit wiring
    pub const SINOBIT: Self = Self {
        cs: 16,
        data: 21,
        wr: 23,
        rd: 22,
    };
}

impl Default for PinMap {
    fn default() -> Self {
        Self::SINOBIT
    }
}

/// SPI bus settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpiSettings {
    /// Clock frequency in Hz
    pub frequency_hz: u32,
    /// SPI mode number (0-3)
    pub mode: u8,
}

impl Default for SpiSettings {
    fn default() -> Self {
        Self {
            frequency_hz: 1_000_000,
            mode: 0,
        }
    }
}

/// Complete display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Transport to the chip
    pub transport: TransportKind,
    /// Framebuffer layout, `None` to follow the transport
    pub layout: Option<BufferLayout>,
    /// PWM duty step; values above 15 are clamped when applied
    pub brightness: u8,
    /// Start with hardware blink enabled
    pub blink: bool,
    /// Clock source
    pub clock: ClockMode,
    /// Common driver mode
    pub common: CommonMode,
    /// Pin assignment, for board code only
    pub pins: PinMap,
    /// SPI bus settings (SPI transport only)
    pub spi: SpiSettings,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::default(),
            layout: None,
            brightness: MAX_BRIGHTNESS,
            blink: false,
            clock: ClockMode::default(),
            common: CommonMode::default(),
            pins: PinMap::default(),
            spi: SpiSettings::default(),
        }
    }
}

impl DisplayConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Framebuffer layout to use
    pub fn layout(&self) -> BufferLayout {
        self.layout.unwrap_or(self.transport.preferred_layout())
    }

    /// Brightness clamped to the chip's range
    pub fn brightness(&self) -> u8 {
        self.brightness.min(MAX_BRIGHTNESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DisplayConfig::new();
        assert_eq!(config.transport, TransportKind::BitBang);
        assert_eq!(config.layout(), BufferLayout::Word);
        assert_eq!(config.brightness(), 15);
        assert!(!config.blink);
        assert_eq!(config.clock, ClockMode::RcMaster);
        assert_eq!(config.common, CommonMode::NMos16);
        assert_eq!(config.pins.cs, 16);
        assert_eq!(config.pins.data, 21);
        assert_eq!(config.pins.rd, 22);
        assert_eq!(config.pins.wr, 23);
        assert_eq!(config.spi.frequency_hz, 1_000_000);
        assert_eq!(config.spi.mode, 0);
    }

    #[test]
    fn test_layout_follows_transport() {
        let mut config = DisplayConfig::new();
        config.transport = TransportKind::Spi;
        assert_eq!(config.layout(), BufferLayout::Nibble);

        config.layout = Some(BufferLayout::Word);
        assert_eq!(config.layout(), BufferLayout::Word);
    }

    #[test]
    fn test_brightness_clamped() {
        let mut config = DisplayConfig::new();
        config.brightness = 200;
        assert_eq!(config.brightness(), 15);
        config.brightness = 3;
        assert_eq!(config.brightness(), 3);
    }
}
