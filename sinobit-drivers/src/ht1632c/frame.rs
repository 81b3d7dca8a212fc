//! Protocol frame encoding
//!
//! Every HT1632C transfer starts with a 3-bit mode ID:
//!
//! ```text
//! command  1 0 0  C7 .. C0  X           12 bits
//! write    1 0 1  A6 .. A0  D0 .. D3    14 bits
//! read     1 1 0  A6 .. A0  (chip drives D0 .. D3)
//! ```
//!
//! Frames are kept left-aligned in a `u16`: the first bit on the wire is
//! bit 15. Trailing bits past the frame length are zero, and the chip
//! ignores extra clocks after a complete frame, so an 8-bit SPI bus can
//! send the whole word as two bytes.

use super::command::Command;

/// Mode ID of a command frame
pub const ID_COMMAND: u8 = 0b100;

/// Mode ID of a write frame
pub const ID_WRITE: u8 = 0b101;

/// Mode ID of a read frame
pub const ID_READ: u8 = 0b110;

/// Display memory addresses are 7 bits wide
pub const ADDRESS_MASK: u8 = 0x7F;

/// Bits in a mode ID plus address
pub const HEADER_BITS: u8 = 10;

/// Mode ID and 7-bit address, left-aligned
pub const fn header(id: u8, address: u8) -> u16 {
    ((id as u16) << 13) | (((address & ADDRESS_MASK) as u16) << 6)
}

/// One protocol frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Frame {
    /// A command
    Command(Command),
    /// Write one 4-bit memory cell
    ///
    /// `data` is in wire order: bit 3 is D0.
    Write {
        /// Cell address (7 bits)
        address: u8,
        /// Cell contents (4 bits)
        data: u8,
    },
}

impl Frame {
    /// Number of meaningful bits
    pub const fn bit_len(&self) -> u8 {
        match self {
            Frame::Command(_) => 12,
            Frame::Write { .. } => 14,
        }
    }

    /// Frame bits, left-aligned
    pub const fn word(&self) -> u16 {
        match *self {
            Frame::Command(command) => header(ID_COMMAND, 0) | ((command.opcode() as u16) << 5),
            Frame::Write { address, data } => {
                header(ID_WRITE, address) | (((data & 0x0F) as u16) << 2)
            }
        }
    }

    /// Frame as two bytes, high byte first
    pub const fn to_bytes(&self) -> [u8; 2] {
        self.word().to_be_bytes()
    }
}

impl From<Command> for Frame {
    fn from(command: Command) -> Self {
        Frame::Command(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ht1632c::command::Brightness;
    use sinobit_core::config::CommonMode;

    #[test]
    fn test_command_word() {
        // (0x0400 | opcode) << 5
        for command in [
            Command::SysDis,
            Command::SysEn,
            Command::LedOn,
            Command::Common(CommonMode::NMos16),
            Command::Pwm(Brightness::MAX),
        ] {
            let expected = (0x0400u16 | u16::from(command.opcode())) << 5;
            assert_eq!(Frame::Command(command).word(), expected);
        }
        assert_eq!(Frame::Command(Command::SysEn).to_bytes(), [0x80, 0x20]);
        assert_eq!(Frame::Command(Command::LedOn).to_bytes(), [0x80, 0x60]);
    }

    #[test]
    fn test_command_trailing_bits_clear() {
        let word = Frame::Command(Command::Pwm(Brightness::MAX)).word();
        assert_eq!(word & 0x001F, 0);
        assert_eq!(word >> 13, u16::from(ID_COMMAND));
    }

    #[test]
    fn test_write_word() {
        // (0x2800 | (address & 0x7F) << 4 | (data & 0xF)) << 2
        for (address, data) in [(0u8, 0u8), (5, 0x9), (47, 0xF), (0x7F, 0x3)] {
            let expected = (0x2800u16 | u16::from(address & 0x7F) << 4 | u16::from(data & 0xF)) << 2;
            assert_eq!(Frame::Write { address, data }.word(), expected);
        }
        assert_eq!(Frame::Write { address: 1, data: 0x8 }.to_bytes(), [0xA0, 0x60]);
    }

    #[test]
    fn test_write_masks_fields() {
        let masked = Frame::Write {
            address: 0x80 | 3,
            data: 0xF5,
        };
        let clean = Frame::Write { address: 3, data: 5 };
        assert_eq!(masked.word(), clean.word());
    }

    #[test]
    fn test_header() {
        assert_eq!(header(ID_WRITE, 0), 0xA000);
        assert_eq!(header(ID_READ, 4), 0xC000 | (4 << 6));
        assert_eq!(Frame::Command(Command::SysDis).bit_len(), 12);
        assert_eq!(Frame::Write { address: 0, data: 0 }.bit_len(), 14);
    }
}
