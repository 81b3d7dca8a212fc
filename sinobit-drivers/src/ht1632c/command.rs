//! HT1632C command set

use sinobit_core::config::{ClockMode, CommonMode, MAX_BRIGHTNESS};

/// Command opcodes (the 8 bits after the `100` command prefix)
pub mod opcode {
    /// Turn off system oscillator and LED duty cycle generator
    pub const SYS_DIS: u8 = 0x00;
    /// Turn on system oscillator
    pub const SYS_EN: u8 = 0x01;
    /// Turn off LED duty cycle generator
    pub const LED_OFF: u8 = 0x02;
    /// Turn on LED duty cycle generator
    pub const LED_ON: u8 = 0x03;
    /// Turn off blinking
    pub const BLINK_OFF: u8 = 0x08;
    /// Turn on blinking
    pub const BLINK_ON: u8 = 0x09;
    /// Clock from a master chip
    pub const SLAVE_MODE: u8 = 0x10;
    /// On-chip RC oscillator, clock output on OSC
    pub const RC_MASTER_MODE: u8 = 0x18;
    /// External clock, clock output on OSC
    pub const EXT_CLK_MASTER_MODE: u8 = 0x1C;
    /// COM option base; bit 3 selects P-MOS, bit 2 selects 16 COM
    pub const COM_OPTION: u8 = 0x20;
    /// PWM duty base; low 4 bits hold the duty step
    pub const PWM_CONTROL: u8 = 0xA0;
}

/// PWM duty step, always within `0..=15`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness(u8);

impl Brightness {
    /// Dimmest setting (1/16 duty)
    pub const MIN: Self = Self(0);

    /// Full brightness (16/16 duty)
    pub const MAX: Self = Self(MAX_BRIGHTNESS);

    /// Create a brightness level, clamping values above 15
    pub const fn new(level: u8) -> Self {
        if level > MAX_BRIGHTNESS {
            Self::MAX
        } else {
            Self(level)
        }
    }

    /// Duty step
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::MAX
    }
}

impl From<u8> for Brightness {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

/// One HT1632C command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Stop the system oscillator
    SysDis,
    /// Start the system oscillator
    SysEn,
    /// Blank the LEDs
    LedOff,
    /// Drive the LEDs
    LedOn,
    /// Stop hardware blink
    BlinkOff,
    /// Start hardware blink
    BlinkOn,
    /// Select the clock source
    Clock(ClockMode),
    /// Select the row/common driver mode
    Common(CommonMode),
    /// Set the PWM duty
    Pwm(Brightness),
}

impl Command {
    /// 8-bit opcode of this command
    pub const fn opcode(self) -> u8 {
        match self {
            Command::SysDis => opcode::SYS_DIS,
            Command::SysEn => opcode::SYS_EN,
            Command::LedOff => opcode::LED_OFF,
            Command::LedOn => opcode::LED_ON,
            Command::BlinkOff => opcode::BLINK_OFF,
            Command::BlinkOn => opcode::BLINK_ON,
            Command::Clock(ClockMode::RcMaster) => opcode::RC_MASTER_MODE,
            Command::Clock(ClockMode::ExtClockMaster) => opcode::EXT_CLK_MASTER_MODE,
            Command::Clock(ClockMode::Slave) => opcode::SLAVE_MODE,
            Command::Common(mode) => {
                opcode::COM_OPTION
                    | match mode {
                        CommonMode::NMos8 => 0x00,
                        CommonMode::NMos16 => 0x04,
                        CommonMode::PMos8 => 0x08,
                        CommonMode::PMos16 => 0x0C,
                    }
            }
            Command::Pwm(level) => opcode::PWM_CONTROL | level.get(),
        }
    }

    /// Blink on or off
    pub const fn blink(on: bool) -> Self {
        if on {
            Command::BlinkOn
        } else {
            Command::BlinkOff
        }
    }

    /// LED output on or off
    pub const fn led(on: bool) -> Self {
        if on {
            Command::LedOn
        } else {
            Command::LedOff
        }
    }
}
