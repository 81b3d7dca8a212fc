//! GPIO pin abstractions
//!
//! Provides traits for the HT1632C control lines. CS, WR and RD are plain
//! outputs; DATA is written during commands and memory writes and read back
//! during memory reads, so it also needs a direction switch.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Pin drives the line
    Output,
    /// Pin is high impedance and samples the line
    Input,
}

/// Bidirectional data line
///
/// The HT1632C shares one DATA line between host writes and chip reads.
/// The host must drive it as an output before clocking any frame and
/// release it to an input before the chip starts shifting read data out.
pub trait DataPin: OutputPin + InputPin {
    /// Switch the pin direction
    fn set_direction(&mut self, direction: Direction);

    /// Drive the line
    fn set_as_output(&mut self) {
        self.set_direction(Direction::Output);
    }

    /// Release the line and sample it
    fn set_as_input(&mut self) {
        self.set_direction(Direction::Input);
    }
}

impl<P: OutputPin + ?Sized> OutputPin for &mut P {
    fn set_high(&mut self) {
        (**self).set_high();
    }

    fn set_low(&mut self) {
        (**self).set_low();
    }

    fn is_set_high(&self) -> bool {
        (**self).is_set_high()
    }
}
