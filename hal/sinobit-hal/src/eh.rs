//! embedded-hal adapters
//!
//! Lifts `embedded-hal` 1.0 pins and SPI buses onto this crate's traits so
//! any chip HAL that implements the ecosystem traits can drive the display.
//!
//! GPIO pins must be infallible (`Error = Infallible`), which holds for
//! every on-chip GPIO HAL in practice; the HT1632C protocol has no way to
//! report or recover from a failed pin toggle.

use core::cell::RefCell;
use core::convert::Infallible;

use embedded_hal::digital::{self, ErrorType};
use embedded_hal::spi;

use crate::gpio::{DataPin, Direction, InputPin, OutputPin};
use crate::spi::SpiBus;

/// Output pin backed by an `embedded_hal::digital::OutputPin`
///
/// The last driven level is cached so it can be queried through `&self`.
pub struct EhOutputPin<P> {
    pin: P,
    high: bool,
}

impl<P> EhOutputPin<P>
where
    P: digital::OutputPin + ErrorType<Error = Infallible>,
{
    /// Wrap a pin, driving it to `initial_high`
    pub fn new(mut pin: P, initial_high: bool) -> Self {
        if initial_high {
            pin.set_high().unwrap_or_else(|e| match e {});
        } else {
            pin.set_low().unwrap_or_else(|e| match e {});
        }
        Self {
            pin,
            high: initial_high,
        }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> OutputPin for EhOutputPin<P>
where
    P: digital::OutputPin + ErrorType<Error = Infallible>,
{
    fn set_high(&mut self) {
        self.pin.set_high().unwrap_or_else(|e| match e {});
        self.high = true;
    }

    fn set_low(&mut self) {
        self.pin.set_low().unwrap_or_else(|e| match e {});
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Data line backed by an open-drain `embedded-hal` pin
///
/// Open drain lets one pin both drive and sample the line: releasing it
/// to the input direction leaves it floating high so the chip can pull it
/// low. The board needs a pull-up on DATA.
pub struct EhDataPin<P> {
    pin: RefCell<P>,
    high: bool,
    direction: Direction,
}

impl<P> EhDataPin<P>
where
    P: digital::OutputPin + digital::InputPin + ErrorType<Error = Infallible>,
{
    /// Wrap a pin, driving it high as an output
    pub fn new(mut pin: P) -> Self {
        pin.set_high().unwrap_or_else(|e| match e {});
        Self {
            pin: RefCell::new(pin),
            high: true,
            direction: Direction::Output,
        }
    }

    /// Current direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin.into_inner()
    }
}

impl<P> OutputPin for EhDataPin<P>
where
    P: digital::OutputPin + digital::InputPin + ErrorType<Error = Infallible>,
{
    fn set_high(&mut self) {
        self.pin.get_mut().set_high().unwrap_or_else(|e| match e {});
        self.high = true;
    }

    fn set_low(&mut self) {
        // Released lines are never pulled low from this side
        if self.direction == Direction::Output {
            self.pin.get_mut().set_low().unwrap_or_else(|e| match e {});
        }
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

impl<P> InputPin for EhDataPin<P>
where
    P: digital::OutputPin + digital::InputPin + ErrorType<Error = Infallible>,
{
    fn is_high(&self) -> bool {
        self.pin
            .borrow_mut()
            .is_high()
            .unwrap_or_else(|e| match e {})
    }
}

impl<P> DataPin for EhDataPin<P>
where
    P: digital::OutputPin + digital::InputPin + ErrorType<Error = Infallible>,
{
    fn set_direction(&mut self, direction: Direction) {
        if direction == Direction::Input {
            self.pin.get_mut().set_high().unwrap_or_else(|e| match e {});
        }
        self.direction = direction;
    }
}

/// SPI bus backed by an `embedded_hal::spi::SpiBus<u8>`
///
/// Every operation flushes the bus before returning so the caller can
/// deassert chip select knowing the last bit has left the shift register.
pub struct EhSpiBus<S> {
    bus: S,
}

impl<S: spi::SpiBus<u8>> EhSpiBus<S> {
    /// Wrap a bus
    pub fn new(bus: S) -> Self {
        Self { bus }
    }

    /// Release the wrapped bus
    pub fn into_inner(self) -> S {
        self.bus
    }
}

impl<S: spi::SpiBus<u8>> SpiBus for EhSpiBus<S> {
    type Error = S::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(data)?;
        self.bus.flush()
    }
}
