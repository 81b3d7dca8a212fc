//! Recording mocks for the chip's pins and SPI bus
//!
//! Every pin transition and SPI byte is appended to a shared [`WireLog`].
//! [`WireLog::transactions`] decodes the log back into chip-select
//! bracketed exchanges, so the protocol can be checked bit by bit on the
//! host.

#![cfg(any(test, feature = "mock"))]

use core::cell::{Cell, Ref, RefCell};

use heapless::Vec;
use sinobit_hal::gpio::{DataPin, Direction, InputPin, OutputPin};
use sinobit_hal::SpiBus;

/// Events kept by a [`WireLog`]
pub const LOG_CAPACITY: usize = 8192;

/// Transactions decoded by [`WireLog::transactions`]
pub const MAX_TRANSACTIONS: usize = 192;

/// Bits kept per transaction (a memory clear is 394)
pub const MAX_BITS: usize = 400;

/// SPI bytes kept per transaction
pub const MAX_BYTES: usize = 4;

/// Chip control line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// Chip select
    Cs,
    /// Write clock
    Wr,
    /// Serial data
    Data,
    /// Read clock
    Rd,
}

/// One observed change on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireEvent {
    /// A line was driven to a level
    Level {
        /// Which line
        line: Line,
        /// New level
        high: bool,
    },
    /// The DATA pin changed direction
    Direction(Direction),
    /// A byte was written on the SPI bus
    SpiByte(u8),
}

/// A chip-select bracketed exchange decoded from the log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    /// DATA level at each WR rising edge
    pub bits: Vec<bool, MAX_BITS>,
    /// RD pulses
    pub reads: usize,
    /// SPI bytes
    pub bytes: Vec<u8, MAX_BYTES>,
    /// DATA was switched to input
    pub data_released: bool,
}

impl Transaction {
    /// `len` bits starting at `start`, first bit most significant
    pub fn field(&self, start: usize, len: usize) -> u32 {
        self.bits[start..start + len]
            .iter()
            .fold(0, |acc, &bit| (acc << 1) | u32::from(bit))
    }

    /// SPI bytes as a big-endian word
    pub fn spi_word(&self) -> u16 {
        self.bytes
            .iter()
            .fold(0u16, |acc, &byte| (acc << 8) | u16::from(byte))
    }
}

/// Shared recording of everything the mocks saw
pub struct WireLog {
    events: RefCell<Vec<WireEvent, LOG_CAPACITY>>,
    overflowed: Cell<bool>,
}

impl WireLog {
    /// Create an empty log
    pub const fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            overflowed: Cell::new(false),
        }
    }

    /// Append an event
    pub fn record(&self, event: WireEvent) {
        if self.events.borrow_mut().push(event).is_err() {
            self.overflowed.set(true);
        }
    }

    /// Raw events in order
    pub fn events(&self) -> Ref<'_, [WireEvent]> {
        Ref::map(self.events.borrow(), |events| events.as_slice())
    }

    /// Whether anything was dropped: events because the log was full, or
    /// bits, bytes or transactions past the decoder's capacity
    pub fn overflowed(&self) -> bool {
        self.overflowed.get()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
        self.overflowed.set(false);
    }

    /// Decode the log into chip-select bracketed transactions
    pub fn transactions(&self) -> Vec<Transaction, MAX_TRANSACTIONS> {
        let mut done = Vec::new();
        let mut open: Option<Transaction> = None;
        let mut data = false;
        let mut wr = true;

        for event in self.events().iter() {
            match *event {
                WireEvent::Level {
                    line: Line::Cs,
                    high,
                } => {
                    if high {
                        if let Some(transaction) = open.take() {
                            if done.push(transaction).is_err() {
                                self.overflowed.set(true);
                            }
                        }
                    } else {
                        open = Some(Transaction::default());
                    }
                }
                WireEvent::Level {
                    line: Line::Data,
                    high,
                } => data = high,
                WireEvent::Level {
                    line: Line::Wr,
                    high,
                } => {
                    if high && !wr {
                        if let Some(transaction) = open.as_mut() {
                            if transaction.bits.push(data).is_err() {
                                self.overflowed.set(true);
                            }
                        }
                    }
                    wr = high;
                }
                WireEvent::Level {
                    line: Line::Rd,
                    high,
                } => {
                    if !high {
                        if let Some(transaction) = open.as_mut() {
                            transaction.reads += 1;
                        }
                    }
                }
                WireEvent::Direction(direction) => {
                    if let Some(transaction) = open.as_mut() {
                        transaction.data_released |= direction == Direction::Input;
                    }
                }
                WireEvent::SpiByte(byte) => {
                    if let Some(transaction) = open.as_mut() {
                        if transaction.bytes.push(byte).is_err() {
                            self.overflowed.set(true);
                        }
                    }
                }
            }
        }

        done
    }

    /// WR rising edges or SPI bytes seen while chip select was released
    pub fn stray_clocks(&self) -> usize {
        let mut selected = false;
        let mut wr = true;
        let mut stray = 0;

        for event in self.events().iter() {
            match *event {
                WireEvent::Level {
                    line: Line::Cs,
                    high,
                } => selected = !high,
                WireEvent::Level {
                    line: Line::Wr,
                    high,
                } => {
                    if high && !wr && !selected {
                        stray += 1;
                    }
                    wr = high;
                }
                WireEvent::SpiByte(_) if !selected => stray += 1,
                _ => {}
            }
        }

        stray
    }
}

impl Default for WireLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock output pin
pub struct MockPin<'a> {
    log: &'a WireLog,
    line: Line,
    high: bool,
}

impl<'a> MockPin<'a> {
    /// Create a pin recording into `log` as `line`
    pub fn new(log: &'a WireLog, line: Line) -> Self {
        Self {
            log,
            line,
            high: false,
        }
    }
}

impl OutputPin for MockPin<'_> {
    fn set_high(&mut self) {
        self.high = true;
        self.log.record(WireEvent::Level {
            line: self.line,
            high: true,
        });
    }

    fn set_low(&mut self) {
        self.high = false;
        self.log.record(WireEvent::Level {
            line: self.line,
            high: false,
        });
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Mock bidirectional DATA pin
///
/// As an input it plays back `script` one bit per read, each word
/// most significant bit first, then reads low once the script runs out.
pub struct MockDataPin<'a> {
    log: &'a WireLog,
    high: bool,
    direction: Direction,
    script: &'a [u16],
    cursor: Cell<usize>,
}

impl<'a> MockDataPin<'a> {
    /// Create a DATA pin with nothing to read back
    pub fn new(log: &'a WireLog) -> Self {
        Self::with_script(log, &[])
    }

    /// Create a DATA pin that reads back `script`
    pub fn with_script(log: &'a WireLog, script: &'a [u16]) -> Self {
        Self {
            log,
            high: false,
            direction: Direction::Output,
            script,
            cursor: Cell::new(0),
        }
    }

    /// Current direction
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl OutputPin for MockDataPin<'_> {
    fn set_high(&mut self) {
        self.high = true;
        self.log.record(WireEvent::Level {
            line: Line::Data,
            high: true,
        });
    }

    fn set_low(&mut self) {
        self.high = false;
        self.log.record(WireEvent::Level {
            line: Line::Data,
            high: false,
        });
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

impl InputPin for MockDataPin<'_> {
    fn is_high(&self) -> bool {
        match self.direction {
            Direction::Output => self.high,
            Direction::Input => {
                let index = self.cursor.get();
                self.cursor.set(index + 1);
                self.script
                    .get(index / 16)
                    .is_some_and(|word| word & (0x8000 >> (index % 16)) != 0)
            }
        }
    }
}

impl DataPin for MockDataPin<'_> {
    fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.log.record(WireEvent::Direction(direction));
    }
}

/// Error returned by a failing [`MockSpi`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockSpiError;

/// Mock SPI bus
pub struct MockSpi<'a> {
    log: &'a WireLog,
    fail_after: Option<usize>,
    writes: usize,
}

impl<'a> MockSpi<'a> {
    /// Create a bus that always succeeds
    pub fn new(log: &'a WireLog) -> Self {
        Self {
            log,
            fail_after: None,
            writes: 0,
        }
    }

    /// Create a bus whose writes fail once `count` have succeeded
    pub fn failing_after(log: &'a WireLog, count: usize) -> Self {
        Self {
            log,
            fail_after: Some(count),
            writes: 0,
        }
    }

    /// Successful writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SpiBus for MockSpi<'_> {
    type Error = MockSpiError;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if self.fail_after.is_some_and(|limit| self.writes >= limit) {
            return Err(MockSpiError);
        }
        self.writes += 1;
        for &byte in data {
            self.log.record(WireEvent::SpiByte(byte));
        }
        Ok(())
    }
}
