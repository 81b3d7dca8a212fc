//! HT1632C display driver

use sinobit_core::config::DisplayConfig;
use sinobit_core::framebuffer::HEIGHT;
use sinobit_core::{AnyFramebuffer, Framebuffer, WordFramebuffer};
use sinobit_hal::{DataPin, OutputPin};

use super::bitbang::BitBang;
use super::command::{Brightness, Command};
use super::Transport;

/// HT1632C driver owning the framebuffer
///
/// Pixel calls only touch the in-memory buffer; nothing reaches the chip
/// until [`write`](Self::write). Brightness, blink and LED on/off are sent
/// immediately.
pub struct Ht1632c<T, F = WordFramebuffer> {
    transport: T,
    buffer: F,
    brightness: Brightness,
    blink: bool,
    display_on: bool,
}

impl<T: Transport> Ht1632c<T, WordFramebuffer> {
    /// Create a driver with a row-word framebuffer
    ///
    /// Call [`init`](Self::init) before anything else.
    pub fn new(transport: T) -> Self {
        Self::with_buffer(transport, WordFramebuffer::new())
    }
}

impl<T: Transport> Ht1632c<T, AnyFramebuffer> {
    /// Create a driver using the framebuffer layout `config` selects
    pub fn from_config(transport: T, config: &DisplayConfig) -> Self {
        Self::with_buffer(transport, AnyFramebuffer::new(config.layout()))
    }
}

impl<T: Transport, F: Framebuffer> Ht1632c<T, F> {
    /// Create a driver around an existing framebuffer
    pub fn with_buffer(transport: T, buffer: F) -> Self {
        Self {
            transport,
            buffer,
            brightness: Brightness::MAX,
            blink: false,
            display_on: false,
        }
    }

    /// Bring the chip up with default settings
    pub fn init(&mut self) -> Result<(), T::Error> {
        self.init_with(&DisplayConfig::default())
    }

    /// Bring the chip up, then apply configured brightness and blink
    ///
    /// The chip only lights reliably with this exact order: system off,
    /// COM option, clock source, system on, full PWM, blink off, LEDs on,
    /// then a clear of display memory.
    pub fn init_with(&mut self, config: &DisplayConfig) -> Result<(), T::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "HT1632C init: common {:?}, clock {:?}",
            config.common,
            config.clock
        );

        for command in [
            Command::SysDis,
            Command::Common(config.common),
            Command::Clock(config.clock),
            Command::SysEn,
            Command::Pwm(Brightness::MAX),
            Command::BlinkOff,
            Command::LedOn,
        ] {
            self.transport.command(command)?;
        }
        self.brightness = Brightness::MAX;
        self.blink = false;
        self.display_on = true;

        self.transport.clear_memory()?;
        self.buffer.fill(false);

        let brightness = Brightness::new(config.brightness);
        if brightness != self.brightness {
            self.set_brightness(brightness.get())?;
        }
        if config.blink {
            self.set_blink(true)?;
        }

        Ok(())
    }

    /// Set a pixel in the framebuffer
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        self.buffer.set(x, y, on);
    }

    /// Read a pixel from the framebuffer
    pub fn get_pixel(&self, x: i32, y: i32) -> bool {
        self.buffer.get(x, y)
    }

    /// Set every pixel in the framebuffer
    pub fn fill(&mut self, on: bool) {
        self.buffer.fill(on);
    }

    /// Clear the framebuffer
    pub fn clear(&mut self) {
        self.buffer.fill(false);
    }

    /// Send the framebuffer to the chip
    pub fn write(&mut self) -> Result<(), T::Error> {
        #[cfg(feature = "defmt")]
        defmt::trace!("HT1632C flush");

        self.transport.write_frame(&self.buffer)
    }

    /// Set the PWM duty, clamping `level` to 15
    pub fn set_brightness(&mut self, level: u8) -> Result<(), T::Error> {
        let brightness = Brightness::new(level);

        #[cfg(feature = "defmt")]
        defmt::debug!("HT1632C brightness {}", brightness.get());

        self.transport.command(Command::Pwm(brightness))?;
        self.brightness = brightness;
        Ok(())
    }

    /// Current PWM duty
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Turn hardware blink on or off
    pub fn set_blink(&mut self, on: bool) -> Result<(), T::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("HT1632C blink {}", on);

        self.transport.command(Command::blink(on))?;
        self.blink = on;
        Ok(())
    }

    /// Whether hardware blink is on
    pub fn is_blinking(&self) -> bool {
        self.blink
    }

    /// Turn the LED outputs on or off, keeping display memory
    pub fn set_display_on(&mut self, on: bool) -> Result<(), T::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("HT1632C display {}", on);

        self.transport.command(Command::led(on))?;
        self.display_on = on;
        Ok(())
    }

    /// Whether the LED outputs are on
    pub fn is_display_on(&self) -> bool {
        self.display_on
    }

    /// The framebuffer
    pub fn buffer(&self) -> &F {
        &self.buffer
    }

    /// The framebuffer, for direct drawing
    pub fn buffer_mut(&mut self) -> &mut F {
        &mut self.buffer
    }

    /// The transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Take the driver apart
    pub fn release(self) -> (T, F) {
        (self.transport, self.buffer)
    }
}

impl<CS, WR, DATA, RD, F> Ht1632c<BitBang<CS, WR, DATA, RD>, F>
where
    CS: OutputPin,
    WR: OutputPin,
    DATA: DataPin,
    RD: OutputPin,
    F: Framebuffer,
{
    /// Read the visible rows back from display memory
    pub fn read_memory(&mut self) -> [u16; HEIGHT] {
        let mut rows = [0u16; HEIGHT];
        for (row, word) in rows.iter_mut().enumerate() {
            *word = self.transport.read_row(row as u8);
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ht1632c::frame::Frame;
    use crate::ht1632c::SpiTransport;
    use crate::mock::{Line, MockDataPin, MockPin, MockSpi, MockSpiError, WireLog};
    use sinobit_core::config::{ClockMode, CommonMode, TransportKind};
    use sinobit_core::BufferLayout;

    type GpioBus<'a> = BitBang<MockPin<'a>, MockPin<'a>, MockDataPin<'a>, MockPin<'a>>;

    fn gpio(log: &WireLog) -> GpioBus<'_> {
        BitBang::new(
            MockPin::new(log, Line::Cs),
            MockPin::new(log, Line::Wr),
            MockDataPin::new(log),
            MockPin::new(log, Line::Rd),
        )
    }

    const INIT_OPCODES: [u8; 7] = [0x00, 0x24, 0x18, 0x01, 0xAF, 0x08, 0x03];

    #[test]
    fn test_init_sequence_gpio() {
        let log = WireLog::new();
        let mut display = Ht1632c::new(gpio(&log));
        display.set_pixel(1, 1, true);
        display.init().unwrap();

        let transactions = log.transactions();
        assert_eq!(transactions.len(), 8);
        for (transaction, opcode) in transactions.iter().zip(INIT_OPCODES) {
            assert_eq!(transaction.bits.len(), 12);
            assert_eq!(transaction.field(0, 3), 0b100);
            assert_eq!(transaction.field(3, 8), u32::from(opcode));
        }
        // Memory clear comes last
        assert_eq!(transactions[7].bits.len(), 10 + 96 * 4);
        assert!(!display.get_pixel(1, 1));
        assert!(display.is_display_on());
        assert_eq!(display.brightness(), Brightness::MAX);
    }

    #[test]
    fn test_init_sequence_spi() {
        let log = WireLog::new();
        let spi = SpiTransport::new(MockSpi::new(&log), MockPin::new(&log, Line::Cs));
        let mut display = Ht1632c::new(spi);
        display.init().unwrap();

        let transactions = log.transactions();
        assert_eq!(transactions.len(), 7 + 96);
        for (transaction, opcode) in transactions.iter().zip(INIT_OPCODES) {
            let expected = (0x0400u16 | u16::from(opcode)) << 5;
            assert_eq!(transaction.spi_word(), expected);
        }
        assert!(transactions[7..]
            .iter()
            .all(|transaction| transaction.spi_word() & 0x003C == 0));
    }

    #[test]
    fn test_init_with_config() {
        let log = WireLog::new();
        let mut config = DisplayConfig::default();
        config.brightness = 20;
        config.blink = true;
        config.clock = ClockMode::Slave;
        config.common = CommonMode::PMos16;

        let mut display = Ht1632c::new(gpio(&log));
        display.init_with(&config).unwrap();
        assert!(display.is_blinking());
        // 20 clamps to the level init already set
        assert_eq!(display.brightness(), Brightness::MAX);

        let opcodes: heapless::Vec<u32, 16> = log
            .transactions()
            .iter()
            .filter(|transaction| transaction.bits.len() == 12)
            .map(|transaction| transaction.field(3, 8))
            .collect();
        assert_eq!(
            opcodes.as_slice(),
            &[0x00, 0x2C, 0x10, 0x01, 0xAF, 0x08, 0x03, 0x09]
        );

        log.clear();
        config.brightness = 4;
        config.blink = false;
        display.init_with(&config).unwrap();
        assert_eq!(display.brightness().get(), 4);
        assert!(!display.is_blinking());
        let last = log.transactions().last().cloned().unwrap();
        assert_eq!(last.field(3, 8), 0xA4);
    }

    #[test]
    fn test_pin_map_does_not_reach_the_wire() {
        let default_log = WireLog::new();
        let moved_log = WireLog::new();
        let mut moved = DisplayConfig::default();
        moved.pins.cs = 2;
        moved.pins.data = 3;
        moved.pins.wr = 4;
        moved.pins.rd = 5;

        Ht1632c::new(gpio(&default_log))
            .init_with(&DisplayConfig::default())
            .unwrap();
        Ht1632c::new(gpio(&moved_log)).init_with(&moved).unwrap();

        assert_eq!(default_log.transactions(), moved_log.transactions());
    }

    #[test]
    fn test_write_flushes_buffer() {
        let log = WireLog::new();
        let mut display = Ht1632c::new(gpio(&log));
        display.init().unwrap();
        log.clear();

        display.fill(true);
        display.set_pixel(0, 0, false);
        display.write().unwrap();

        let transactions = log.transactions();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].field(10, 16), 0x7FF0);
        assert_eq!(transactions[0].field(26, 16), 0xFFF0);
    }

    #[test]
    fn test_clear_is_local() {
        let log = WireLog::new();
        let mut display = Ht1632c::new(gpio(&log));
        display.fill(true);
        log.clear();

        display.clear();
        assert!(!display.get_pixel(5, 5));
        assert!(log.transactions().is_empty());
    }

    #[test]
    fn test_brightness_blink_and_led() {
        let log = WireLog::new();
        let mut display = Ht1632c::new(gpio(&log));

        display.set_brightness(20).unwrap();
        display.set_brightness(7).unwrap();
        display.set_blink(true).unwrap();
        display.set_display_on(false).unwrap();
        display.set_display_on(true).unwrap();

        let opcodes: heapless::Vec<u32, 8> = log
            .transactions()
            .iter()
            .map(|transaction| transaction.field(3, 8))
            .collect();
        assert_eq!(opcodes.as_slice(), &[0xAF, 0xA7, 0x09, 0x02, 0x03]);
        assert_eq!(display.brightness().get(), 7);
        assert!(display.is_display_on());
    }

    #[test]
    fn test_from_config_layout() {
        let log = WireLog::new();
        let mut config = DisplayConfig::default();
        config.transport = TransportKind::Spi;

        let spi = SpiTransport::new(MockSpi::new(&log), MockPin::new(&log, Line::Cs));
        let display = Ht1632c::from_config(spi, &config);
        assert_eq!(display.buffer().layout(), BufferLayout::Nibble);
    }

    #[test]
    fn test_layouts_send_identical_frames() {
        let word_log = WireLog::new();
        let nibble_log = WireLog::new();
        let mut word =
            Ht1632c::with_buffer(gpio(&word_log), AnyFramebuffer::new(BufferLayout::Word));
        let mut nibble =
            Ht1632c::with_buffer(gpio(&nibble_log), AnyFramebuffer::new(BufferLayout::Nibble));

        for (x, y) in [(0, 0), (3, 4), (4, 4), (11, 7), (7, 11)] {
            word.set_pixel(x, y, true);
            nibble.set_pixel(x, y, true);
        }
        word.write().unwrap();
        nibble.write().unwrap();

        assert_eq!(word_log.transactions(), nibble_log.transactions());
    }

    #[test]
    fn test_spi_error_propagates() {
        let log = WireLog::new();
        let spi = SpiTransport::new(
            MockSpi::failing_after(&log, 2),
            MockPin::new(&log, Line::Cs),
        );
        let mut display = Ht1632c::new(spi);
        assert_eq!(display.init(), Err(MockSpiError));
        assert!(!display.is_display_on());
    }

    #[test]
    fn test_read_memory() {
        let log = WireLog::new();
        let script = [0x8000, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x0010];
        let bus = BitBang::new(
            MockPin::new(&log, Line::Cs),
            MockPin::new(&log, Line::Wr),
            MockDataPin::with_script(&log, &script),
            MockPin::new(&log, Line::Rd),
        );
        let mut display = Ht1632c::new(bus);
        assert_eq!(display.read_memory(), script);

        let transactions = log.transactions();
        assert_eq!(transactions.len(), 12);
        assert_eq!(transactions[11].field(3, 7), 44);
    }

    #[test]
    fn test_transport_by_reference() {
        let log = WireLog::new();
        let mut bus = gpio(&log);
        {
            let mut display = Ht1632c::new(&mut bus);
            display.set_display_on(true).unwrap();
        }
        bus.send(Frame::Write { address: 0, data: 0 }).unwrap();
        assert_eq!(log.transactions().len(), 2);
    }
}
