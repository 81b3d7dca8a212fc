//! Display backend trait
//!
//! Defines what the facade needs from a display: a framebuffer to draw
//! into, a way to push it to the panel, and a brightness control.

use sinobit_core::framebuffer::{HEIGHT, WIDTH};
use sinobit_core::Framebuffer;
use sinobit_drivers::{Ht1632c, Transport};

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the display chip
    Communication,
}

/// Display backend trait
pub trait DisplayBackend {
    /// Framebuffer the backend renders from
    type Buffer: Framebuffer;

    /// The framebuffer
    fn buffer(&self) -> &Self::Buffer;

    /// The framebuffer, for drawing
    fn buffer_mut(&mut self) -> &mut Self::Buffer;

    /// Flush the framebuffer to the display
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Set the brightness (0-15, higher values clamp)
    fn set_brightness(&mut self, level: u8) -> Result<(), DisplayError>;

    /// Get the display dimensions as (columns, rows)
    fn dimensions(&self) -> (u8, u8) {
        (WIDTH as u8, HEIGHT as u8)
    }
}

impl<T: Transport, F: Framebuffer> DisplayBackend for Ht1632c<T, F> {
    type Buffer = F;

    fn buffer(&self) -> &F {
        Ht1632c::buffer(self)
    }

    fn buffer_mut(&mut self) -> &mut F {
        Ht1632c::buffer_mut(self)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.write().map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("Display flush failed");
            DisplayError::Communication
        })
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), DisplayError> {
        Ht1632c::set_brightness(self, level).map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("Display brightness command failed");
            DisplayError::Communication
        })
    }
}
