//! Display facade
//!
//! Each method maps one-to-one onto a call the scripting binding exposes.
//! Drawing only changes the framebuffer; call [`Display::write`] to show it.

use sinobit_core::font::BUILTIN;
use sinobit_core::text::{draw_char, draw_string, measure_string};
use sinobit_core::{Font, Framebuffer};

use crate::backend::{DisplayBackend, DisplayError};

/// Brightest PWM step
const MAX_BRIGHTNESS: i32 = 15;

/// Pixel and text access to a display backend
pub struct Display<B> {
    backend: B,
    font: &'static Font,
}

impl<B: DisplayBackend> Display<B> {
    /// Wrap a backend, drawing text with the built-in font
    pub fn new(backend: B) -> Self {
        Self::with_font(backend, &BUILTIN)
    }

    /// Wrap a backend with a specific font
    pub fn with_font(backend: B, font: &'static Font) -> Self {
        Self { backend, font }
    }

    /// Light or clear a pixel
    pub fn set_pixel(&mut self, x: i32, y: i32, value: bool) {
        self.backend.buffer_mut().set(x, y, value);
    }

    /// Whether a pixel is lit
    pub fn get_pixel(&self, x: i32, y: i32) -> bool {
        self.backend.buffer().get(x, y)
    }

    /// Push the framebuffer to the panel
    pub fn write(&mut self) -> Result<(), DisplayError> {
        self.backend.flush()
    }

    /// Set every pixel
    pub fn fill(&mut self, value: bool) {
        self.backend.buffer_mut().fill(value);
    }

    /// Clear every pixel
    pub fn clear(&mut self) {
        self.backend.buffer_mut().fill(false);
    }

    /// Set the brightness, clamping to `0..=15`
    pub fn brightness(&mut self, level: i32) -> Result<(), DisplayError> {
        self.backend.set_brightness(level.clamp(0, MAX_BRIGHTNESS) as u8)
    }

    /// Draw a string with its first glyph at `(x, y)`
    ///
    /// Returns the cursor position after the last character.
    pub fn text(&mut self, x: i32, y: i32, text: &str) -> i32 {
        draw_string(self.backend.buffer_mut(), self.font, x, y, text)
    }

    /// Draw a single character at `(x, y)`
    pub fn text_char(&mut self, x: i32, y: i32, c: char) {
        draw_char(self.backend.buffer_mut(), self.font, x, y, c as u32);
    }

    /// Width `text` would take when drawn
    pub fn text_width(&self, text: &str) -> u32 {
        measure_string(self.font, text)
    }

    /// Font used for text
    pub fn font(&self) -> &'static Font {
        self.font
    }

    /// The backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend, mutably
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Unwrap the backend
    pub fn into_inner(self) -> B {
        self.backend
    }
}
