//! Pixel and text interface to the sinobit LED matrix
//!
//! This crate provides:
//! - `DisplayBackend` trait over anything that owns a framebuffer and can
//!   flush it (implemented for the HT1632C driver)
//! - `Display`, the small facade a scripting binding exposes: pixels,
//!   fill, clear, brightness, flush and text
//!
//! # Coordinates
//!
//! Pixels are addressed as `(x, y)` in `[0, 12)`. Anything outside is
//! ignored on write and reads unlit. Text runs along the panel's reading
//! direction, which the renderer maps onto framebuffer rows.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod display;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use display::Display;
