//! Board-agnostic core logic for the sinobit LED matrix
//!
//! This crate contains everything about the display that does not depend
//! on how bits reach the HT1632C:
//!
//! - Framebuffer trait and its two packed memory layouts
//! - Font store (sorted glyph table with binary-search lookup)
//! - Glyph renderer and text measurement
//! - Configuration types, parser and binary persistence

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod font;
pub mod framebuffer;
pub mod text;

pub use font::{Font, Glyph};
pub use framebuffer::{
    AnyFramebuffer, BufferLayout, Framebuffer, NibbleFramebuffer, WordFramebuffer, HEIGHT, WIDTH,
};
