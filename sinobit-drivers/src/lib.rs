//! Hardware driver for the sinobit LED matrix
//!
//! This crate implements the Holtek HT1632C protocol on top of the pin
//! and bus traits in sinobit-hal:
//!
//! - Command and write frame encoding
//! - Bit-banged GPIO transport (CS, WR, DATA, RD)
//! - SPI transport (8-bit words, one transaction per frame)
//! - The display driver: init sequence, flush, brightness, blink

#![no_std]
#![deny(unsafe_code)]

pub mod ht1632c;
pub mod mock;

pub use ht1632c::{BitBang, Brightness, Command, Frame, Ht1632c, SpiTransport, Transport};
