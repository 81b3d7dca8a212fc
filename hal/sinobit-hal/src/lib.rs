//! Sinobit Hardware Abstraction Layer
//!
//! This crate defines the narrow hardware interface the HT1632C driver
//! consumes. Board support code (pin naming, clock setup, peripheral
//! ownership) implements these traits; the driver never touches registers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  sinobit-drivers (HT1632C protocol)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sinobit-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  board code   │       │ embedded-hal  │
//! │  (direct)     │       │  adapters     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`gpio::DataPin`] - Bidirectional data line (HT1632C DATA)
//! - [`spi::SpiBus`] - SPI bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod eh;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::{DataPin, InputPin, OutputPin};
pub use spi::{SpiBus, SpiConfig};
