//! Locker Hardware Abstraction Layer
//!
//! Traits the kiosk drivers are written against. Chip-specific crates
//! implement them so the same touch, relay and panel drivers run on any
//! board, and so the drivers can be tested on the host with mock pins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  locker-firmware                        │
//! └─────────────────────────────────────────┘
//!          │                      │
//!          ▼                      ▼
//! ┌─────────────────┐   ┌─────────────────────┐
//! │ locker-drivers  │   │ locker-display      │
//! │ (touch, relay)  │   │ (ILI9341 panel)     │
//! └─────────────────┘   └─────────────────────┘
//!          │                      │
//!          └──────────┬───────────┘
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  locker-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  locker-hal-rp2040                      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`gpio::ActivePin`] - Output with configurable polarity
//! - [`spi::SpiBus`] - SPI bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;

pub use gpio::{ActivePin, InputPin, OutputPin};
pub use spi::{Mode, SpiBus, SpiConfig};
