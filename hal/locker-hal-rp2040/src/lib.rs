//! RP2040-specific HAL for the locker kiosk
//!
//! This crate provides RP2040 implementations of the shared
//! `locker-hal` traits, plus RP2040-specific functionality:
//!
//! - Dynamic pin allocation for config-driven setup
//! - GPIO wrappers implementing `OutputPin`/`InputPin`
//! - Blocking SPI wrapper implementing `SpiBus`

#![no_std]

pub mod gpio;
pub mod pins;
pub mod spi;

pub use gpio::{RpInput, RpOutput};
pub use pins::{PinBank, PinBankPeripherals, PinError, RemainingPeripherals};
pub use spi::RpSpi;
