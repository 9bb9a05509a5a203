//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator
//! traits defined in locker-core, written against the locker-hal traits:
//!
//! - Touch controllers (XPT2046 resistive touch)
//! - Lock actuators (GPIO relay)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod lock;
pub mod touch;
