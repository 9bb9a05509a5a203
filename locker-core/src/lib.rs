//! Board-agnostic core logic for the computer locker kiosk
//!
//! This crate contains everything that does not touch real hardware:
//!
//! - Scene graph: primitives, bounded text buffers, objects and the
//!   priority-ordered registry with draw and hit-test passes
//! - Touch filtering: windowed averaging and press debounce
//! - Scene state machine and the kiosk controller
//! - Collaborator traits (canvas, touch input, lock, verification)
//! - Configuration types and the TOML parser

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod kiosk;
pub mod scene;
pub mod state;
pub mod touch;
pub mod traits;
