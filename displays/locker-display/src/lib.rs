//! Display support for the locker kiosk
//!
//! - [`Ili9341`]: SPI driver for the 320x240 TFT panel, exposed as an
//!   `embedded-graphics` draw target
//! - [`Buffered`]: RAM back buffer in front of the panel, flushed in one
//!   burst per frame
//! - [`GraphicsCanvas`]: implements the core `Canvas` trait on top of a
//!   buffered RGB565 draw target

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod buffer;
pub mod canvas;
pub mod ili9341;

pub use buffer::{Buffered, Flush, Frame, FRAME_HEIGHT, FRAME_WIDTH};
pub use canvas::GraphicsCanvas;
pub use ili9341::{hard_reset, Ili9341, Orientation, PanelError};
