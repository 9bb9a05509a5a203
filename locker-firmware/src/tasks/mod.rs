//! Embassy async tasks

pub mod kiosk;

pub use kiosk::{kiosk_task, LockerKiosk, Panel, Touch};
