//! Lock actuator implementations

pub mod relay;

pub use relay::RelayLock;
