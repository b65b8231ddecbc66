//! Control algorithms that are independent of any peripheral.

pub mod oscillator;
