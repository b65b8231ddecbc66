//! Sensor subsystem.
//!
//! Only the battery-sense divider is sampled; the raw ADC read lives behind
//! `AnalogPort` so the monitor can be tested on the host.

pub mod battery;
