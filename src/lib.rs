//! RelayCycler firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod fsm;
pub mod power;
pub mod scheduler;
pub mod wake;

pub mod error;
pub mod pins;

// Hardware-facing modules compile on every target; the actual ESP-IDF
// calls are guarded by cfg attributes inside.
pub mod adapters;
pub mod control;
pub mod drivers;
pub mod sensors;
