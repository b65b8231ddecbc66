//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the control rules for the relay cycler: wake
//! handling, gesture dispatch, FSM orchestration and per-pass sequencing of
//! the on-state subsystems.  All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
