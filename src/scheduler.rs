//! Relay toggle scheduler.
//!
//! While the device is on, the relay is inverted every
//! `frequency.seconds()` seconds.  Long-press ticks step the period along
//! the triangular wave held in [`FrequencyOscillator`]:
//!
//! ```text
//!   relay  ─┐      ┌──────┐      ┌──────
//!           └──────┘      └──────┘
//!           │◀ T ▶│◀ T ▶│
//!   T = frequency.seconds() × 1000 ms   (1 ≤ seconds ≤ 10)
//! ```
//!
//! The period survives on/off cycles; only the toggle timer is reset when
//! the device turns on.
//!
//! [`FrequencyOscillator`]: crate::control::oscillator::FrequencyOscillator

use crate::fsm::context::DeviceContext;
use log::debug;

/// Drives `DeviceContext.device`.
#[derive(Debug, Default)]
pub struct RelayScheduler;

impl RelayScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the relay once the current period has elapsed.
    ///
    /// Returns the new relay level when a toggle happened.  No-op while
    /// the device is off.
    pub fn update(&mut self, ctx: &mut DeviceContext) -> Option<bool> {
        if !ctx.device.on {
            return None;
        }

        let elapsed = ctx.now_ms.wrapping_sub(ctx.device.last_toggle_ms);
        if elapsed < ctx.device.frequency.period_ms() {
            return None;
        }

        ctx.device.relay_energized = !ctx.device.relay_energized;
        ctx.device.last_toggle_ms = ctx.now_ms;

        debug!(
            "Relay toggled to {}",
            if ctx.device.relay_energized { "ON" } else { "OFF" }
        );
        Some(ctx.device.relay_energized)
    }

    /// Advance the toggle period by one long-press tick.  Applies whether
    /// the device is on or off.
    pub fn adjust_frequency(&mut self, ctx: &mut DeviceContext) -> u8 {
        let seconds = ctx.device.frequency.step();
        debug!("Frequency changed to {seconds} s");
        seconds
    }
}
