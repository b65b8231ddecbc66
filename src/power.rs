//! Power controller: decides when the off device may suspend.
//!
//! ```text
//!   device off ──▶ guard elapsed? ──▶ interrupt pending? ──▶ suspend
//!                     (500 ms)            (no)               analog off
//!                                                            light sleep
//!                                                            ◀── button edge
//! ```
//!
//! Waking only returns control to the polling loop.  Analog power comes
//! back when the FSM enters `On`, never as part of the wake itself.
//!
//! The actual suspension is a `PowerPort` call made by the service; this
//! module only owns the policy so it stays testable on the host.

use crate::fsm::context::DeviceContext;
use crate::wake::WakeSignal;
use log::debug;

pub struct PowerManager {
    guard_ms: u32,
    suspend_count: u32,
    /// When the platform last refused to suspend.  Retries wait one guard
    /// interval from here.
    failed_at_ms: Option<u32>,
}

impl PowerManager {
    pub fn new(config: &crate::config::SystemConfig) -> Self {
        Self {
            guard_ms: config.sleep_guard_ms,
            suspend_count: 0,
            failed_at_ms: None,
        }
    }

    /// True when the device is off, has been stable for the guard interval
    /// and no button edge is waiting to be processed.
    pub fn should_suspend(&self, ctx: &DeviceContext, wake: &WakeSignal) -> bool {
        if ctx.device.on || ctx.ms_since_state_change() < self.guard_ms {
            return false;
        }
        if let Some(failed) = self.failed_at_ms {
            if ctx.now_ms.wrapping_sub(failed) < self.guard_ms {
                return false;
            }
        }
        if wake.interrupt_pending() {
            debug!("suspend skipped: button edge pending");
            return false;
        }
        true
    }

    /// Apply the pre-suspend power commands.
    pub fn prepare_suspend(&mut self, ctx: &mut DeviceContext) {
        ctx.commands.analog_enabled = false;
    }

    /// Record the outcome of a suspension attempt made at `now_ms`.
    pub fn finish_suspend(&mut self, slept: bool, now_ms: u32) {
        if slept {
            self.suspend_count = self.suspend_count.wrapping_add(1);
            self.failed_at_ms = None;
        } else {
            self.failed_at_ms = Some(now_ms);
        }
    }

    /// Number of completed suspensions since boot.
    pub fn suspend_count(&self) -> u32 {
        self.suspend_count
    }
}
