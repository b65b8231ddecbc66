//! LED indicator with priority-based mode selection.
//!
//! Runs only while the device is on.  The main loop calls `update()` each
//! pass after the relay scheduler, and the resulting level is fed into
//! `StatusLed::set()` by the service.
//!
//! ## Priority hierarchy (highest first)
//!
//! 1. **Low battery**: square-wave blink, `blink_interval_ms` on /
//!    `blink_interval_ms` off, relay state ignored
//! 2. **Relay mirror**: lit exactly when the relay is energized
//!
//! While the device is off the LED is forced dark once by the FSM `Off`
//! entry and this component leaves it alone.
//!
//! | Mode            | Output                             | Rate        |
//! |-----------------|------------------------------------|-------------|
//! | Dark            | off                                | —           |
//! | MirrorRelay     | `relay_energized`                  | relay timer |
//! | LowBatteryBlink | toggles every `blink_interval_ms`  | 2.5 Hz      |

use crate::fsm::context::DeviceContext;

/// Rendering mode selected for the current pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedMode {
    Dark,
    MirrorRelay,
    LowBatteryBlink,
}

#[derive(Debug)]
pub struct LedIndicator {
    blink_interval_ms: u32,
    active: LedMode,
}

impl LedIndicator {
    pub fn new(blink_interval_ms: u32) -> Self {
        Self {
            blink_interval_ms,
            active: LedMode::Dark,
        }
    }

    /// Pick the mode for the current context.
    pub fn select_mode(ctx: &DeviceContext) -> LedMode {
        if !ctx.device.on {
            LedMode::Dark
        } else if ctx.battery.low {
            LedMode::LowBatteryBlink
        } else {
            LedMode::MirrorRelay
        }
    }

    /// Evaluate the indicator and write the desired level into `ctx.led`.
    ///
    /// Returns the desired LED level.  While off, returns the current
    /// level untouched.
    pub fn update(&mut self, ctx: &mut DeviceContext) -> bool {
        let mode = Self::select_mode(ctx);
        let entering = mode != self.active;
        self.active = mode;

        match mode {
            LedMode::Dark => {}
            LedMode::MirrorRelay => ctx.led.lit = ctx.device.relay_energized,
            LedMode::LowBatteryBlink => {
                if entering {
                    // Start a fresh phase with the LED lit.
                    ctx.led.lit = true;
                    ctx.led.last_blink_ms = ctx.now_ms;
                } else if ctx.now_ms.wrapping_sub(ctx.led.last_blink_ms) >= self.blink_interval_ms
                {
                    ctx.led.lit = !ctx.led.lit;
                    ctx.led.last_blink_ms = ctx.now_ms;
                }
            }
        }
        ctx.led.lit
    }

    pub fn active_mode(&self) -> LedMode {
        self.active
    }
}
