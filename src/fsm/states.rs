//! Concrete state handler functions and table builder.
//!
//! ```text
//!          ShortPress / Wake (relay energized at once when Wake)
//!   OFF ───────────────────────────────────────────────────▶ ON
//!    ▲                                                       │
//!    └──────────────────────── ShortPress ───────────────────┘
//! ```

use super::context::{Activation, DeviceContext};
use super::{StateDescriptor, StateId};
use log::debug;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Off
        StateDescriptor {
            id: StateId::Off,
            name: "Off",
            on_enter: Some(off_enter),
            on_exit: None,
            on_update: off_update,
        },
        // Index 1 — On
        StateDescriptor {
            id: StateId::On,
            name: "On",
            on_enter: Some(on_enter),
            on_exit: None,
            on_update: on_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  OFF state
// ═══════════════════════════════════════════════════════════════════════════

fn off_enter(ctx: &mut DeviceContext) {
    ctx.device.on = false;
    ctx.device.relay_energized = false;
    ctx.device.last_state_change_ms = ctx.now_ms;
    ctx.led.lit = false;
    debug!("Device OFF, relay forced off");
}

fn off_update(ctx: &mut DeviceContext) -> Option<StateId> {
    let activation = ctx.request.take()?;
    ctx.activation = activation;
    Some(StateId::On)
}

// ═══════════════════════════════════════════════════════════════════════════
//  ON state
// ═══════════════════════════════════════════════════════════════════════════

fn on_enter(ctx: &mut DeviceContext) {
    ctx.device.on = true;
    ctx.device.last_state_change_ms = ctx.now_ms;

    // Leave power saving before the battery is sampled this pass.
    ctx.commands.analog_enabled = true;
    ctx.battery.sample_due = true;

    ctx.device.relay_energized = ctx.activation == Activation::Wake;
    ctx.device.last_toggle_ms = ctx.now_ms;

    debug!(
        "Device ON ({:?}), relay {}, period {}s",
        ctx.activation,
        if ctx.device.relay_energized { "energized" } else { "released" },
        ctx.device.frequency.seconds()
    );
}

fn on_update(ctx: &mut DeviceContext) -> Option<StateId> {
    match ctx.request.take()? {
        Activation::Button => Some(StateId::Off),
        Activation::Wake => {
            debug!("wake request while already on, ignored");
            None
        }
    }
}
