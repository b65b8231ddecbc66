//! Shared mutable context threaded through every FSM handler and
//! on-state subsystem.
//!
//! `DeviceContext` is the single aggregate the polling loop owns and passes
//! to each component's update call.  Every field has exactly one writer:
//!
//! | Field      | Writer                                   |
//! |------------|------------------------------------------|
//! | `device`   | FSM handlers, relay scheduler            |
//! | `battery`  | battery monitor                          |
//! | `led`      | LED indicator, FSM `Off` entry           |
//! | `commands` | FSM handlers, power controller           |
//! | `request`  | application service (from button / wake) |

use crate::config::SystemConfig;
use crate::control::oscillator::FrequencyOscillator;

// ---------------------------------------------------------------------------
// Device state (FSM + relay scheduler)
// ---------------------------------------------------------------------------

/// On/off flag, relay output and toggle timing.
///
/// Invariant: `on == false` implies `relay_energized == false`.
#[derive(Debug, Clone, Copy)]
pub struct DeviceState {
    pub on: bool,
    pub relay_energized: bool,
    /// Toggle period (seconds) and its oscillation direction.
    pub frequency: FrequencyOscillator,
    pub last_toggle_ms: u32,
    pub last_state_change_ms: u32,
}

// ---------------------------------------------------------------------------
// Battery state (battery monitor)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct BatteryState {
    /// Most recent computed battery voltage (V).
    pub last_voltage: f32,
    pub low: bool,
    pub last_sample_ms: u32,
    /// Sample on the next on-state pass regardless of the interval.
    pub sample_due: bool,
}

// ---------------------------------------------------------------------------
// LED state (LED indicator)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct LedState {
    /// Desired LED output.
    pub lit: bool,
    /// Last edge of the low-battery blink.
    pub last_blink_ms: u32,
}

// ---------------------------------------------------------------------------
// Transition metadata
// ---------------------------------------------------------------------------

/// What caused a toggle request.  Decides the relay level on `Off → On`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Debounced short press.
    Button,
    /// Wake request consumed from the interrupt flags.
    Wake,
}

// ---------------------------------------------------------------------------
// Output commands (written by handlers; applied by the service)
// ---------------------------------------------------------------------------

/// Peripheral power requests that are not derived from device/LED state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerCommands {
    /// Analog subsystem powered (battery sense available).
    pub analog_enabled: bool,
}

impl Default for PowerCommands {
    fn default() -> Self {
        Self {
            analog_enabled: true,
        }
    }
}

// ---------------------------------------------------------------------------
// DeviceContext
// ---------------------------------------------------------------------------

pub struct DeviceContext {
    /// Monotonic time of the current step (ms, wrapping).
    pub now_ms: u32,

    pub device: DeviceState,
    pub battery: BatteryState,
    pub led: LedState,
    pub commands: PowerCommands,

    /// Pending toggle request, consumed by the FSM update handler.
    pub request: Option<Activation>,
    /// How the most recent `Off → On` transition was triggered.
    pub activation: Activation,

    /// System configuration (tunable parameters).
    pub config: SystemConfig,
}

impl DeviceContext {
    /// Create a new context in the power-on state: off, relay released,
    /// frequency at its configured initial value and rising.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            now_ms: 0,
            device: DeviceState {
                on: false,
                relay_energized: false,
                frequency: FrequencyOscillator::new(
                    config.initial_frequency_secs,
                    config.min_frequency_secs,
                    config.max_frequency_secs,
                ),
                last_toggle_ms: 0,
                last_state_change_ms: 0,
            },
            battery: BatteryState::default(),
            led: LedState::default(),
            commands: PowerCommands::default(),
            request: None,
            activation: Activation::Button,
            config,
        }
    }

    /// Milliseconds since the last device on/off transition.
    pub fn ms_since_state_change(&self) -> u32 {
        self.now_ms.wrapping_sub(self.device.last_state_change_ms)
    }
}
