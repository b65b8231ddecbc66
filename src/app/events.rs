//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them; on the board they become log lines.

use crate::drivers::button::ButtonEvent;
use crate::fsm::StateId;
use crate::fsm::context::Activation;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The application service has started (carries initial state).
    Started(StateId),

    /// The device FSM transitioned between states.
    StateChanged {
        from: StateId,
        to: StateId,
        activation: Activation,
    },

    /// Wake-triggered activation energized the relay without waiting a period.
    RelayForcedOn,

    /// The scheduler inverted the relay.
    RelayToggled { energized: bool },

    /// A long-press tick moved the toggle period.
    FrequencyChanged { seconds: u8 },

    /// A classified button gesture.
    Gesture(ButtonEvent),

    /// A battery sample was taken.
    BatterySample { volts: f32 },

    /// Voltage fell below the low-battery threshold.
    LowBattery { volts: f32 },

    /// Voltage returned to or above the threshold.
    BatteryRecovered { volts: f32 },

    /// The analog subsystem was powered back up.
    PowerSaveExited,

    /// About to suspend (carries the state going to sleep).
    EnteringSleep(StatusSnapshot),

    /// Execution resumed after a suspension.
    WokeUp,

    /// The platform refused to suspend; retried after the guard interval.
    SleepFailed,
}

/// A point-in-time view of the device suitable for logging or tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSnapshot {
    pub state: StateId,
    pub relay_energized: bool,
    pub led_lit: bool,
    pub frequency_secs: u8,
    pub frequency_increasing: bool,
    pub battery_volts: f32,
    pub battery_low: bool,
    /// Completed suspensions since boot.
    pub sleep_count: u32,
    pub uptime_ms: u32,
}
