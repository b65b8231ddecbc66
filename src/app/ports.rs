//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (button line, relay/LED outputs, battery ADC, sleep,
//! clock, event sinks) implement these traits.  The
//! [`AppService`](super::service::AppService) consumes them via generics,
//! so the domain core never touches hardware directly.
//!
//! None of the ports return errors: the control loop has no failable
//! operation.  Adapters log and swallow driver errors.

use embedded_hal::delay::DelayNs;

// ───────────────────────────────────────────────────────────────
// Button port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the push button line.
pub trait ButtonPort {
    /// Sample the line: `true` = released (pull-up), `false` = pressed.
    /// A failed read must report released.
    fn read_button_level(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to drive digital outputs.
pub trait ActuatorPort {
    /// Energize or release the relay coil (polarity handled by the adapter).
    fn set_relay(&mut self, energized: bool);

    /// Light or darken the status LED.
    fn set_led(&mut self, lit: bool);

    /// Relay released and LED dark: the safe state at boot.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Analog port (driven adapter: hardware ↔ domain)
// ───────────────────────────────────────────────────────────────

pub trait AnalogPort {
    /// One raw sample on the battery-sense channel.
    fn read_battery_raw(&mut self) -> u16;

    /// Power the analog subsystem up or down.
    fn set_analog_enabled(&mut self, enabled: bool);
}

// ───────────────────────────────────────────────────────────────
// Power port (driven adapter: domain → platform sleep)
// ───────────────────────────────────────────────────────────────

pub trait PowerPort {
    /// Enter the deepest low-power mode that still resumes execution and
    /// block until the button interrupt (or another wake source) fires.
    /// Returns `false` when the platform refused to suspend.
    fn suspend_until_interrupt(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.  Wraps after ~49.7 days; every consumer
/// compares with `wrapping_sub`.
pub trait ClockPort {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Fire-and-forget: nothing is returned, so a broken
/// sink cannot influence control flow.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Combined board port
// ───────────────────────────────────────────────────────────────

/// Everything the service needs from one board, plus bounded delays for
/// debounce settling and LED feedback.
///
/// Taking the board as a single `&mut` avoids aliasing between ports that
/// share one peripheral set.
pub trait HardwarePort: ButtonPort + ActuatorPort + AnalogPort + PowerPort + ClockPort + DelayNs {}

impl<T> HardwarePort for T where
    T: ButtonPort + ActuatorPort + AnalogPort + PowerPort + ClockPort + DelayNs
{
}
