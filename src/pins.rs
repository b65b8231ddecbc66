//! GPIO / peripheral pin assignments for the relay cycler board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// User input
// ---------------------------------------------------------------------------

/// Momentary push button to GND, internal pull-up.  LOW = pressed.
/// Falling edge raises the wake interrupt; LOW level is the light-sleep
/// wake source.
pub const BUTTON_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Relay module input.  Active LOW on the stock module (LOW = contacts
/// closed); polarity is configurable via `SystemConfig::relay_active_low`.
pub const RELAY_GPIO: i32 = 3;

/// Single status LED, active HIGH.
pub const LED_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Battery sense (ADC1)
// ---------------------------------------------------------------------------

/// Battery voltage via 100k/100k divider.  ADC1 channel 4 (GPIO 5 on ESP32-S3).
pub const BATTERY_ADC_GPIO: i32 = 5;
/// ADC1 channel number matching [`BATTERY_ADC_GPIO`].
pub const BATTERY_ADC_CHANNEL: u32 = 4;
