//! System configuration parameters
//!
//! All tunable timing, threshold and polarity parameters for the relay
//! cycler.  Nothing is persisted; the defaults are validated at boot.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Core system configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Loop ---
    /// Idle wait at the end of each polling pass (ms)
    pub poll_interval_ms: u32,

    // --- Button ---
    /// Raw button level must be stable this long before it is accepted (ms)
    pub debounce_ms: u32,
    /// Hold duration that turns a press into a long press, and the repeat
    /// interval while held (ms)
    pub long_press_ms: u32,

    // --- Wake ---
    /// Settling wait after a button interrupt before the wake flag is read (ms)
    pub wake_settle_ms: u32,
    /// Pause after a wake-triggered activation (ms)
    pub wake_stabilize_ms: u32,
    /// A press must begin within this window after a consumed wake to be
    /// treated as the waking gesture (ms)
    pub wake_gesture_window_ms: u32,
    /// Minimum time after a device state change before sleeping (ms)
    pub sleep_guard_ms: u32,

    // --- Relay ---
    /// Initial relay toggle period (seconds)
    pub initial_frequency_secs: u8,
    /// Lower bound of the toggle period (seconds)
    pub min_frequency_secs: u8,
    /// Upper bound of the toggle period (seconds)
    pub max_frequency_secs: u8,
    /// Relay module energises when its input is driven LOW
    pub relay_active_low: bool,

    // --- Battery ---
    /// Interval between battery samples while on (ms)
    pub battery_interval_ms: u32,
    /// Below this voltage the battery is reported low (V)
    pub low_battery_threshold_v: f32,
    /// Largest raw ADC code
    pub adc_full_scale: u16,
    /// ADC reference voltage (V)
    pub adc_reference_v: f32,
    /// Battery-sense resistor divider ratio (Vbat / Vpin)
    pub divider_ratio: f32,

    // --- LED ---
    /// Low-battery blink half period (ms)
    pub blink_interval_ms: u32,
    /// Duration of each phase of the frequency-change flash (ms)
    pub flash_phase_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Loop
            poll_interval_ms: 10,

            // Button
            debounce_ms: 50,
            long_press_ms: 600,

            // Wake
            wake_settle_ms: 50,
            wake_stabilize_ms: 100,
            wake_gesture_window_ms: 500,
            sleep_guard_ms: 500,

            // Relay
            initial_frequency_secs: 3,
            min_frequency_secs: 1,
            max_frequency_secs: 10,
            relay_active_low: true,

            // Battery
            battery_interval_ms: 60_000, // 1/min
            low_battery_threshold_v: 3.0,
            adc_full_scale: 4095,  // 12-bit ADC1
            adc_reference_v: 3.3,  // 12 dB attenuation
            divider_ratio: 2.0,    // 100k/100k

            // LED
            blink_interval_ms: 200,
            flash_phase_ms: 50,
        }
    }
}

impl SystemConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 || self.poll_interval_ms >= self.debounce_ms {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_ms must be > 0 and below debounce_ms",
            ));
        }
        if self.debounce_ms == 0 {
            return Err(ConfigError::ValidationFailed("debounce_ms must be > 0"));
        }
        if self.long_press_ms <= self.debounce_ms {
            return Err(ConfigError::ValidationFailed(
                "long_press_ms must exceed debounce_ms",
            ));
        }
        if self.min_frequency_secs == 0 {
            return Err(ConfigError::ValidationFailed("min_frequency_secs must be > 0"));
        }
        if self.min_frequency_secs >= self.max_frequency_secs {
            return Err(ConfigError::ValidationFailed(
                "min_frequency_secs must be below max_frequency_secs",
            ));
        }
        if !(self.min_frequency_secs..=self.max_frequency_secs)
            .contains(&self.initial_frequency_secs)
        {
            return Err(ConfigError::ValidationFailed(
                "initial_frequency_secs out of range",
            ));
        }
        if self.battery_interval_ms == 0 || self.blink_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("intervals must be > 0"));
        }
        if self.adc_full_scale == 0 {
            return Err(ConfigError::ValidationFailed("adc_full_scale must be > 0"));
        }
        if !(self.adc_reference_v > 0.0 && self.divider_ratio > 0.0) {
            return Err(ConfigError::ValidationFailed(
                "adc_reference_v and divider_ratio must be positive",
            ));
        }
        if !(self.low_battery_threshold_v > 0.0) {
            return Err(ConfigError::ValidationFailed(
                "low_battery_threshold_v must be positive",
            ));
        }
        Ok(())
    }

    /// Full-scale battery voltage the sense channel can represent.
    pub fn max_measurable_v(&self) -> f32 {
        self.adc_reference_v * self.divider_ratio
    }
}
