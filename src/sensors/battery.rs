//! Battery voltage monitor.
//!
//! Converts a raw ADC sample on the battery-sense divider to volts and
//! edge-triggers a low-battery flag on a single threshold:
//!
//! ```text
//!   V ─────╮                      ╭──────
//!          │   low = true         │  low = false
//!   thr ───┼──────────────────────┼──────── (one event per crossing)
//!          ╰──────────────────────╯
//! ```
//!
//! Sampling happens only while the device is on: once on entry, then every
//! `battery_interval_ms`.  The raw read is passed in as a closure so the
//! monitor stays independent of the ADC driver.

use crate::fsm::context::DeviceContext;
use log::debug;

/// Threshold crossing produced by a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryChange {
    /// Voltage fell below the threshold.
    Low,
    /// Voltage rose back to or above the threshold.
    Recovered,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryReading {
    pub raw: u16,
    pub volts: f32,
    pub change: Option<BatteryChange>,
}

#[derive(Debug, Clone, Copy)]
pub struct BatteryMonitor {
    full_scale: f32,
    reference_v: f32,
    divider_ratio: f32,
    threshold_v: f32,
    interval_ms: u32,
}

impl BatteryMonitor {
    pub fn new(config: &crate::config::SystemConfig) -> Self {
        Self {
            full_scale: f32::from(config.adc_full_scale),
            reference_v: config.adc_reference_v,
            divider_ratio: config.divider_ratio,
            threshold_v: config.low_battery_threshold_v,
            interval_ms: config.battery_interval_ms,
        }
    }

    /// Raw ADC counts → battery volts.
    pub fn raw_to_volts(&self, raw: u16) -> f32 {
        if self.full_scale <= 0.0 {
            return 0.0;
        }
        let raw = f32::from(raw).min(self.full_scale);
        raw / self.full_scale * self.reference_v * self.divider_ratio
    }

    /// Whether a sample should be taken this pass.
    pub fn is_due(&self, ctx: &DeviceContext) -> bool {
        ctx.device.on
            && (ctx.battery.sample_due
                || ctx.now_ms.wrapping_sub(ctx.battery.last_sample_ms) >= self.interval_ms)
    }

    /// Sample if due and update `ctx.battery`.
    pub fn update<F>(&mut self, ctx: &mut DeviceContext, read_raw: F) -> Option<BatteryReading>
    where
        F: FnOnce() -> u16,
    {
        if !self.is_due(ctx) {
            return None;
        }

        let raw = read_raw();
        let volts = self.raw_to_volts(raw);

        ctx.battery.last_voltage = volts;
        ctx.battery.last_sample_ms = ctx.now_ms;
        ctx.battery.sample_due = false;
        debug!("Battery voltage: {volts:.2} V (raw {raw})");

        let change = if volts < self.threshold_v && !ctx.battery.low {
            ctx.battery.low = true;
            debug!("Low battery: {volts:.2} V");
            Some(BatteryChange::Low)
        } else if volts >= self.threshold_v && ctx.battery.low {
            ctx.battery.low = false;
            debug!("Battery recovered: {volts:.2} V");
            Some(BatteryChange::Recovered)
        } else {
            None
        };

        Some(BatteryReading { raw, volts, change })
    }
}
