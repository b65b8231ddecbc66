//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the button input, the relay and LED drivers, the delay provider and
//! the clock, exposing them through the [`app::ports`](crate::app::ports)
//! traits.  This is the only module in the system that touches actual
//! hardware.  Pins are any `embedded-hal` 1.0 implementation, so the same
//! adapter runs on `esp_idf_hal` pin drivers and on host mocks; ADC and
//! sleep go through [`hw_init`], which has simulation stubs off-target.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::adapters::time::Esp32TimeAdapter;
use crate::app::ports::{ActuatorPort, AnalogPort, ButtonPort, ClockPort, PowerPort};
use crate::drivers::button::RELEASED;
use crate::drivers::hw_init::{self, WakeCause};
use crate::drivers::relay::RelayDriver;
use crate::drivers::status_led::StatusLed;
use crate::pins;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<B, R, L, D>
where
    B: InputPin,
    R: OutputPin,
    L: OutputPin,
    D: DelayNs,
{
    button: B,
    relay: RelayDriver<R>,
    led: StatusLed<L>,
    delay: D,
    clock: Esp32TimeAdapter,
}

impl<B, R, L, D> HardwareAdapter<B, R, L, D>
where
    B: InputPin,
    R: OutputPin,
    L: OutputPin,
    D: DelayNs,
{
    pub fn new(button: B, relay: RelayDriver<R>, led: StatusLed<L>, delay: D) -> Self {
        Self {
            button,
            relay,
            led,
            delay,
            clock: Esp32TimeAdapter::new(),
        }
    }
}

// ── ButtonPort implementation ─────────────────────────────────

impl<B, R, L, D> ButtonPort for HardwareAdapter<B, R, L, D>
where
    B: InputPin,
    R: OutputPin,
    L: OutputPin,
    D: DelayNs,
{
    fn read_button_level(&mut self) -> bool {
        self.button.is_high().unwrap_or_else(|_| {
            warn!("button: pin read failed, treating as released");
            RELEASED
        })
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<B, R, L, D> ActuatorPort for HardwareAdapter<B, R, L, D>
where
    B: InputPin,
    R: OutputPin,
    L: OutputPin,
    D: DelayNs,
{
    fn set_relay(&mut self, energized: bool) {
        self.relay.set(energized);
    }

    fn set_led(&mut self, lit: bool) {
        self.led.set(lit);
    }

    fn all_off(&mut self) {
        self.relay.set(false);
        self.led.off();
    }
}

// ── AnalogPort implementation ─────────────────────────────────

impl<B, R, L, D> AnalogPort for HardwareAdapter<B, R, L, D>
where
    B: InputPin,
    R: OutputPin,
    L: OutputPin,
    D: DelayNs,
{
    fn read_battery_raw(&mut self) -> u16 {
        hw_init::adc1_read(pins::BATTERY_ADC_CHANNEL)
    }

    fn set_analog_enabled(&mut self, enabled: bool) {
        if let Err(e) = hw_init::adc_power(enabled) {
            warn!("analog power change failed: {e}");
        }
    }
}

// ── PowerPort implementation ──────────────────────────────────

impl<B, R, L, D> PowerPort for HardwareAdapter<B, R, L, D>
where
    B: InputPin,
    R: OutputPin,
    L: OutputPin,
    D: DelayNs,
{
    fn suspend_until_interrupt(&mut self) -> bool {
        match hw_init::light_sleep_until_button() {
            Ok(WakeCause::Button) => true,
            Ok(WakeCause::Other) => {
                log::debug!("woke without button edge");
                true
            }
            Err(e) => {
                warn!("light sleep unavailable: {e}");
                false
            }
        }
    }
}

// ── Clock and delay ───────────────────────────────────────────

impl<B, R, L, D> ClockPort for HardwareAdapter<B, R, L, D>
where
    B: InputPin,
    R: OutputPin,
    L: OutputPin,
    D: DelayNs,
{
    fn now_ms(&self) -> u32 {
        self.clock.now_ms()
    }
}

impl<B, R, L, D> DelayNs for HardwareAdapter<B, R, L, D>
where
    B: InputPin,
    R: OutputPin,
    L: OutputPin,
    D: DelayNs,
{
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
