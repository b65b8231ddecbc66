//! Single-colour status LED driver (active-high).
//!
//! ## Dual-target design
//!
//! Generic over `embedded_hal::digital::OutputPin`; on ESP-IDF a
//! `PinDriver`, on host a mock.

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

pub struct StatusLed<P: OutputPin> {
    pin: P,
}

impl<P: OutputPin> StatusLed<P> {
    pub fn new(pin: P) -> Self {
        let mut led = Self { pin };
        led.set(false);
        led
    }

    pub fn set(&mut self, lit: bool) {
        if self.pin.set_state(PinState::from(lit)).is_err() {
            warn!("status LED: pin write failed");
        }
    }

    pub fn off(&mut self) {
        self.set(false);
    }
}
