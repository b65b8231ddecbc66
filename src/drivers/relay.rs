//! Relay coil driver.
//!
//! The relay module on the board is active-low: pulling the control line
//! low energizes the coil.  The polarity is configurable so an active-high
//! module can be swapped in without touching the control logic.
//!
//! ## Dual-target design
//!
//! Generic over `embedded_hal::digital::OutputPin`.  On ESP-IDF this is an
//! `esp_idf_hal::gpio::PinDriver`; tests use a recording mock pin.

use embedded_hal::digital::OutputPin;
use log::warn;

pub struct RelayDriver<P: OutputPin> {
    pin: P,
    active_low: bool,
    energized: bool,
}

impl<P: OutputPin> RelayDriver<P> {
    /// Wrap `pin` and drive it to the released level immediately.
    pub fn new(pin: P, active_low: bool) -> Self {
        let mut relay = Self {
            pin,
            active_low,
            energized: false,
        };
        relay.set(false);
        relay
    }

    /// Energize or release the coil.  Pin errors are logged and dropped.
    pub fn set(&mut self, energized: bool) {
        let line_high = energized != self.active_low;
        let res = if line_high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if res.is_err() {
            warn!("relay: pin write failed (energized={energized})");
        }
        self.energized = energized;
    }

    pub fn is_energized(&self) -> bool {
        self.energized
    }
}
