//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::drivers::button::ButtonEvent;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::StateChanged {
                from,
                to,
                activation,
            } => {
                info!("STATE | {:?} -> {:?} ({:?})", from, to, activation);
            }
            AppEvent::RelayForcedOn => {
                info!("RELAY | wake activation, forced ON");
            }
            AppEvent::RelayToggled { energized } => {
                info!("RELAY | toggled to {}", if *energized { "ON" } else { "OFF" });
            }
            AppEvent::FrequencyChanged { seconds } => {
                info!("FREQ  | period {} s", seconds);
            }
            AppEvent::Gesture(g) => match g {
                ButtonEvent::PressStart => info!("BTN   | pressed"),
                ButtonEvent::ShortPress => info!("BTN   | short press, toggling"),
                ButtonEvent::LongPressStart => info!("BTN   | long press"),
                ButtonEvent::LongPressRepeat => info!("BTN   | long press repeat"),
                ButtonEvent::LongPressEnd => info!("BTN   | long press ended"),
            },
            AppEvent::BatterySample { volts } => {
                info!("BATT  | {:.2} V", volts);
            }
            AppEvent::LowBattery { volts } => {
                warn!("BATT  | LOW {:.2} V", volts);
            }
            AppEvent::BatteryRecovered { volts } => {
                info!("BATT  | recovered {:.2} V", volts);
            }
            AppEvent::PowerSaveExited => {
                info!("POWER | power saving exited");
            }
            AppEvent::EnteringSleep(s) => {
                info!(
                    "POWER | entering sleep #{} | state={:?} relay={} period={}s batt={:.2}V{} up={}ms",
                    s.sleep_count + 1,
                    s.state,
                    if s.relay_energized { "ON" } else { "OFF" },
                    s.frequency_secs,
                    s.battery_volts,
                    if s.battery_low { " LOW" } else { "" },
                    s.uptime_ms,
                );
            }
            AppEvent::WokeUp => {
                info!("POWER | woke up");
            }
            AppEvent::SleepFailed => {
                warn!("POWER | sleep refused, staying awake");
            }
        }
    }
}
