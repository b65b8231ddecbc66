//! Mock board for integration tests.
//!
//! Simulates the button line from a press script, advances a simulated
//! millisecond clock on every delay, and records every output call so
//! tests can assert on the full command history without touching real
//! GPIO or ADC registers.

use embedded_hal::delay::DelayNs;
use relaycycler::app::events::AppEvent;
use relaycycler::app::ports::{
    ActuatorPort, AnalogPort, ButtonPort, ClockPort, EventSink, PowerPort,
};
use relaycycler::app::service::AppService;
use relaycycler::wake::WakeSignal;

/// Loop pass period used by [`run_for`].
pub const POLL_MS: u32 = 10;

/// Raw ADC counts for ~3.7 V with the default divider.
pub const RAW_HEALTHY: u16 = 2300;
/// Raw ADC counts for ~2.7 V with the default divider.
pub const RAW_LOW: u16 = 1700;

// ── Board call record ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCall {
    SetRelay(bool),
    SetLed(bool),
    AllOff,
    Analog(bool),
    Suspend,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    start_ms: u32,
    end_ms: u32,
    edge_fired: bool,
}

// ── MockBoard ─────────────────────────────────────────────────

pub struct MockBoard<'w> {
    pub now_ms: u32,
    pub calls: Vec<BoardCall>,
    pub battery_raw: u16,
    pub relay: bool,
    pub led: bool,
    pub analog: bool,
    /// When false the falling edge never reaches the wake signal, as if the
    /// ISR were not installed.
    pub isr_wired: bool,
    presses: Vec<Press>,
    wake: &'w WakeSignal,
}

#[allow(dead_code)]
impl<'w> MockBoard<'w> {
    pub fn new(wake: &'w WakeSignal) -> Self {
        Self {
            now_ms: 1_000,
            calls: Vec::new(),
            battery_raw: RAW_HEALTHY,
            relay: false,
            led: false,
            analog: true,
            isr_wired: true,
            presses: Vec::new(),
            wake,
        }
    }

    /// Script a press starting `after_ms` from now and lasting `hold_ms`.
    pub fn press_after(&mut self, after_ms: u32, hold_ms: u32) {
        assert!(after_ms > 0, "press must start in the future");
        let start_ms = self.now_ms + after_ms;
        self.presses.push(Press {
            start_ms,
            end_ms: start_ms + hold_ms,
            edge_fired: false,
        });
    }

    pub fn advance(&mut self, ms: u32) {
        self.now_ms += ms;
        self.fire_due_edges();
    }

    pub fn button_pressed(&self) -> bool {
        self.presses
            .iter()
            .any(|p| p.start_ms <= self.now_ms && self.now_ms < p.end_ms)
    }

    pub fn count(&self, call: BoardCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    pub fn position(&self, call: BoardCall) -> Option<usize> {
        self.calls.iter().position(|c| *c == call)
    }

    pub fn led_writes_since(&self, index: usize) -> usize {
        self.calls[index..]
            .iter()
            .filter(|c| matches!(c, BoardCall::SetLed(_)))
            .count()
    }

    fn fire_due_edges(&mut self) {
        for p in &mut self.presses {
            if !p.edge_fired && p.start_ms <= self.now_ms {
                p.edge_fired = true;
                if self.isr_wired {
                    self.wake.on_button_edge();
                }
            }
        }
    }
}

impl ButtonPort for MockBoard<'_> {
    fn read_button_level(&mut self) -> bool {
        !self.button_pressed()
    }
}

impl ActuatorPort for MockBoard<'_> {
    fn set_relay(&mut self, energized: bool) {
        self.relay = energized;
        self.calls.push(BoardCall::SetRelay(energized));
    }

    fn set_led(&mut self, lit: bool) {
        self.led = lit;
        self.calls.push(BoardCall::SetLed(lit));
    }

    fn all_off(&mut self) {
        self.relay = false;
        self.led = false;
        self.calls.push(BoardCall::AllOff);
    }
}

impl AnalogPort for MockBoard<'_> {
    fn read_battery_raw(&mut self) -> u16 {
        assert!(self.analog, "battery read with analog powered down");
        self.battery_raw
    }

    fn set_analog_enabled(&mut self, enabled: bool) {
        self.analog = enabled;
        self.calls.push(BoardCall::Analog(enabled));
    }
}

impl PowerPort for MockBoard<'_> {
    /// Level-triggered wake: returns at once while the button is held,
    /// otherwise jumps to the next scripted press (or an hour ahead).
    fn suspend_until_interrupt(&mut self) -> bool {
        self.calls.push(BoardCall::Suspend);
        if self.button_pressed() {
            if self.isr_wired {
                self.wake.on_button_edge();
            }
            return true;
        }
        let next = self
            .presses
            .iter()
            .filter(|p| !p.edge_fired && p.start_ms > self.now_ms)
            .map(|p| p.start_ms)
            .min();
        self.now_ms = next.unwrap_or(self.now_ms + 3_600_000);
        self.fire_due_edges();
        true
    }
}

impl ClockPort for MockBoard<'_> {
    fn now_ms(&self) -> u32 {
        self.now_ms
    }
}

impl DelayNs for MockBoard<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.advance(ns.div_ceil(1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.advance(ms);
    }
}

// ── Recording sink ────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn gestures(&self) -> Vec<relaycycler::drivers::button::ButtonEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Gesture(g) => Some(*g),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Loop driver ───────────────────────────────────────────────

/// Run loop passes every [`POLL_MS`] until `ms` of simulated time passed.
pub fn run_for(app: &mut AppService<'_>, hw: &mut MockBoard<'_>, sink: &mut RecordingSink, ms: u32) {
    let end = hw.now_ms + ms;
    while hw.now_ms < end {
        app.tick(hw, sink);
        hw.advance(POLL_MS);
    }
}
