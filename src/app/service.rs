//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the FSM, the shared [`DeviceContext`] and one
//! component per subsystem.  It exposes a clean, hardware-agnostic API.
//! All I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!  WakeSignal ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!  ButtonPort ──▶ │          AppService          │
//!  AnalogPort ◀─▶ │ Gesture · FSM · Scheduler    │ ──▶ ActuatorPort
//!   ClockPort ──▶ │ Battery · LED · Power        │ ──▶ PowerPort
//!                 └──────────────────────────────┘
//! ```
//!
//! One [`tick`](AppService::tick) is one pass of the polling loop, always
//! in this order:
//!
//! 1. consume the wake signal (settle, then force activation when off)
//! 2. sample the button and dispatch the gesture
//! 3. while on: battery check → relay toggle → LED update
//! 4. while off and stable: suspend until the next interrupt

use log::debug;

use crate::config::SystemConfig;
use crate::drivers::button::{ButtonEvent, GestureClassifier};
use crate::drivers::led_patterns::LedIndicator;
use crate::fsm::context::{Activation, DeviceContext};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::power::PowerManager;
use crate::scheduler::RelayScheduler;
use crate::sensors::battery::{BatteryChange, BatteryMonitor};
use crate::wake::WakeSignal;

use super::events::{AppEvent, StatusSnapshot};
use super::ports::{ActuatorPort, AnalogPort, EventSink, HardwarePort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// Output levels last written to the board, so only changes hit the pins.
#[derive(Debug, Clone, Copy)]
struct AppliedOutputs {
    relay: bool,
    led: bool,
    analog: bool,
}

/// The application service orchestrates all domain logic.
pub struct AppService<'w> {
    wake: &'w WakeSignal,
    fsm: Fsm,
    ctx: DeviceContext,
    classifier: GestureClassifier,
    scheduler: RelayScheduler,
    battery: BatteryMonitor,
    led: LedIndicator,
    power: PowerManager,
    applied: AppliedOutputs,
    tick_count: u64,
}

impl<'w> AppService<'w> {
    /// Construct the service from configuration and the wake signal the
    /// button interrupt writes to.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: SystemConfig, wake: &'w WakeSignal) -> Self {
        let classifier = GestureClassifier::new(&config);
        let battery = BatteryMonitor::new(&config);
        let led = LedIndicator::new(config.blink_interval_ms);
        let power = PowerManager::new(&config);
        let ctx = DeviceContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Off);

        Self {
            wake,
            fsm,
            ctx,
            classifier,
            scheduler: RelayScheduler::new(),
            battery,
            led,
            power,
            applied: AppliedOutputs {
                relay: false,
                led: false,
                analog: true,
            },
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every output to its safe level and enter `Off`.
    pub fn start(&mut self, hw: &mut impl HardwarePort, sink: &mut impl EventSink) {
        hw.all_off();
        self.applied.relay = false;
        self.applied.led = false;

        self.ctx.now_ms = hw.now_ms();
        self.fsm.start(&mut self.ctx);
        self.wake.set_device_on(false);

        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        debug!(
            "AppService started in {:?}, period {}s",
            self.fsm.current_state(),
            self.ctx.device.frequency.seconds()
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one pass of the polling loop.  See the module docs for the
    /// order of operations.
    pub fn tick(&mut self, hw: &mut impl HardwarePort, sink: &mut impl EventSink) {
        self.tick_count += 1;
        self.ctx.now_ms = hw.now_ms();

        // 1. Wake signal
        self.service_wake_signal(hw, sink);

        // 2. Button gestures
        let level = hw.read_button_level();
        if let Some(event) = self.classifier.update(self.ctx.now_ms, level) {
            self.handle_gesture(event, hw, sink);
        }

        // 3. On-state subsystems, fixed order
        if self.ctx.device.on {
            if let Some(reading) = self.battery.update(&mut self.ctx, || hw.read_battery_raw()) {
                sink.emit(&AppEvent::BatterySample {
                    volts: reading.volts,
                });
                match reading.change {
                    Some(BatteryChange::Low) => sink.emit(&AppEvent::LowBattery {
                        volts: reading.volts,
                    }),
                    Some(BatteryChange::Recovered) => sink.emit(&AppEvent::BatteryRecovered {
                        volts: reading.volts,
                    }),
                    None => {}
                }
            }

            if let Some(energized) = self.scheduler.update(&mut self.ctx) {
                sink.emit(&AppEvent::RelayToggled { energized });
            }

            self.led.update(&mut self.ctx);
            self.apply_outputs(hw, sink);
            return;
        }

        // 4. Power saving
        if self.power.should_suspend(&self.ctx, self.wake) {
            self.suspend(hw, sink);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            state: self.fsm.current_state(),
            relay_energized: self.ctx.device.relay_energized,
            led_lit: self.ctx.led.lit,
            frequency_secs: self.ctx.device.frequency.seconds(),
            frequency_increasing: self.ctx.device.frequency.is_increasing(),
            battery_volts: self.ctx.battery.last_voltage,
            battery_low: self.ctx.battery.low,
            sleep_count: self.power.suspend_count(),
            uptime_ms: self.ctx.now_ms,
        }
    }

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Total loop passes executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Number of times the board was suspended.
    pub fn suspend_count(&self) -> u32 {
        self.power.suspend_count()
    }

    pub fn config(&self) -> &SystemConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn service_wake_signal(&mut self, hw: &mut impl HardwarePort, sink: &mut impl EventSink) {
        if !self.wake.take_interrupt() {
            return;
        }

        // Let the line settle before trusting the wake flag.
        hw.delay_ms(self.ctx.config.wake_settle_ms);
        self.ctx.now_ms = hw.now_ms();

        if !self.wake.take_wake_request() {
            return;
        }
        if self.ctx.device.on {
            debug!("wake request consumed while on, ignored");
            return;
        }

        debug!("Wake-up interrupt: activating device");
        let level = hw.read_button_level();
        self.classifier.mark_wake(self.ctx.now_ms, level);
        self.ctx.request = Some(Activation::Wake);
        self.run_fsm(hw, sink);

        hw.delay_ms(self.ctx.config.wake_stabilize_ms);
        self.ctx.now_ms = hw.now_ms();
    }

    fn handle_gesture(
        &mut self,
        event: ButtonEvent,
        hw: &mut impl HardwarePort,
        sink: &mut impl EventSink,
    ) {
        sink.emit(&AppEvent::Gesture(event));
        match event {
            ButtonEvent::ShortPress => {
                self.ctx.request = Some(Activation::Button);
                self.run_fsm(hw, sink);
            }
            ButtonEvent::LongPressStart | ButtonEvent::LongPressRepeat => {
                self.flash_led(hw);
                let seconds = self.scheduler.adjust_frequency(&mut self.ctx);
                sink.emit(&AppEvent::FrequencyChanged { seconds });
            }
            ButtonEvent::PressStart | ButtonEvent::LongPressEnd => {}
        }
    }

    /// Tick the FSM and, on a transition, publish it and push the new
    /// outputs to the board.
    fn run_fsm(&mut self, hw: &mut impl HardwarePort, sink: &mut impl EventSink) {
        let from = self.fsm.current_state();
        let Some(to) = self.fsm.tick(&mut self.ctx) else {
            return;
        };

        self.wake.set_device_on(to == StateId::On);
        sink.emit(&AppEvent::StateChanged {
            from,
            to,
            activation: self.ctx.activation,
        });
        if to == StateId::On && self.ctx.activation == Activation::Wake {
            sink.emit(&AppEvent::RelayForcedOn);
        }
        self.apply_outputs(hw, sink);
    }

    /// Off → on → off, one `flash_phase_ms` per phase.
    fn flash_led(&mut self, hw: &mut impl HardwarePort) {
        let phase = self.ctx.config.flash_phase_ms;
        hw.set_led(false);
        hw.delay_ms(phase);
        hw.set_led(true);
        hw.delay_ms(phase);
        hw.set_led(false);
        hw.delay_ms(phase);
        self.applied.led = false;
        self.ctx.now_ms = hw.now_ms();
    }

    fn suspend(&mut self, hw: &mut impl HardwarePort, sink: &mut impl EventSink) {
        self.power.prepare_suspend(&mut self.ctx);
        self.apply_outputs(hw, sink);

        sink.emit(&AppEvent::EnteringSleep(self.snapshot()));
        let slept = hw.suspend_until_interrupt();

        self.ctx.now_ms = hw.now_ms();
        self.power.finish_suspend(slept, self.ctx.now_ms);
        if slept {
            sink.emit(&AppEvent::WokeUp);
        } else {
            sink.emit(&AppEvent::SleepFailed);
        }
    }

    /// Translate context state into port calls, writing only what changed.
    fn apply_outputs(
        &mut self,
        hw: &mut (impl ActuatorPort + AnalogPort),
        sink: &mut impl EventSink,
    ) {
        let analog = self.ctx.commands.analog_enabled;
        if analog != self.applied.analog {
            hw.set_analog_enabled(analog);
            self.applied.analog = analog;
            if analog {
                sink.emit(&AppEvent::PowerSaveExited);
            }
        }

        let relay = self.ctx.device.relay_energized;
        if relay != self.applied.relay {
            hw.set_relay(relay);
            self.applied.relay = relay;
        }

        let led = self.ctx.led.lit;
        if led != self.applied.led {
            hw.set_led(led);
            self.applied.led = led;
        }
    }
}
