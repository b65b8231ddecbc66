//! RelayCycler Firmware — Main Entry Point
//!
//! Hexagonal architecture with a cooperative polling loop and
//! interrupt-driven light sleep.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter                       LogEventSink            │
//! │  (Button+Actuator+Analog+Power+Clock)  (EventSink)             │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Gesture · FSM · Scheduler · Battery · LED · Power     │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Button ISR ──▶ WakeSignal (atomics) ──▶ AppService.tick()     │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use log::{info, warn};

use relaycycler::adapters::hardware::HardwareAdapter;
use relaycycler::adapters::log_sink::LogEventSink;
use relaycycler::app::service::AppService;
use relaycycler::config::SystemConfig;
use relaycycler::drivers::hw_init;
use relaycycler::drivers::relay::RelayDriver;
use relaycycler::drivers::status_led::StatusLed;
use relaycycler::wake::WAKE;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  RelayCycler v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (defaults only, nothing persisted) ───
    let config = SystemConfig::default();
    config.validate().map_err(|e| anyhow::anyhow!("invalid config: {e}"))?;
    match serde_json::to_string(&config) {
        Ok(json) => info!("Config: {json}"),
        Err(e) => warn!("Config dump failed: {e}"),
    }

    // ── 3. Peripherals ────────────────────────────────────────
    // GPIO numbers here must match `pins`.
    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    let mut button = PinDriver::input(pins.gpio2)?;
    button.set_pull(Pull::Up)?;
    let relay = RelayDriver::new(PinDriver::output(pins.gpio3)?, config.relay_active_low);
    let led = StatusLed::new(PinDriver::output(pins.gpio4)?);

    hw_init::adc_power(true)?;
    hw_init::init_button_isr()?;

    let mut hw = HardwareAdapter::new(button, relay, led, FreeRtos);
    let mut sink = LogEventSink::new();

    // ── 4. Application core ───────────────────────────────────
    let poll_ms = config.poll_interval_ms;
    let mut app = AppService::new(config, &WAKE);
    app.start(&mut hw, &mut sink);

    info!("System initialized, device OFF. Entering polling loop.");

    // ── 5. Polling loop ───────────────────────────────────────
    loop {
        app.tick(&mut hw, &mut sink);
        FreeRtos::delay_ms(poll_ms);
    }
}
