//! Battery monitor → events and LED blink, over minutes of simulated time.

use crate::mock_hw::{run_for, MockBoard, RecordingSink, RAW_HEALTHY, RAW_LOW};

use relaycycler::app::events::AppEvent;
use relaycycler::app::service::AppService;
use relaycycler::config::SystemConfig;
use relaycycler::fsm::StateId;
use relaycycler::wake::WakeSignal;

/// Turned on by a polled short press at t=1350, battery sampled at once.
fn powered_on(wake: &WakeSignal) -> (AppService<'_>, MockBoard<'_>, RecordingSink) {
    let config = SystemConfig {
        sleep_guard_ms: 600_000,
        ..SystemConfig::default()
    };
    let mut app = AppService::new(config, wake);
    let mut hw = MockBoard::new(wake);
    hw.isr_wired = false;
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);

    hw.press_after(100, 200);
    run_for(&mut app, &mut hw, &mut sink, 400);
    assert_eq!(app.state(), StateId::On);
    (app, hw, sink)
}

fn low_count(sink: &RecordingSink) -> usize {
    sink.count(|e| matches!(e, AppEvent::LowBattery { .. }))
}

#[test]
fn samples_on_activation_then_once_per_minute() {
    let wake = WakeSignal::new();
    let (mut app, mut hw, mut sink) = powered_on(&wake);
    let samples = |s: &RecordingSink| s.count(|e| matches!(e, AppEvent::BatterySample { .. }));

    assert_eq!(samples(&sink), 1);
    run_for(&mut app, &mut hw, &mut sink, 59_000);
    assert_eq!(samples(&sink), 1);
    run_for(&mut app, &mut hw, &mut sink, 1_000);
    assert_eq!(samples(&sink), 2);
    assert_eq!(low_count(&sink), 0);

    let volts = app.snapshot().battery_volts;
    assert!((volts - 3.706).abs() < 0.01, "volts = {volts}");
}

#[test]
fn low_battery_reported_once_and_led_blinks() {
    let wake = WakeSignal::new();
    let (mut app, mut hw, mut sink) = powered_on(&wake);

    hw.battery_raw = RAW_LOW;
    run_for(&mut app, &mut hw, &mut sink, 61_000);
    assert_eq!(low_count(&sink), 1);
    assert!(app.snapshot().battery_low);

    let mark = hw.calls.len();
    run_for(&mut app, &mut hw, &mut sink, 1_000);
    assert!(
        hw.led_writes_since(mark) >= 4,
        "LED should blink every 200 ms while the battery is low"
    );

    // Later low samples do not repeat the warning.
    run_for(&mut app, &mut hw, &mut sink, 120_000);
    assert_eq!(low_count(&sink), 1);
}

#[test]
fn recovery_restores_relay_mirroring() {
    let wake = WakeSignal::new();
    let (mut app, mut hw, mut sink) = powered_on(&wake);

    hw.battery_raw = RAW_LOW;
    run_for(&mut app, &mut hw, &mut sink, 61_000);
    assert_eq!(low_count(&sink), 1);

    hw.battery_raw = RAW_HEALTHY;
    run_for(&mut app, &mut hw, &mut sink, 60_000);

    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::BatteryRecovered { .. })),
        1
    );
    assert!(!app.snapshot().battery_low);
    assert_eq!(hw.led, hw.relay);
}

#[test]
fn no_samples_while_off() {
    let wake = WakeSignal::new();
    let config = SystemConfig {
        sleep_guard_ms: 600_000,
        ..SystemConfig::default()
    };
    let mut app = AppService::new(config, &wake);
    let mut hw = MockBoard::new(&wake);
    hw.isr_wired = false;
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);

    hw.battery_raw = RAW_LOW;
    run_for(&mut app, &mut hw, &mut sink, 120_000);

    assert_eq!(sink.count(|e| matches!(e, AppEvent::BatterySample { .. })), 0);
    assert!(!hw.led);
}
