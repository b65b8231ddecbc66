//! Button gestures → FSM and frequency control, with the button ISR
//! unwired so every press reaches the service only through polling.

use crate::mock_hw::{run_for, BoardCall, MockBoard, RecordingSink};

use relaycycler::app::events::AppEvent;
use relaycycler::app::service::AppService;
use relaycycler::config::SystemConfig;
use relaycycler::drivers::button::ButtonEvent;
use relaycycler::fsm::StateId;
use relaycycler::wake::WakeSignal;

/// Polled-only board that never sleeps during the scenario.
fn setup(wake: &WakeSignal) -> (AppService<'_>, MockBoard<'_>, RecordingSink) {
    let config = SystemConfig {
        sleep_guard_ms: 600_000,
        ..SystemConfig::default()
    };
    let mut app = AppService::new(config, wake);
    let mut hw = MockBoard::new(wake);
    hw.isr_wired = false;
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);
    (app, hw, sink)
}

fn frequency_changes(sink: &RecordingSink) -> Vec<u8> {
    sink.events
        .iter()
        .filter_map(|e| match e {
            AppEvent::FrequencyChanged { seconds } => Some(*seconds),
            _ => None,
        })
        .collect()
}

#[test]
fn short_press_turns_on_with_relay_released() {
    let wake = WakeSignal::new();
    let (mut app, mut hw, mut sink) = setup(&wake);

    // Pressed 1100..1300, accepted at 1150, released and classified at 1350.
    hw.press_after(100, 200);
    run_for(&mut app, &mut hw, &mut sink, 400);

    assert_eq!(app.state(), StateId::On);
    assert!(!hw.relay);
    assert!(!sink.events.contains(&AppEvent::RelayForcedOn));
    assert_eq!(
        sink.gestures(),
        vec![ButtonEvent::PressStart, ButtonEvent::ShortPress]
    );

    // First toggle is due one full period (3 s) after turning on.
    run_for(&mut app, &mut hw, &mut sink, 2_850);
    assert!(!hw.relay);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::RelayToggled { .. })), 0);

    run_for(&mut app, &mut hw, &mut sink, 110);
    assert!(hw.relay);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::RelayToggled { energized: true })),
        1
    );
}

#[test]
fn hold_700ms_while_off_adjusts_frequency_only() {
    let wake = WakeSignal::new();
    let (mut app, mut hw, mut sink) = setup(&wake);

    hw.press_after(100, 700);
    run_for(&mut app, &mut hw, &mut sink, 1_500);

    assert_eq!(
        sink.gestures(),
        vec![
            ButtonEvent::PressStart,
            ButtonEvent::LongPressStart,
            ButtonEvent::LongPressEnd,
        ]
    );
    assert_eq!(app.state(), StateId::Off);
    assert_eq!(hw.count(BoardCall::SetRelay(true)), 0);
    assert_eq!(frequency_changes(&sink), vec![4]);
}

#[test]
fn long_press_flashes_led_off_on_off() {
    let wake = WakeSignal::new();
    let (mut app, mut hw, mut sink) = setup(&wake);

    hw.press_after(100, 700);
    let mark = hw.calls.len();
    run_for(&mut app, &mut hw, &mut sink, 1_500);

    let leds: Vec<BoardCall> = hw.calls[mark..]
        .iter()
        .copied()
        .filter(|c| matches!(c, BoardCall::SetLed(_)))
        .collect();
    assert_eq!(
        leds,
        vec![
            BoardCall::SetLed(false),
            BoardCall::SetLed(true),
            BoardCall::SetLed(false),
        ]
    );
    assert!(!hw.led);
}

#[test]
fn sustained_hold_steps_frequency_each_threshold() {
    let wake = WakeSignal::new();
    let (mut app, mut hw, mut sink) = setup(&wake);

    // Accepted at 1150: long press at +600, repeats at +1200, +1800, +2400.
    hw.press_after(100, 2_800);
    run_for(&mut app, &mut hw, &mut sink, 3_500);

    assert_eq!(frequency_changes(&sink), vec![4, 5, 6, 7]);
    assert_eq!(
        sink.gestures()
            .iter()
            .filter(|g| **g == ButtonEvent::LongPressRepeat)
            .count(),
        3
    );
    assert_eq!(sink.gestures().last(), Some(&ButtonEvent::LongPressEnd));
    assert_eq!(app.state(), StateId::Off);
}

#[test]
fn adjusted_period_applies_after_turning_on() {
    let wake = WakeSignal::new();
    let (mut app, mut hw, mut sink) = setup(&wake);

    hw.press_after(100, 700);
    run_for(&mut app, &mut hw, &mut sink, 1_500);
    assert_eq!(app.snapshot().frequency_secs, 4);

    // Short press: on at 2850, first toggle due at 6850.
    hw.press_after(100, 200);
    run_for(&mut app, &mut hw, &mut sink, 4_000);
    assert_eq!(app.state(), StateId::On);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::RelayToggled { .. })), 0);

    run_for(&mut app, &mut hw, &mut sink, 400);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::RelayToggled { .. })), 1);
    assert!(hw.relay);
}

#[test]
fn second_short_press_turns_off_and_releases_relay() {
    let wake = WakeSignal::new();
    let (mut app, mut hw, mut sink) = setup(&wake);

    hw.press_after(100, 200);
    run_for(&mut app, &mut hw, &mut sink, 3_500);
    assert!(hw.relay, "relay toggled on after the first period");

    hw.press_after(100, 200);
    run_for(&mut app, &mut hw, &mut sink, 400);

    assert_eq!(app.state(), StateId::Off);
    assert!(!hw.relay);
    assert!(!hw.led);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::StateChanged { to: StateId::Off, .. })),
        1
    );
}
