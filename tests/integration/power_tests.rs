//! Power controller → light sleep and wake, with the ISR wired.

use crate::mock_hw::{run_for, BoardCall, MockBoard, RecordingSink};

use relaycycler::app::events::AppEvent;
use relaycycler::app::service::AppService;
use relaycycler::config::SystemConfig;
use relaycycler::drivers::button::ButtonEvent;
use relaycycler::fsm::StateId;
use relaycycler::wake::WakeSignal;

fn setup(wake: &WakeSignal) -> (AppService<'_>, MockBoard<'_>, RecordingSink) {
    let mut app = AppService::new(SystemConfig::default(), wake);
    let mut hw = MockBoard::new(wake);
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);
    (app, hw, sink)
}

fn sleep_snapshots(sink: &RecordingSink) -> Vec<relaycycler::app::events::StatusSnapshot> {
    sink.events
        .iter()
        .filter_map(|e| match e {
            AppEvent::EnteringSleep(snap) => Some(*snap),
            _ => None,
        })
        .collect()
}

#[test]
fn stays_awake_inside_guard_interval() {
    let wake = WakeSignal::new();
    let (mut app, mut hw, mut sink) = setup(&wake);

    run_for(&mut app, &mut hw, &mut sink, 490);

    assert_eq!(hw.count(BoardCall::Suspend), 0);
    assert_eq!(app.suspend_count(), 0);
    assert!(hw.analog);
}

#[test]
fn sleeps_once_guard_elapses_with_analog_off() {
    let wake = WakeSignal::new();
    let (mut app, mut hw, mut sink) = setup(&wake);

    run_for(&mut app, &mut hw, &mut sink, 600);

    assert_eq!(app.suspend_count(), 1);
    let analog_off = hw.position(BoardCall::Analog(false)).expect("analog off");
    let suspend = hw.position(BoardCall::Suspend).expect("suspended");
    assert!(analog_off < suspend);

    let snaps = sleep_snapshots(&sink);
    assert_eq!(snaps.len(), 1);
    assert_eq!(snaps[0].state, StateId::Off);
    assert!(!snaps[0].relay_energized);
    assert_eq!(snaps[0].uptime_ms, 1_500);
    assert!(sink.events.contains(&AppEvent::WokeUp));
}

#[test]
fn press_during_sleep_wakes_and_energizes_relay() {
    let wake = WakeSignal::new();
    let (mut app, mut hw, mut sink) = setup(&wake);

    // Asleep at 1500, the press at 5000 ends the suspension.
    hw.press_after(4_000, 300);
    run_for(&mut app, &mut hw, &mut sink, 600);
    assert_eq!(hw.now_ms, 5_010);
    assert_eq!(app.state(), StateId::Off);

    app.tick(&mut hw, &mut sink);

    assert_eq!(app.state(), StateId::On);
    assert!(hw.relay);
    assert!(hw.analog);
    assert!(sink.events.contains(&AppEvent::PowerSaveExited));
    let suspend = hw.position(BoardCall::Suspend).expect("suspended");
    let analog_on = hw.position(BoardCall::Analog(true)).expect("analog on");
    assert!(suspend < analog_on);

    run_for(&mut app, &mut hw, &mut sink, 500);
    assert!(!sink.gestures().contains(&ButtonEvent::ShortPress));
    assert_eq!(app.state(), StateId::On);
}

#[test]
fn never_sleeps_while_on() {
    let wake = WakeSignal::new();
    let (mut app, mut hw, mut sink) = setup(&wake);

    hw.press_after(100, 300);
    run_for(&mut app, &mut hw, &mut sink, 10_000);

    assert_eq!(app.state(), StateId::On);
    assert_eq!(hw.count(BoardCall::Suspend), 0);
}

#[test]
fn turning_off_leads_to_sleep_after_guard() {
    let wake = WakeSignal::new();
    let (mut app, mut hw, mut sink) = setup(&wake);

    // Wake at 1100, on at 1150.
    hw.press_after(100, 300);
    run_for(&mut app, &mut hw, &mut sink, 1_250);
    assert_eq!(app.state(), StateId::On);

    // Edge at 2350 only settles; accepted at 2450, short press at 2600.
    hw.press_after(100, 200);
    run_for(&mut app, &mut hw, &mut sink, 1_500);

    assert_eq!(app.state(), StateId::Off);
    assert_eq!(app.suspend_count(), 1);
    let snaps = sleep_snapshots(&sink);
    assert_eq!(snaps.len(), 1);
    assert_eq!(snaps[0].uptime_ms, 3_100);
    assert!(!snaps[0].relay_energized);
    assert!(!snaps[0].led_lit);
    assert!(!hw.relay);
}
