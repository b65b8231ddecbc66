//! Polled, debounced button gesture classifier.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up: `true` = released,
//! `false` = pressed.  The falling-edge ISR only feeds the wake signal;
//! gesture detection runs here, from the main loop, on sampled levels.
//!
//! ## Gesture detection
//!
//! | Gesture        | Condition                                  | Event             |
//! |----------------|--------------------------------------------|-------------------|
//! | Press          | Debounced released → pressed               | `PressStart`      |
//! | Short press    | Release < long-press threshold             | `ShortPress`      |
//! | Long press     | Held >= threshold                          | `LongPressStart`  |
//! | Repeat         | Every further threshold while held         | `LongPressRepeat` |
//! | Long release   | Release after long press, or wake gesture  | `LongPressEnd`    |
//!
//! The gesture that woke the device is never reported as `ShortPress`.

use crate::config::SystemConfig;

/// Button level when nothing presses it (pull-up).
pub const RELEASED: bool = true;
/// Button level while pressed.
pub const PRESSED: bool = false;

/// Button events emitted after gesture classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    PressStart,
    ShortPress,
    LongPressStart,
    LongPressRepeat,
    LongPressEnd,
}

/// Raw and debounced line state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonState {
    /// Level seen on the most recent sample.
    pub raw_level: bool,
    /// Last level that stayed stable for the debounce interval.
    pub debounced_level: bool,
    /// When `raw_level` last changed.
    pub last_change_ms: u32,
    /// When the current press was accepted.  Meaningful only while `held`.
    pub press_start_ms: u32,
    pub held: bool,
    pub long_press_active: bool,
    /// Hold time (since `press_start_ms`) at which the next repeat fires.
    pub next_repeat_ms: u32,
    /// The current press is the one that woke the device.
    pub wake_gesture: bool,
    /// A wake was consumed at this time and no press has claimed it yet.
    pub wake_marked_ms: Option<u32>,
}

impl ButtonState {
    fn new() -> Self {
        Self {
            raw_level: RELEASED,
            debounced_level: RELEASED,
            last_change_ms: 0,
            press_start_ms: 0,
            held: false,
            long_press_active: false,
            next_repeat_ms: 0,
            wake_gesture: false,
            wake_marked_ms: None,
        }
    }
}

pub struct GestureClassifier {
    state: ButtonState,
    debounce_ms: u32,
    long_press_ms: u32,
    wake_window_ms: u32,
}

impl GestureClassifier {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            state: ButtonState::new(),
            debounce_ms: config.debounce_ms,
            long_press_ms: config.long_press_ms,
            wake_window_ms: config.wake_gesture_window_ms,
        }
    }

    pub fn state(&self) -> &ButtonState {
        &self.state
    }

    /// Feed one sample of the button line.  Call once per loop iteration.
    /// Returns at most one event; a late repeat is delivered on the next
    /// call rather than dropped.
    pub fn update(&mut self, now_ms: u32, level: bool) -> Option<ButtonEvent> {
        let s = &mut self.state;

        if level != s.raw_level {
            s.raw_level = level;
            s.last_change_ms = now_ms;
        }

        let stable = now_ms.wrapping_sub(s.last_change_ms) >= self.debounce_ms;

        if let Some(marked) = s.wake_marked_ms {
            // The waking press ended before it was ever accepted.
            let released = stable && s.raw_level == RELEASED;
            if !s.held && (released || now_ms.wrapping_sub(marked) > self.wake_window_ms) {
                s.wake_marked_ms = None;
            }
        }

        if stable && s.raw_level != s.debounced_level {
            s.debounced_level = s.raw_level;
            if s.debounced_level == PRESSED && !s.held {
                return Some(self.begin_press(now_ms));
            }
            if s.debounced_level == RELEASED && s.held {
                return Some(self.end_press(now_ms));
            }
        }

        let s = &mut self.state;
        if s.held {
            let held_ms = now_ms.wrapping_sub(s.press_start_ms);
            if !s.long_press_active && held_ms >= self.long_press_ms {
                s.long_press_active = true;
                s.next_repeat_ms = self.long_press_ms.saturating_mul(2);
                return Some(ButtonEvent::LongPressStart);
            }
            if s.long_press_active && held_ms >= s.next_repeat_ms {
                s.next_repeat_ms = s.next_repeat_ms.saturating_add(self.long_press_ms);
                return Some(ButtonEvent::LongPressRepeat);
            }
        }

        None
    }

    /// A wake request was just consumed with the line at `level`.
    ///
    /// A held press is the waking gesture.  A press still on the line but
    /// not yet debounced claims the mark when it is accepted, unless the
    /// line settles released first.  A line already released means the
    /// waking tap is over, so nothing is marked and the next press is a
    /// normal one.
    pub fn mark_wake(&mut self, now_ms: u32, level: bool) {
        let s = &mut self.state;
        if s.held {
            s.wake_gesture = true;
            return;
        }
        if level == RELEASED {
            s.wake_marked_ms = None;
            return;
        }
        if s.raw_level != level {
            s.raw_level = level;
            s.last_change_ms = now_ms;
        }
        s.wake_marked_ms = Some(now_ms);
    }

    fn begin_press(&mut self, now_ms: u32) -> ButtonEvent {
        let s = &mut self.state;
        s.press_start_ms = now_ms;
        s.held = true;
        s.long_press_active = false;
        s.wake_gesture = s.wake_marked_ms.take().is_some();
        ButtonEvent::PressStart
    }

    fn end_press(&mut self, now_ms: u32) -> ButtonEvent {
        let s = &mut self.state;
        let held_ms = now_ms.wrapping_sub(s.press_start_ms);
        let short = held_ms < self.long_press_ms && !s.long_press_active && !s.wake_gesture;
        s.held = false;
        s.long_press_active = false;
        s.wake_gesture = false;
        if short {
            ButtonEvent::ShortPress
        } else {
            ButtonEvent::LongPressEnd
        }
    }
}
