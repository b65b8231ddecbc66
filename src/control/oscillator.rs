//! Triangular-wave oscillator for the relay toggle period.
//!
//! Each long-press tick steps the period by one second in the current
//! direction.  Reaching the upper bound turns the direction down, reaching
//! the lower bound turns it up:
//!
//! ```text
//!  3 → 4 → … → 10 → 9 → … → 1 → 2 → …
//! ```

/// Current period plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyOscillator {
    seconds: u8,
    increasing: bool,
    min: u8,
    max: u8,
}

impl FrequencyOscillator {
    /// `initial` is clamped into `[min, max]`; the direction starts upward.
    pub fn new(initial: u8, min: u8, max: u8) -> Self {
        Self {
            seconds: initial.clamp(min, max),
            increasing: true,
            min,
            max,
        }
    }

    /// Advance one step and return the new period in seconds.
    pub fn step(&mut self) -> u8 {
        if self.increasing {
            self.seconds = (self.seconds + 1).min(self.max);
            if self.seconds >= self.max {
                self.increasing = false;
            }
        } else {
            self.seconds = self.seconds.saturating_sub(1).max(self.min);
            if self.seconds <= self.min {
                self.increasing = true;
            }
        }
        self.seconds
    }

    pub fn seconds(&self) -> u8 {
        self.seconds
    }

    pub fn period_ms(&self) -> u32 {
        u32::from(self.seconds) * 1000
    }

    pub fn is_increasing(&self) -> bool {
        self.increasing
    }
}
