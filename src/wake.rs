//! Interrupt-safe wake signal.
//!
//! The only state shared between the button GPIO interrupt and the main
//! loop.  The ISR is the single writer of both flags; the main loop is
//! the single reader and clearer.
//!
//! ```text
//! ┌─────────────┐   set    ┌─────────────────────────┐  swap(false)  ┌───────────┐
//! │ Button ISR  │────────▶│ interrupt_pending        │──────────────▶│ Main loop │
//! │ (falling    │────────▶│ wake_requested (if off)  │──────────────▶│           │
//! │  edge)      │◀─ read ──│ device_on (loop mirror)  │◀──── store ───│           │
//! └─────────────┘          └─────────────────────────┘               └───────────┘
//! ```
//!
//! Reads-and-clears use `AtomicBool::swap`, so an edge that lands between
//! the read and the clear is never lost.  The handler does no debounce, no
//! logging, and never blocks.

use core::sync::atomic::{AtomicBool, Ordering};

/// Flag pair set by the button interrupt, plus a mirror of the device
/// on/off flag so the ISR can tell a wake edge from a normal press.
pub struct WakeSignal {
    interrupt_pending: AtomicBool,
    wake_requested: AtomicBool,
    /// Written by the main loop on every device transition, read by the ISR.
    device_on: AtomicBool,
}

impl WakeSignal {
    pub const fn new() -> Self {
        Self {
            interrupt_pending: AtomicBool::new(false),
            wake_requested: AtomicBool::new(false),
            device_on: AtomicBool::new(false),
        }
    }

    /// ISR body.  Returns `true` when this edge is a wake request, i.e.
    /// the caller must end any in-progress low-power suspension.
    pub fn on_button_edge(&self) -> bool {
        self.interrupt_pending.store(true, Ordering::Release);
        if self.device_on.load(Ordering::Acquire) {
            return false;
        }
        self.wake_requested.store(true, Ordering::Release);
        true
    }

    /// Atomically read and clear the pending-interrupt flag.
    pub fn take_interrupt(&self) -> bool {
        self.interrupt_pending.swap(false, Ordering::AcqRel)
    }

    /// Atomically read and clear the wake request.  Idempotent.
    pub fn take_wake_request(&self) -> bool {
        self.wake_requested.swap(false, Ordering::AcqRel)
    }

    /// Non-consuming check used right before suspending.
    pub fn interrupt_pending(&self) -> bool {
        self.interrupt_pending.load(Ordering::Acquire)
    }

    /// Publish the device on/off flag for the ISR.
    pub fn set_device_on(&self, on: bool) {
        self.device_on.store(on, Ordering::Release);
    }
}

impl Default for WakeSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// The board-wide instance the GPIO interrupt writes to.
pub static WAKE: WakeSignal = WakeSignal::new();

/// ISR handler. Register this on the button GPIO falling edge.
/// Safe to call from interrupt context (lock-free atomic stores).
pub fn button_isr_handler() -> bool {
    WAKE.on_button_edge()
}
