use std::{cell::Cell, rc::Rc};

pub const SCROLL_THROTTLE_MS: f64 = 16.0;
pub const INPUT_DEBOUNCE_MS: u32 = 300;
pub const RESIZE_DEBOUNCE_MS: u32 = 250;

#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Leading-edge throttle: the first call in a window runs, the rest are
/// dropped until `interval_ms` has elapsed.
#[derive(Clone, Copy, Debug)]
pub struct ThrottleGate {
    interval_ms: f64,
    last_run_ms: Option<f64>,
}

impl ThrottleGate {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_run_ms: None,
        }
    }

    pub fn allow(&mut self, now_ms: f64) -> bool {
        match self.last_run_ms {
            Some(last) if now_ms - last < self.interval_ms => false,
            _ => {
                self.last_run_ms = Some(now_ms);
                true
            }
        }
    }
}

/// Trailing-edge debounce. Every trigger restarts the wait and invalidates
/// the tickets handed out before it.
#[derive(Clone, Copy, Debug)]
pub struct Debounce {
    delay_ms: u32,
    generation: u64,
    due_at_ms: Option<f64>,
}

impl Debounce {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            generation: 0,
            due_at_ms: None,
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn due_at_ms(&self) -> Option<f64> {
        self.due_at_ms
    }

    pub fn trigger(&mut self, now_ms: f64) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.due_at_ms = Some(now_ms + f64::from(self.delay_ms));
        self.generation
    }

    pub fn fire(&mut self, ticket: u64) -> bool {
        if self.due_at_ms.is_none() || ticket != self.generation {
            return false;
        }
        self.due_at_ms = None;
        true
    }

    pub fn cancel(&mut self) {
        self.due_at_ms = None;
    }
}
