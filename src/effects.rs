//! Nondeterministic inputs to the interpreter. The browser versions call into
//! JS; the fixed versions keep command output reproducible off the web.

pub trait ChoiceSource {
    /// An index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

pub trait Clock {
    /// Milliseconds since the page started.
    fn uptime_ms(&self) -> f64;
}

/// `Math.random()` scaled to the range.
pub struct JsRandom;

impl ChoiceSource for JsRandom {
    fn pick(&mut self, len: usize) -> usize {
        let i = (js_sys::Math::random() * len as f64).floor() as usize;
        i.min(len - 1)
    }
}

/// `performance.now()`, or wall-clock time since construction when the
/// Performance API is missing.
pub struct JsClock {
    started: f64,
}

impl Default for JsClock {
    fn default() -> Self {
        Self::new()
    }
}

impl JsClock {
    pub fn new() -> Self {
        JsClock {
            started: js_sys::Date::now(),
        }
    }
}

impl Clock for JsClock {
    fn uptime_ms(&self) -> f64 {
        match web_sys::window().and_then(|w| w.performance()) {
            Some(p) => p.now(),
            None => js_sys::Date::now() - self.started,
        }
    }
}

/// Always picks the same slot (wrapped into range).
pub struct FixedChoice(pub usize);

impl ChoiceSource for FixedChoice {
    fn pick(&mut self, len: usize) -> usize {
        self.0 % len
    }
}

pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn uptime_ms(&self) -> f64 {
        self.0
    }
}
