/// Supplies the display timestamp appended to every log entry.
pub trait Clock {
    fn timestamp(&self) -> String;
}

/// Local wall-clock time in the `ctime` layout, e.g. `Mon Oct 19 03:51:07 2026`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        chrono::Local::now()
            .format("%a %b %e %H:%M:%S %Y")
            .to_string()
    }
}

/// Always returns the same timestamp. Used to make log text deterministic.
#[derive(Debug, Clone)]
pub struct FixedClock(String);

impl FixedClock {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self(timestamp.into())
    }
}

impl Clock for FixedClock {
    fn timestamp(&self) -> String {
        self.0.clone()
    }
}
