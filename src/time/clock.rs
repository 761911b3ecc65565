use chrono::{DateTime, FixedOffset, Local};

/// Wall-clock seam. Production code uses [`SystemClock`]; tests pass
/// explicit timestamps or a fixed implementation.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Clock pinned to one instant, for host wiring tests.
#[cfg(test)]
pub struct FixedClock {
    instant: DateTime<FixedOffset>
}

#[cfg(test)]
impl FixedClock {
    pub fn new(instant: DateTime<FixedOffset>) -> FixedClock {
        FixedClock { instant }
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.instant
    }
}
