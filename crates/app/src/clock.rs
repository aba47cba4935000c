//! Clock

use std::fmt::Debug;

use jiff::Timestamp;

/// Source of the current instant.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
