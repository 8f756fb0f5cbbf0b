use std::fmt::Debug;

use crate::time::{now, Timestamp};

/// Clock provides the current wall-clock time during signing and verification.
///
/// The clock is the only environmental dependency of the signing path, so
/// swapping it out makes every signature and replay-window check
/// deterministic under test.
pub trait Clock: Debug + Send + Sync + 'static {
    /// Current time as milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// SystemClock reads the OS wall clock.
#[derive(Debug, Copy, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        now().timestamp_millis()
    }
}

/// FixedClock always reports the same instant.
///
/// This is useful for testing or for replaying a recorded exchange.
#[derive(Debug, Copy, Clone, Default)]
pub struct FixedClock {
    /// The instant to report, as milliseconds since the Unix epoch.
    pub millis: i64,
}

impl FixedClock {
    /// Create a clock pinned to the given millisecond instant.
    pub fn at_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// Create a clock pinned to the given second instant.
    pub fn at_secs(secs: Timestamp) -> Self {
        Self {
            millis: secs * 1000,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis
    }
}
