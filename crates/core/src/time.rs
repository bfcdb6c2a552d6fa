use chrono::{DateTime, Utc};

/// Where a quiz session reads its timestamps from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    /// Reports the same instant on every call.
    Frozen(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match *self {
            Clock::System => Utc::now(),
            Clock::Frozen(at) => at,
        }
    }
}

/// Deterministic clocks for tests, here and in downstream crates through the
/// `test-util` feature.
#[cfg(any(test, feature = "test-util"))]
pub mod test_util {
    use chrono::{DateTime, Utc};

    use super::Clock;

    /// 2023-11-14T22:13:20Z.
    pub const FROZEN_TIMESTAMP: i64 = 1_700_000_000;

    #[must_use]
    pub fn frozen_now() -> DateTime<Utc> {
        DateTime::from_timestamp(FROZEN_TIMESTAMP, 0).unwrap_or_default()
    }

    #[must_use]
    pub fn frozen_clock() -> Clock {
        Clock::Frozen(frozen_now())
    }
}

#[cfg(test)]
mod tests {
    use super::test_util::{FROZEN_TIMESTAMP, frozen_clock};
    use super::*;

    #[test]
    fn frozen_clock_never_moves() {
        let clock = frozen_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().timestamp(), FROZEN_TIMESTAMP);
    }

    #[test]
    fn system_is_the_default() {
        assert_eq!(Clock::default(), Clock::System);
    }
}
