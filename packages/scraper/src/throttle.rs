//! Randomized pause between page requests.

use std::time::Duration;

use rand::Rng as _;

/// A pause of random length in `[min, max]`, taken after every page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    min: Duration,
    max: Duration,
}

impl Throttle {
    /// Creates a throttle pausing between `min` and `max`. The bounds are
    /// swapped if given in the wrong order.
    #[must_use]
    pub const fn new(min: Duration, max: Duration) -> Self {
        if min.as_nanos() > max.as_nanos() {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// A throttle that never pauses.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Lower bound of the pause.
    #[must_use]
    pub const fn min(&self) -> Duration {
        self.min
    }

    /// Upper bound of the pause.
    #[must_use]
    pub const fn max(&self) -> Duration {
        self.max
    }

    /// Picks the next pause length.
    #[must_use]
    pub fn next_delay(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::rng().random_range(self.min..=self.max)
    }

    /// Sleeps for a random duration within the bounds.
    pub async fn pause(&self) {
        let delay = self.next_delay();
        if delay.is_zero() {
            return;
        }
        log::debug!("Sleeping {delay:?} before the next request");
        tokio::time::sleep(delay).await;
    }
}
