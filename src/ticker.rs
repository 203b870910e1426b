use std::time::{Duration, Instant};

/// A cancellable periodic deadline.
///
/// Changing the period with [`Ticker::reschedule()`] throws away whatever part
/// of the current period has already elapsed; the next tick is a full new
/// period away.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Ticker {
    period: Duration,
    deadline: Option<Instant>,
}

impl Ticker {
    /// Create a stopped ticker
    pub(crate) fn new(period: Duration) -> Ticker {
        Ticker {
            period,
            deadline: None,
        }
    }

    pub(crate) fn period(&self) -> Duration {
        self.period
    }

    #[cfg(test)]
    pub(crate) fn is_active(&self) -> bool {
        self.deadline.is_some()
    }

    /// Schedule the first tick one period after `now`
    pub(crate) fn start(&mut self, now: Instant) {
        self.deadline = Some(now + self.period);
    }

    pub(crate) fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Cancel the pending tick and start over with a new period
    pub(crate) fn reschedule(&mut self, period: Duration, now: Instant) {
        self.cancel();
        self.period = period;
        self.start(now);
    }

    /// How long until the next tick is due, or `None` if the ticker is
    /// stopped
    pub(crate) fn time_until(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|when| when.saturating_duration_since(now))
    }

    /// If a tick is due at `now`, schedule the following one and return
    /// `true`
    pub(crate) fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(when) if when <= now => {
                self.deadline = Some(now + self.period);
                true
            }
            _ => false,
        }
    }
}
