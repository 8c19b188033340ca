use std::time::{Duration, Instant};

/// Deadline bookkeeping for the periodic animation tick.
///
/// The host loop sleeps until [`Ticker::deadline`] and then calls
/// [`Ticker::poll`]. A loop that fell behind gets one firing, not a burst.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_armed(&self) -> bool {
        self.next.is_some()
    }

    /// Next firing time, `None` while paused.
    pub fn deadline(&self) -> Option<Instant> {
        self.next
    }

    /// Arms the ticker; the first firing is one interval from `now`.
    /// Starting an armed ticker keeps its current deadline.
    pub fn start(&mut self, now: Instant) {
        if self.next.is_none() {
            self.next = Some(now + self.interval);
        }
    }

    pub fn pause(&mut self) {
        self.next = None;
    }

    /// Changes the interval. A running ticker is re-armed from `now`.
    pub fn set_interval(&mut self, interval: Duration, now: Instant) {
        if interval == self.interval {
            return;
        }
        self.interval = interval;
        if self.next.is_some() {
            self.next = Some(now + interval);
        }
    }

    /// Returns `true` when the deadline has passed and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.next else {
            return false;
        };
        if now < deadline {
            return false;
        }
        let next = deadline + self.interval;
        // coalesce missed firings
        self.next = Some(if next <= now { now + self.interval } else { next });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn paused_ticker_never_fires() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(15 * MS);
        assert!(!ticker.poll(t0 + 100 * MS));
        assert_eq!(ticker.deadline(), None);
    }

    #[test]
    fn fires_once_per_interval() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(15 * MS);
        ticker.start(t0);
        assert!(!ticker.poll(t0 + 14 * MS));
        assert!(ticker.poll(t0 + 15 * MS));
        assert!(!ticker.poll(t0 + 16 * MS));
        assert!(ticker.poll(t0 + 30 * MS));
        assert_eq!(ticker.deadline(), Some(t0 + 45 * MS));
    }

    #[test]
    fn late_poll_coalesces_missed_firings() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(5 * MS);
        ticker.start(t0);
        assert!(ticker.poll(t0 + 50 * MS));
        assert!(!ticker.poll(t0 + 51 * MS));
        assert_eq!(ticker.deadline(), Some(t0 + 55 * MS));
    }

    #[test]
    fn pause_and_resume() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(15 * MS);
        ticker.start(t0);
        ticker.pause();
        assert!(!ticker.is_armed());
        assert!(!ticker.poll(t0 + 40 * MS));
        ticker.start(t0 + 40 * MS);
        assert!(ticker.poll(t0 + 55 * MS));
    }

    #[test]
    fn restart_keeps_deadline() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(15 * MS);
        ticker.start(t0);
        ticker.start(t0 + 10 * MS);
        assert_eq!(ticker.deadline(), Some(t0 + 15 * MS));
    }

    #[test]
    fn interval_change_rearms_running_ticker() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new(15 * MS);
        ticker.start(t0);
        ticker.set_interval(45 * MS, t0 + 10 * MS);
        assert_eq!(ticker.deadline(), Some(t0 + 55 * MS));

        ticker.pause();
        ticker.set_interval(5 * MS, t0 + 60 * MS);
        assert_eq!(ticker.deadline(), None);
        assert_eq!(ticker.interval(), 5 * MS);
    }
}
