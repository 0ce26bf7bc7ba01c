use std::time::{Duration, Instant};

/// Decides when the game should tick.
///
/// Instead of a timer that fires on its own, the driver is polled from the
/// main loop, which may wake up early to handle input.  Elapsed time is
/// accumulated between polls, and a tick is due once a full tick interval has
/// built up.  The interval is passed in on every poll, so a speed change
/// takes effect at the next poll without any rescheduling.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TickDriver {
    /// Time of the most recent poll; `None` while stopped
    last: Option<Instant>,
    /// Time accumulated towards the next tick
    backlog: Duration,
}

impl TickDriver {
    pub(crate) fn new() -> TickDriver {
        TickDriver::default()
    }

    /// Start counting time from `now`.  Does nothing if already running.
    pub(crate) fn start(&mut self, now: Instant) {
        if self.last.is_none() {
            self.last = Some(now);
            self.backlog = Duration::ZERO;
        }
    }

    /// Stop the driver and throw away any accumulated time.  No tick will be
    /// due until the driver is started again.
    pub(crate) fn stop(&mut self) {
        self.last = None;
        self.backlog = Duration::ZERO;
    }

    pub(crate) fn is_running(&self) -> bool {
        self.last.is_some()
    }

    /// Account for the time elapsed up to `now` and return whether a tick is
    /// due.  At most one tick is reported per call, and the backlog is
    /// capped so that a long stall never owes more than one further tick.
    pub(crate) fn poll(&mut self, now: Instant, period: Duration) -> bool {
        let Some(last) = self.last else {
            return false;
        };
        self.backlog = self
            .backlog
            .saturating_add(now.saturating_duration_since(last));
        self.last = Some(now);
        if self.backlog >= period {
            self.backlog = self.backlog.saturating_sub(period).min(period);
            true
        } else {
            false
        }
    }

    /// How long from `now` until the next tick is due, or `None` if stopped
    pub(crate) fn time_until_tick(&self, now: Instant, period: Duration) -> Option<Duration> {
        let last = self.last?;
        let accrued = self
            .backlog
            .saturating_add(now.saturating_duration_since(last));
        Some(period.saturating_sub(accrued))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(200);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn stopped_driver_never_ticks() {
        let t0 = Instant::now();
        let mut driver = TickDriver::new();
        assert!(!driver.is_running());
        assert!(!driver.poll(t0 + ms(1000), PERIOD));
        assert_eq!(driver.time_until_tick(t0, PERIOD), None);
    }

    #[test]
    fn ticks_once_per_period() {
        let t0 = Instant::now();
        let mut driver = TickDriver::new();
        driver.start(t0);
        assert!(!driver.poll(t0 + ms(50), PERIOD));
        assert_eq!(driver.time_until_tick(t0 + ms(50), PERIOD), Some(ms(150)));
        assert!(!driver.poll(t0 + ms(199), PERIOD));
        assert!(driver.poll(t0 + ms(200), PERIOD));
        assert!(!driver.poll(t0 + ms(210), PERIOD));
        assert!(driver.poll(t0 + ms(400), PERIOD));
    }

    #[test]
    fn leftover_time_carries_over() {
        let t0 = Instant::now();
        let mut driver = TickDriver::new();
        driver.start(t0);
        assert!(driver.poll(t0 + ms(250), PERIOD));
        assert_eq!(driver.time_until_tick(t0 + ms(250), PERIOD), Some(ms(150)));
        assert!(driver.poll(t0 + ms(400), PERIOD));
    }

    #[test]
    fn stall_owes_at_most_one_tick() {
        let t0 = Instant::now();
        let mut driver = TickDriver::new();
        driver.start(t0);
        assert!(driver.poll(t0 + ms(5000), PERIOD));
        assert!(driver.poll(t0 + ms(5000), PERIOD));
        assert!(!driver.poll(t0 + ms(5000), PERIOD));
    }

    #[test]
    fn faster_period_applies_immediately() {
        let t0 = Instant::now();
        let mut driver = TickDriver::new();
        driver.start(t0);
        assert!(!driver.poll(t0 + ms(100), PERIOD));
        assert!(driver.poll(t0 + ms(120), ms(120)));
    }

    #[test]
    fn stop_discards_backlog() {
        let t0 = Instant::now();
        let mut driver = TickDriver::new();
        driver.start(t0);
        assert!(!driver.poll(t0 + ms(150), PERIOD));
        driver.stop();
        assert!(!driver.poll(t0 + ms(300), PERIOD));
        driver.start(t0 + ms(1000));
        assert!(!driver.poll(t0 + ms(1150), PERIOD));
        assert!(driver.poll(t0 + ms(1200), PERIOD));
    }

    #[test]
    fn start_is_idempotent() {
        let t0 = Instant::now();
        let mut driver = TickDriver::new();
        driver.start(t0);
        driver.start(t0 + ms(150));
        assert!(driver.poll(t0 + ms(200), PERIOD));
    }
}
