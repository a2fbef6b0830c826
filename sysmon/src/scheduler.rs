#[cfg(test)]
use std::{cell::Cell, rc::Rc};
use std::time::{Duration, Instant};

/// Monotonic time since some fixed origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Decides when the next tick runs. Polled from the UI loop, so ticks never
/// overlap; a slow tick pushes the next one back instead of queueing more.
pub struct Scheduler<C: Clock> {
    clock: C,
    interval: Duration,
    next_due: Option<Duration>,
    stopped: bool,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(clock: C, interval: Duration) -> Self {
        Self {
            clock,
            interval,
            next_due: None,
            stopped: false,
        }
    }

    /// True when a tick should run now. The first poll always fires.
    pub fn poll(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        let now = self.clock.now();
        match self.next_due {
            Some(due) if now < due => false,
            _ => {
                self.next_due = Some(now + self.interval);
                true
            }
        }
    }

    /// Called after a tick completes. A tick that overran its slot moves the
    /// next one to a full interval after it finished.
    pub fn finished(&mut self) {
        let now = self.clock.now();
        if self.next_due.map_or(true, |due| now >= due) {
            self.next_due = Some(now + self.interval);
        }
    }

    pub fn time_until_due(&self) -> Duration {
        match self.next_due {
            Some(due) => due.saturating_sub(self.clock.now()),
            None => Duration::ZERO,
        }
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    #[cfg(test)]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn fires_immediately_then_every_interval() {
        let clock = ManualClock::default();
        let mut scheduler = Scheduler::new(clock.clone(), SECOND);

        assert!(scheduler.poll());
        assert!(!scheduler.poll());

        clock.advance(Duration::from_millis(999));
        assert!(!scheduler.poll());
        clock.advance(Duration::from_millis(1));
        assert!(scheduler.poll());
    }

    #[test]
    fn late_poll_fires_once_without_catching_up() {
        let clock = ManualClock::default();
        let mut scheduler = Scheduler::new(clock.clone(), SECOND);
        assert!(scheduler.poll());

        clock.advance(Duration::from_secs(5));
        assert!(scheduler.poll());
        assert!(!scheduler.poll());
        assert_eq!(scheduler.time_until_due(), SECOND);
    }

    #[test]
    fn slow_tick_delays_the_next_one() {
        let clock = ManualClock::default();
        let mut scheduler = Scheduler::new(clock.clone(), SECOND);
        assert!(scheduler.poll());

        // the tick itself took 1.5s
        clock.advance(Duration::from_millis(1500));
        scheduler.finished();
        assert!(!scheduler.poll());

        clock.advance(Duration::from_millis(999));
        assert!(!scheduler.poll());
        clock.advance(Duration::from_millis(1));
        assert!(scheduler.poll());
    }

    #[test]
    fn quick_tick_keeps_the_schedule() {
        let clock = ManualClock::default();
        let mut scheduler = Scheduler::new(clock.clone(), SECOND);
        assert!(scheduler.poll());

        clock.advance(Duration::from_millis(200));
        scheduler.finished();
        assert_eq!(scheduler.time_until_due(), Duration::from_millis(800));
    }

    #[test]
    fn stopped_scheduler_never_fires() {
        let clock = ManualClock::default();
        let mut scheduler = Scheduler::new(clock.clone(), SECOND);
        scheduler.stop();
        clock.advance(Duration::from_secs(10));
        assert!(!scheduler.poll());
        assert!(scheduler.is_stopped());
    }
}
