use std::time::{Duration, Instant};

/// Minimum gap between two progress callbacks during a pass.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(30);

/// Counts processed records and forwards the count to a callback at most
/// once per `interval`, plus one unconditional call from [`finish`].
///
/// [`finish`]: ProgressThrottle::finish
#[derive(Debug, Clone)]
pub struct ProgressThrottle {
    interval: Duration,
    last_emit: Instant,
    count: usize,
}

impl ProgressThrottle {
    pub fn new(interval: Duration) -> Self {
        ProgressThrottle::starting_at(interval, Instant::now())
    }

    pub(crate) fn starting_at(interval: Duration, start: Instant) -> Self {
        ProgressThrottle { interval, last_emit: start, count: 0 }
    }

    /// Records processed so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Advances the counter by one record.
    pub fn tick<F: FnMut(usize)>(&mut self, callback: &mut F) {
        self.tick_at(Instant::now(), callback);
    }

    pub(crate) fn tick_at<F: FnMut(usize)>(&mut self, now: Instant, callback: &mut F) {
        self.count += 1;
        if now.saturating_duration_since(self.last_emit) >= self.interval {
            callback(self.count);
            self.last_emit = now;
        }
    }

    /// Emits the final count regardless of timing and returns it.
    pub fn finish<F: FnMut(usize)>(self, callback: &mut F) -> usize {
        callback(self.count);
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_only_after_interval_elapses() {
        let t0 = Instant::now();
        let mut throttle = ProgressThrottle::starting_at(Duration::from_millis(30), t0);
        let mut seen = Vec::new();
        let mut cb = |n| seen.push(n);

        throttle.tick_at(t0 + Duration::from_millis(10), &mut cb);
        throttle.tick_at(t0 + Duration::from_millis(29), &mut cb);
        throttle.tick_at(t0 + Duration::from_millis(31), &mut cb);
        throttle.tick_at(t0 + Duration::from_millis(40), &mut cb);
        throttle.tick_at(t0 + Duration::from_millis(61), &mut cb);
        let total = throttle.finish(&mut cb);

        assert_eq!(total, 5);
        assert_eq!(seen, vec![3, 5, 5]);
    }

    #[test]
    fn zero_interval_emits_every_record() {
        let mut throttle = ProgressThrottle::new(Duration::ZERO);
        let mut seen = Vec::new();
        let mut cb = |n| seen.push(n);
        for _ in 0..4 {
            throttle.tick(&mut cb);
        }
        throttle.finish(&mut cb);
        assert_eq!(seen, vec![1, 2, 3, 4, 4]);
    }

    #[test]
    fn empty_pass_still_reports_completion() {
        let throttle = ProgressThrottle::new(DEFAULT_PROGRESS_INTERVAL);
        let mut seen = Vec::new();
        assert_eq!(throttle.finish(&mut |n| seen.push(n)), 0);
        assert_eq!(seen, vec![0]);
    }
}
