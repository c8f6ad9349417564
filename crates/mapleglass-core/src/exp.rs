//! Experience tracking session: a start reading, the latest reading, and
//! rate statistics derived on demand.

use std::time::{Duration, Instant};

use mapleglass_types::ExpSample;

#[derive(Debug, Clone)]
pub struct ExpSession {
    start: ExpSample,
    start_at: Instant,
    current: ExpSample,
    updated_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpStats {
    pub elapsed: Duration,
    pub gained_value: u64,
    pub gained_percent: f64,
    pub value_per_hour: u64,
}

impl ExpSession {
    pub fn start(sample: ExpSample) -> Self {
        let now = Instant::now();
        Self {
            start: sample,
            start_at: now,
            current: sample,
            updated_at: now,
        }
    }

    pub fn update(&mut self, sample: ExpSample) {
        self.update_at(sample, Instant::now());
    }

    fn update_at(&mut self, sample: ExpSample, at: Instant) {
        self.current = sample;
        self.updated_at = at;
    }

    pub fn start_sample(&self) -> ExpSample {
        self.start
    }

    pub fn current_sample(&self) -> ExpSample {
        self.current
    }

    /// Derived statistics for the session so far. A reading lower than the
    /// start (level-up reset, misread) clamps the gain at zero instead of
    /// going negative.
    pub fn stats(&self) -> ExpStats {
        let elapsed = self.updated_at.duration_since(self.start_at);
        let gained_value = self.current.value.saturating_sub(self.start.value);
        let gained_percent = (self.current.percent - self.start.percent).max(0.0);

        let hours = elapsed.as_secs_f64() / 3600.0;
        let value_per_hour = if hours > 0.0 {
            (gained_value as f64 / hours) as u64
        } else {
            0
        };

        ExpStats {
            elapsed,
            gained_value,
            gained_percent,
            value_per_hour,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(value: u64, percent: f64) -> ExpSample {
        ExpSample { value, percent }
    }

    #[test]
    fn fresh_session_has_zero_stats() {
        let session = ExpSession::start(sample(1000, 5.0));
        let stats = session.stats();
        assert_eq!(stats.gained_value, 0);
        assert_eq!(stats.gained_percent, 0.0);
        assert_eq!(stats.value_per_hour, 0);
    }

    #[test]
    fn gain_and_rate_after_an_hour() {
        let mut session = ExpSession::start(sample(1000, 10.0));
        let later = session.start_at + Duration::from_secs(3600);
        session.update_at(sample(501_000, 35.5), later);

        let stats = session.stats();
        assert_eq!(stats.elapsed, Duration::from_secs(3600));
        assert_eq!(stats.gained_value, 500_000);
        assert!((stats.gained_percent - 25.5).abs() < 1e-9);
        assert_eq!(stats.value_per_hour, 500_000);
    }

    #[test]
    fn negative_gain_clamps_to_zero() {
        let mut session = ExpSession::start(sample(9000, 80.0));
        let later = session.start_at + Duration::from_secs(60);
        session.update_at(sample(100, 0.5), later);

        let stats = session.stats();
        assert_eq!(stats.gained_value, 0);
        assert_eq!(stats.gained_percent, 0.0);
        assert_eq!(stats.value_per_hour, 0);
    }

    #[test]
    fn rate_scales_with_elapsed_time() {
        let mut session = ExpSession::start(sample(0, 0.0));
        let later = session.start_at + Duration::from_secs(1800);
        session.update_at(sample(250_000, 12.0), later);

        assert_eq!(session.stats().value_per_hour, 500_000);
    }
}
