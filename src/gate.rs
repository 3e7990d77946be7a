// src/gate.rs
use chrono::{DateTime, Duration, Utc};

/// Rate limiter enforcing a minimum spacing between spoken announcements,
/// process-wide. Not persisted: a restart may speak immediately.
#[derive(Debug, Clone)]
pub struct SpeechGate {
    min_interval: Duration,
    last_speech_at: Option<DateTime<Utc>>,
}

impl SpeechGate {
    pub fn new(min_interval_secs: i64) -> Self {
        Self {
            min_interval: Duration::seconds(min_interval_secs),
            last_speech_at: None,
        }
    }

    /// Returns true when an announcement may start at `now`. A granted
    /// attempt consumes the window immediately, before the speak outcome is
    /// known, so a failing notifier cannot be hammered in a tight loop.
    /// Denied attempts are dropped by the caller, not queued.
    pub fn attempt(&mut self, now: DateTime<Utc>) -> bool {
        if let Some(last) = self.last_speech_at {
            if now - last < self.min_interval {
                return false;
            }
        }
        self.last_speech_at = Some(now);
        true
    }

    pub fn last_speech_at(&self) -> Option<DateTime<Utc>> {
        self.last_speech_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_attempt_always_passes() {
        let mut gate = SpeechGate::new(300);
        assert!(gate.attempt(Utc::now()));
    }

    #[test]
    fn attempts_inside_window_are_denied() {
        let mut gate = SpeechGate::new(10);
        let t0 = Utc::now();
        assert!(gate.attempt(t0));
        assert!(!gate.attempt(t0 + Duration::seconds(3)));
        assert!(!gate.attempt(t0 + Duration::seconds(9)));
        assert!(gate.attempt(t0 + Duration::seconds(10)));
    }

    #[test]
    fn denied_attempt_does_not_move_the_clock() {
        let mut gate = SpeechGate::new(10);
        let t0 = Utc::now();
        assert!(gate.attempt(t0));
        assert!(!gate.attempt(t0 + Duration::seconds(9)));
        // Window still measured from t0, not from the denied attempt.
        assert!(gate.attempt(t0 + Duration::seconds(10)));
    }
}
