//! Transient "copied" acknowledgment state.

use std::time::{Duration, Instant};

/// Default time the copied indicator stays visible.
pub const DEFAULT_COPIED_TTL: Duration = Duration::from_secs(2);

/// Deadline-based copied indicator.
///
/// Each copy arms a single deadline, replacing any pending one, so
/// acknowledgments never stack. The host polls with its own clock; no
/// timers are scheduled.
#[derive(Debug, Clone)]
pub struct CopiedIndicator {
    ttl: Duration,
    deadline: Option<Instant>,
}

impl CopiedIndicator {
    /// Creates an indicator with a custom time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            deadline: None,
        }
    }

    /// Records a copy at `now`, replacing any pending deadline.
    pub fn mark_copied(&mut self, now: Instant) {
        self.deadline = Some(now + self.ttl);
    }

    /// Returns whether the indicator is visible at `now`.
    pub fn is_visible(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now < deadline)
    }
}

impl Default for CopiedIndicator {
    fn default() -> Self {
        Self::new(DEFAULT_COPIED_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_until_copied() {
        let indicator = CopiedIndicator::default();
        assert!(!indicator.is_visible(Instant::now()));
    }

    #[test]
    fn test_visible_within_ttl() {
        let mut indicator = CopiedIndicator::default();
        let now = Instant::now();

        indicator.mark_copied(now);
        assert!(indicator.is_visible(now));
        assert!(indicator.is_visible(now + Duration::from_millis(1999)));
        assert!(!indicator.is_visible(now + Duration::from_millis(2001)));
    }

    #[test]
    fn test_new_copy_replaces_deadline() {
        let mut indicator = CopiedIndicator::default();
        let now = Instant::now();

        indicator.mark_copied(now);
        let later = now + Duration::from_millis(1500);
        indicator.mark_copied(later);

        // The replaced deadline extends past the original expiry.
        assert!(indicator.is_visible(now + Duration::from_millis(2500)));
        assert!(!indicator.is_visible(later + Duration::from_millis(2001)));
    }
}
