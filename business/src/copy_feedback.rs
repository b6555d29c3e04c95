use std::any::Any;

use chrono::{DateTime, TimeDelta, Utc};
use source_states::{State, state_assign_impl};

/// Acknowledgment shown on the copy button after the link was copied.
///
/// Reverts on its own: it is only active while `now` is within `duration` of the copy.
#[derive(Debug, Clone, Default)]
pub struct CopyFeedback {
    copied_at: Option<DateTime<Utc>>,
}

impl CopyFeedback {
    pub fn mark_copied(&mut self, now: DateTime<Utc>) {
        self.copied_at = Some(now);
    }

    pub fn is_active(&self, now: DateTime<Utc>, duration: TimeDelta) -> bool {
        self.remaining(now, duration).is_some()
    }

    /// Time left before the acknowledgment reverts.
    pub fn remaining(&self, now: DateTime<Utc>, duration: TimeDelta) -> Option<TimeDelta> {
        let copied_at = self.copied_at?;
        let elapsed = now.signed_duration_since(copied_at);
        // clock went backwards: keep showing it for the full duration
        if elapsed < TimeDelta::zero() {
            return Some(duration);
        }
        let left = duration - elapsed;
        (left > TimeDelta::zero()).then_some(left)
    }
}

impl State for CopyFeedback {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}
