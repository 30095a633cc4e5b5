use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::watch;

/// Where the submission workflow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    AcquiringLocation,
    Submitting,
    /// Terminal for the attempt until the page reloads or history is refreshed.
    Success,
    Failed,
}

impl SubmissionState {
    /// `Idle` and `Failed` are the only states a new attempt may start from.
    pub fn accepts_submission(&self) -> bool {
        matches!(self, SubmissionState::Idle | SubmissionState::Failed)
    }
}

impl Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SubmissionState::Idle => "idle",
            SubmissionState::AcquiringLocation => "acquiring_location",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Success => "success",
            SubmissionState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Shared holder of the one current [`SubmissionState`].
///
/// Cloning shares the same state. Observers get every change through [`subscribe`].
///
/// [`subscribe`]: SubmissionTracker::subscribe
#[derive(Debug, Clone)]
pub struct SubmissionTracker {
    state: Arc<watch::Sender<SubmissionState>>,
}

impl Default for SubmissionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionTracker {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self {
            state: Arc::new(state),
        }
    }

    pub fn get(&self) -> SubmissionState {
        *self.state.borrow()
    }

    pub fn set(&self, next: SubmissionState) {
        self.state.send_replace(next);
    }

    /// Moves to `AcquiringLocation` if a new attempt may start. On refusal returns the
    /// state that blocked it and changes nothing.
    pub fn try_begin(&self) -> Result<(), SubmissionState> {
        let mut blocked = None;
        self.state.send_if_modified(|current| {
            if current.accepts_submission() {
                *current = SubmissionState::AcquiringLocation;
                true
            } else {
                blocked = Some(*current);
                false
            }
        });
        match blocked {
            Some(state) => Err(state),
            None => Ok(()),
        }
    }

    pub fn reset(&self) {
        self.set(SubmissionState::Idle);
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_only_from_idle_or_failed() {
        let tracker = SubmissionTracker::new();
        assert_eq!(tracker.try_begin(), Ok(()));
        assert_eq!(tracker.get(), SubmissionState::AcquiringLocation);
        assert_eq!(
            tracker.try_begin(),
            Err(SubmissionState::AcquiringLocation)
        );

        tracker.set(SubmissionState::Success);
        assert_eq!(tracker.try_begin(), Err(SubmissionState::Success));
        assert_eq!(tracker.get(), SubmissionState::Success);

        tracker.set(SubmissionState::Failed);
        assert_eq!(tracker.try_begin(), Ok(()));
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let tracker = SubmissionTracker::new();
        let mut rx = tracker.subscribe();
        tracker.set(SubmissionState::Submitting);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), SubmissionState::Submitting);
    }
}
