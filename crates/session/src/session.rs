use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering;

/// Marker type for session identifiers.
pub struct Session;

/// Externally observable session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Created,
    Running,
    Completed,
    Stopped,
    Failed,
}

impl Status {
    /// Terminal states never transition again.
    pub fn terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Stopped | Self::Failed)
    }
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Created,
            1 => Self::Running,
            2 => Self::Completed,
            3 => Self::Stopped,
            _ => Self::Failed,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Stopped => write!(f, "stopped"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Lock-free lifecycle shared between the lobby and one worker.
///
/// The stop flag is cooperative; the worker observes it at round
/// boundaries and exits without emitting further events.
#[derive(Debug, Default)]
pub struct Lifecycle {
    status: AtomicU8,
    stop: AtomicBool,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn status(&self) -> Status {
        Status::from_u8(self.status.load(Ordering::Acquire))
    }
    /// Advance the state machine. Terminal states are sticky.
    pub fn advance(&self, next: Status) {
        if !self.status().terminal() {
            self.status.store(next as u8, Ordering::Release);
        }
    }
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }
    pub fn stopped(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_created_and_unstopped() {
        let lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.status(), Status::Created);
        assert!(!lifecycle.stopped());
    }
    #[test]
    fn terminal_states_are_sticky() {
        let lifecycle = Lifecycle::new();
        lifecycle.advance(Status::Running);
        lifecycle.advance(Status::Stopped);
        lifecycle.advance(Status::Completed);
        assert_eq!(lifecycle.status(), Status::Stopped);
    }
    #[test]
    fn stop_flag_is_independent_of_status() {
        let lifecycle = Lifecycle::new();
        lifecycle.stop();
        assert!(lifecycle.stopped());
        assert_eq!(lifecycle.status(), Status::Created);
    }
}
