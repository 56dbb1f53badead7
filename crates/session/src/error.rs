/// Errors surfaced synchronously by the session manager.
#[derive(Debug, Clone)]
pub enum SessionError {
    /// Configuration rejected at creation; no worker was started.
    InvalidConfig(String),
    /// Session id unknown to lookup, cancel, or subscribe.
    NotFound,
    /// The single-consumer stream was already claimed.
    StreamTaken,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(s) => write!(f, "{}", s),
            Self::NotFound => write!(f, "unknown simulation id"),
            Self::StreamTaken => write!(f, "stream already has a consumer"),
        }
    }
}

impl std::error::Error for SessionError {}
