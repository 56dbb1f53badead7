/// Errors raised by simulation configuration and round accounting.
#[derive(Debug, Clone)]
pub enum EngineError {
    /// Malformed strategy, probability, bounds, or payoff values.
    /// Surfaced synchronously at session creation.
    InvalidConfig(String),
    /// Unexpected numeric fault during accumulation. Terminal for a session.
    Numeric(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(s) => write!(f, "invalid configuration: {}", s),
            Self::Numeric(s) => write!(f, "numeric failure: {}", s),
        }
    }
}

impl std::error::Error for EngineError {}
