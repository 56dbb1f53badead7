//! Core type aliases, identity types, and constants for the dilemma workspace.
//!
//! This crate provides the foundational types and configuration parameters
//! used throughout the simulation workspace.

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Payoff amounts and payoff accumulators.
pub type Payoff = f64;
/// Cooperation probabilities and sampling distributions.
pub type Probability = f64;
/// Round indices, run indices, and cumulative counters.
pub type Count = u64;
/// Player seat index (0 = player one, 1 = player two).
pub type Position = usize;

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    /// Mint a fresh time-ordered identifier.
    pub fn new() -> Self {
        Self::default()
    }
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Number of players in a game.
pub const N: usize = 2;
/// Upper bound on rounds per run.
pub const MAX_ROUNDS: Count = 1_000_000;
/// Default payoff for mutual cooperation.
pub const DEFAULT_REWARD: Payoff = 3.0;
/// Default payoff for defecting against a cooperator.
pub const DEFAULT_TEMPTATION: Payoff = 5.0;
/// Default payoff for cooperating against a defector.
pub const DEFAULT_SUCKER: Payoff = 0.0;
/// Default payoff for mutual defection.
pub const DEFAULT_PUNISHMENT: Payoff = 1.0;

// ============================================================================
// SESSION PARAMETERS
// Bounded channel capacity paces the worker against a slow consumer.
// ============================================================================
/// Event channel capacity per session.
pub const EVENT_BUFFER: usize = 64;
/// How long a worker waits on a full channel before declaring the consumer dead.
pub const SEND_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);
/// How long an unclaimed session waits for a subscriber before expiring.
pub const SUBSCRIBE_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(300);

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
pub fn kys() {
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.expect("install signal handler");
        println!();
        log::warn!("violent interrupt received, exiting immediately");
        std::process::exit(0);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    struct Marker;
    #[test]
    fn ids_are_unique() {
        let a = ID::<Marker>::default();
        let b = ID::<Marker>::default();
        assert_ne!(a, b);
    }
    #[test]
    fn id_uuid_roundtrip() {
        let id = ID::<Marker>::default();
        let uuid: uuid::Uuid = id.into();
        assert_eq!(id, ID::<Marker>::from(uuid));
    }
}
