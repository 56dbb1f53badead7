//! Iterated Prisoner's Dilemma game engine.
//!
//! Pure simulation logic: strategies decide actions, the round engine
//! resolves action pairs against a payoff matrix, and state accumulators
//! track per-run and cross-run statistics.
//!
//! ## Core Types
//!
//! - [`Strategy`]: per-player decision rule, including history-dependent rules
//! - [`PayoffMatrix`]: the four scalar payoffs defining game payouts
//! - [`RoundResult`]: resolved actions, payoffs, and outcome code for one round
//! - [`RunState`]: cumulative statistics for a single run
//! - [`AggregateState`]: statistics combined across completed runs
//! - [`SimulationConfig`]: validated configuration for a full simulation
mod action;
mod config;
mod error;
mod outcome;
mod payoff;
mod round;
mod state;
mod strategy;

pub use action::*;
pub use config::*;
pub use error::*;
pub use outcome::*;
pub use payoff::*;
pub use round::*;
pub use state::*;
pub use strategy::*;
