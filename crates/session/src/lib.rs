//! Async runtime for streaming simulation sessions.
//!
//! This crate orchestrates long-running simulations, relaying ordered
//! progress events from a background worker to a single consumer through
//! a bounded channel.
//!
//! ## Architecture
//!
//! - [`Lobby`]: concurrent session table, the only state shared across callers
//! - [`Orchestrator`]: background worker driving one session's rounds and runs
//! - [`SessionHandle`]: channel endpoints and lifecycle for one session
//! - [`Lifecycle`]: session state machine and cooperative stop flag
//!
//! ## Events
//!
//! - [`StreamEvent`]: wire events pushed to the consumer, in emission order
//! - [`SimulationRequest`]: untrusted creation payload, validated into
//!   [`pd_engine::SimulationConfig`]
mod error;
mod handle;
mod lobby;
mod message;
mod orchestrator;
mod request;
mod session;

pub use error::*;
pub use handle::*;
pub use lobby::*;
pub use message::*;
pub use orchestrator::*;
pub use request::*;
pub use session::*;
