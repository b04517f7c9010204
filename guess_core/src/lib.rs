//! # Guess Core
//!
//! The decision engine of the person guesser. It narrows a set of candidate
//! people by asking yes/no questions and decides when to name one of them.
//!
//! ## Core Components
//!
//! - **selection**: question partitioning and guess timing heuristics
//! - **aggregator**: applies user answers to the session's questions and candidates
//! - **session**: the per-session state machine and its public turn API
//! - **registry**: keeps many isolated sessions keyed by ID
//!
//! All durable data is read through [`guess_catalog::Repository`]; the engine
//! never writes it back. Finished sessions expose a [`GameSummary`] a host
//! may persist.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod registry;
pub mod selection;
pub mod session;

pub use config::*;
pub use error::*;
pub use registry::*;
pub use selection::*;
pub use session::*;
