//! Selection heuristics: which question to ask next and when to guess.
//!
//! Both are pure functions of the data handed to them; the session decides
//! what data that is.

mod guess;
mod partition;

pub use guess::*;
pub use partition::*;
