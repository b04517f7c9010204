//! # Guess Catalog
//!
//! The data side of the person guesser: people, questions, historical answer
//! statistics and the repository abstraction the engine reads them through.
//! This crate holds no game logic beyond the dominant-answer rule.

pub mod answers;
pub mod entities;
pub mod repository;

pub use answers::*;
pub use entities::*;
pub use repository::*;
