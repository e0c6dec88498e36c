//! FD Rate Engine
//!
//! Answers "what fixed-deposit rate can I get" end to end:
//! - Parses structured intent (amount, tenure, age) out of a free-text query
//! - Scrapes rate tables from a bank-comparison page, matching tables to the
//!   requested tenure through inferred tenure bands
//! - Normalizes ranged rate strings into numeric bounds
//! - Ranks the best offer per provider and persists a flat CSV snapshot
//! - Falls back to a single bank's product page when the primary source
//!   fails or yields nothing
//!
//! LLM consultant agents are external collaborators: the engine hands them
//! an opaque serialized snapshot and never depends on their output.

pub mod band;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod normalize;
pub mod query;
pub mod rank;
pub mod snapshot;
pub mod store;
pub mod table;

pub use error::Result;

// Re-export common types
pub use config::EngineConfig;
pub use engine::RateEngine;
pub use models::*;
pub use query::{is_senior, parse_user_query};
