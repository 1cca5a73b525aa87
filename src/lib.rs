// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod ai;
pub mod article;
pub mod config;
pub mod dedup;
pub mod extract;
pub mod grouping;
pub mod ingest;
pub mod normalize;
pub mod pipeline;
pub mod rank;
pub mod report;
pub mod resolve;
pub mod similarity;
pub mod store;
pub mod summarize;
pub mod trust;

// ---- Re-exports for stable public API ----
pub use crate::article::Article;
pub use crate::pipeline::{Pipeline, RunOutcome};
