// Public modules
pub mod classify;
pub mod cleanup;
pub mod collect;
pub mod config;
pub mod error;
pub mod exclude;
pub mod git;
pub mod naming;
pub mod pipeline;
pub mod prompt;
pub mod rename;
pub mod report;
pub mod rewrite;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use naming::{AcronymSet, ReplacementPair};
pub use pipeline::{Plan, RunReport};
