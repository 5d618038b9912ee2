//! # Utility Functions
//!
//! - **[`runtime`]**: spawning onto the ambient or fallback Tokio runtime
//!
//! Address formatting lives in [`shared::utils`].

pub mod runtime;
