//! Shared types for the Lodge membership platform
//!
//! Error codes, the unified API response envelope, and small utilities
//! used by the service crates.

pub mod error;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
