//! Error handling for stbcomp operations
//!
//! This module re-exports the error types used throughout the crate.
//! They use thiserror for ergonomic error handling and carry the context
//! needed to report a failed compression to the caller.

pub use crate::common::Result;
pub use crate::common::StbError;
