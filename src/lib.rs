//! Revision Condition Manager Library
//!
//! Tracks the health of a serving Revision through named conditions and
//! derives the aggregate `Ready` condition that control loops use to decide
//! whether a revision may receive traffic or be torn down.
//!
//! The engine in [`conditions`] is kind-agnostic; [`revision`] binds it to the
//! Revision vocabulary.

pub mod conditions;
pub mod config;
pub mod constants;
pub mod crd;
pub mod error;
pub mod observability;
pub mod revision;

// Re-export CRD types for convenience
pub use crd::*;
pub use error::RevisionError;
