//! # Revision
//!
//! Revision-specific condition vocabulary and operations.
//!
//! ## Sub-modules
//!
//! - `lifecycle` - Mark/predicate operations on `RevisionStatus`
//! - `operation` - Textual operations replayed by `revisionctl`

mod lifecycle;
mod operation;

pub use lifecycle::REVISION_CONDITION_SET;
pub use operation::Operation;
