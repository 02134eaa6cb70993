//! # Conditions
//!
//! A resource-kind-agnostic condition engine.
//!
//! ## Sub-modules
//!
//! - `set` - Declares which condition types a kind tracks and how they aggregate
//! - `manager` - Applies mutations to a condition list and recomputes the happy condition

mod manager;
mod set;

pub use manager::ConditionManager;
pub use set::{ConditionSet, Dependent, Membership};
