//! # Error Types
//!
//! The condition engine itself never fails. These errors come from the layers
//! around it: parsing wire values, configuration, and operation tokens.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RevisionError {
    /// A condition status string other than `True`, `False` or `Unknown`
    #[error("invalid condition status {0:?}: expected True, False or Unknown")]
    InvalidConditionStatus(String),

    /// A `loglevel.<component>` entry that does not name a known level
    #[error("invalid logging level {level:?} for component {component:?}")]
    InvalidLogLevel { component: String, level: String },

    /// An operation token whose name is not recognized
    #[error("unknown operation {0:?}")]
    UnknownOperation(String),

    /// An operation token missing a required argument
    #[error("operation {operation:?} requires a {argument} argument")]
    MissingArgument {
        operation: String,
        argument: &'static str,
    },
}
