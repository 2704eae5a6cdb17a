//! Error types for the Core layer.
//!
//! Every failure is raised where it is detected and handed straight back to
//! the caller. The machine does not retry or roll back; tapes keep whatever
//! partial state they had when the error surfaced.

use tapeworks_ll_store::StoreError;
use thiserror::Error;

use crate::state::StateId;

/// Errors at the Core layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// A tape head, tape index or stack index could not be reached.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The tape head points past the end of its storage.
    #[error("tape head is an invalid value: {head}, tape size: {len}")]
    StaleHead { head: usize, len: usize },

    /// No action is registered for the requested state.
    #[error("requested state {0} could not be found")]
    UnknownState(StateId),

    /// Rules exist for the requested state but were never built.
    #[error(
        "requested state {0} could not be found, however a rule for state {0} exists that \
         is not built, consider building it with build()"
    )]
    UnbuiltState(StateId),

    /// A value was needed before it was set (blank symbols, mostly).
    #[error("uninitialized value: {0}")]
    UninitializedValue(&'static str),

    /// No compiled dispatch table exists for the state being executed.
    #[error("no expression found with associated state: {0}")]
    NoCompiledExpression(StateId),

    /// `build_state` was asked for a state that has no declared rules.
    #[error("no rules declared for state {0}")]
    NoRulesForState(StateId),

    /// `build` was invoked with no rules declared at all.
    #[error("attempted to build an empty rule list, please add a rule before building")]
    EmptyRuleSet,
}

/// The four failure categories a caller can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    OutOfRange,
    UninitializedValue,
    NotFound,
    InvalidArgument,
}

impl MachineError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MachineError::Store(_)
            | MachineError::StaleHead { .. }
            | MachineError::UnknownState(_)
            | MachineError::UnbuiltState(_) => ErrorKind::OutOfRange,
            MachineError::UninitializedValue(_) => ErrorKind::UninitializedValue,
            MachineError::NoCompiledExpression(_) | MachineError::NoRulesForState(_) => {
                ErrorKind::NotFound
            }
            MachineError::EmptyRuleSet => ErrorKind::InvalidArgument,
        }
    }
}

/// Result type alias for machine operations.
pub type Result<T> = std::result::Result<T, MachineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbuilt_state_mentions_build() {
        let e = MachineError::UnbuiltState(4);
        let display = format!("{}", e);
        assert!(display.contains("state 4"));
        assert!(display.contains("build()"));
        assert_eq!(e.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn store_error_converts() {
        let e: MachineError = StoreError::OutOfRange { index: 2, len: 1 }.into();
        assert!(matches!(e, MachineError::Store(_)));
        assert_eq!(e.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn kinds_cover_taxonomy() {
        assert_eq!(
            MachineError::UninitializedValue("input blank").kind(),
            ErrorKind::UninitializedValue
        );
        assert_eq!(MachineError::NoCompiledExpression(0).kind(), ErrorKind::NotFound);
        assert_eq!(MachineError::NoRulesForState(0).kind(), ErrorKind::NotFound);
        assert_eq!(MachineError::EmptyRuleSet.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            MachineError::StaleHead { head: 3, len: 3 }.kind(),
            ErrorKind::OutOfRange
        );
    }
}
