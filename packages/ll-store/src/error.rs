//! Error types for the LL layer.
//!
//! Errors at this level are positional only. Nothing here knows what a
//! blank or a state is - those belong in higher layers.

use thiserror::Error;

/// Errors at the LL (low-level) layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An index could not be reached by traversal.
    ///
    /// `len` is the number of elements the container held at the time.
    #[error("index {index} is out of range (length {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Result type alias for LL operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_works() {
        let e = StoreError::OutOfRange { index: 7, len: 3 };
        let display = format!("{}", e);
        assert!(display.contains('7'));
        assert!(display.contains("length 3"));
    }
}
