//! Error types for page processing.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Only
//! structurally invalid top-level input fails fast; per-item problems
//! (missing geometry, unmatched patterns) degrade gracefully and are
//! reported through the diagnostics sink instead.

use thiserror::Error;

/// Fatal input errors for [`PageProcessor`](crate::page::PageProcessor).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    /// An entry in the image path list is an empty string.
    #[error("image path at index {index} is empty")]
    EmptyImagePath {
        /// Position of the offending entry in the input list.
        index: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_image_path_display() {
        let err = PageError::EmptyImagePath { index: 3 };
        assert_eq!(err.to_string(), "image path at index 3 is empty");
    }

    #[test]
    fn test_implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(PageError::EmptyImagePath { index: 0 });
        assert!(err.to_string().contains("index 0"));
    }
}
