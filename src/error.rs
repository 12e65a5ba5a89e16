//! Error types for wardrobe catalog operations.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors surfaced by the catalog engine.
///
/// Every operation that returns one of these leaves the catalog exactly as it
/// was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// Category token is not one of the six fixed categories.
    #[error("invalid category: `{0}`")]
    InvalidCategory(String),

    /// A garment with the same (case-insensitive) name already lives in the category.
    #[error("an item named `{name}` already exists in {category}")]
    DuplicateName {
        /// Category that already holds the name.
        category: String,
        /// Name as supplied by the caller.
        name: String,
    },

    /// No garment with this name in the category.
    #[error("no item named `{name}` in {category}")]
    NotFound {
        /// Category that was searched.
        category: String,
        /// Name as supplied by the caller.
        name: String,
    },

    /// Wear date is not a valid MM/DD/YYYY calendar date.
    #[error("invalid date `{0}`; expected MM/DD/YYYY")]
    InvalidDate(String),

    /// Menu or selector index outside `1..=max`.
    #[error("invalid choice `{choice}`; expected a number from 1 to {max}")]
    InvalidChoice {
        /// Raw selector as typed.
        choice: String,
        /// Largest accepted selector.
        max: usize,
    },

    /// Cost is negative or not a finite number.
    #[error("invalid cost {0}; cost must be a non-negative number")]
    InvalidCost(f64),

    /// Name is empty or whitespace only.
    #[error("item name cannot be empty")]
    InvalidName,

    /// Snapshot data violates a catalog invariant.
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),
}
