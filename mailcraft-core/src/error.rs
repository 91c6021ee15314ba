//! Error types for template operations.

use thiserror::Error;

use crate::{ColumnId, ElementPath, SectionId};

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur while editing a template.
///
/// None of these leave the tree in a modified state: an operation that
/// fails has not touched anything.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Section not found in template.
    #[error("Section not found: {0}")]
    SectionNotFound(SectionId),

    /// Column not found in section.
    #[error("Column {column} not found in section {section}")]
    ColumnNotFound {
        /// Section that was searched.
        section: SectionId,
        /// Missing column.
        column: ColumnId,
    },

    /// Element not found at the given path.
    #[error("Element not found: {0}")]
    ElementNotFound(ElementPath),

    /// Section move would leave the section list.
    #[error("Cannot move section {0} past the edge of the template")]
    MoveOutOfBounds(SectionId),

    /// Column width outside the accepted percentage range.
    #[error("Invalid column width: {0}")]
    InvalidWidth(String),

    /// Column count outside the supported split range.
    #[error("Invalid column count: {0} (expected 1-5)")]
    InvalidColumnCount(u8),

    /// Command script serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
