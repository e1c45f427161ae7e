//! Error types shared by the category and menu item actors.

use crate::error::ErrorKind;
use crate::model::CategoryId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    #[error("{0}")]
    Validation(String),

    #[error("category not found: {0}")]
    CategoryNotFound(String),

    #[error("menu item not found: {0}")]
    ItemNotFound(String),

    /// Menu items still reference the category.
    #[error("category {category} still has {count} menu items")]
    HasItems { category: CategoryId, count: usize },

    #[error("menu store unavailable: {0}")]
    Unavailable(String),
}

impl MenuError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MenuError::Validation(_) => ErrorKind::ValidationFailed,
            MenuError::CategoryNotFound(_) | MenuError::ItemNotFound(_) => ErrorKind::NotFound,
            MenuError::HasItems { .. } => ErrorKind::Conflict,
            MenuError::Unavailable(_) => ErrorKind::Unavailable,
        }
    }
}
