//! Request handlers.
//!
//! # Responsibility
//! - Validate request input before any store access.
//! - Delegate to a repository and map results to response shapes.
//!
//! # Invariants
//! - Handlers hold no state between calls.
//! - Only quote lookups surface "not found"; empty favorite and diary
//!   results are successful empty responses.
//! - Store failures are propagated, never swallowed or retried.

use crate::model::validation::InputValidationError;
use crate::repo::RepoError;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod diary_service;
pub mod favorite_service;
pub mod quote_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Handler-level failure.
#[derive(Debug)]
pub enum ServiceError {
    /// No quote matched; carries the endpoint-specific message.
    NotFound(String),
    /// Input was rejected before reaching the store.
    Validation(InputValidationError),
    /// The store could not be reached or a statement failed.
    StoreUnavailable(RepoError),
}

impl ServiceError {
    /// Stable machine-readable label.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation_error",
            Self::StoreUnavailable(_) => "store_unavailable",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(message) => write!(f, "{message}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::StoreUnavailable(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Validation(err) => Some(err),
            Self::StoreUnavailable(err) => Some(err),
        }
    }
}

impl From<InputValidationError> for ServiceError {
    fn from(value: InputValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::StoreUnavailable(value)
    }
}

/// Generic success envelope for write operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Acknowledgement {
    pub message: String,
    /// Id of the created row, when the operation creates one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Rows touched by update/delete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected: Option<usize>,
}

impl Acknowledgement {
    fn created(message: &str, id: i64) -> Self {
        Self {
            message: message.to_string(),
            id: Some(id),
            affected: None,
        }
    }

    fn affected(message: &str, affected: usize) -> Self {
        Self {
            message: message.to_string(),
            id: None,
            affected: Some(affected),
        }
    }
}
