use itqan_db::secure::ScopeError;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::dependency_guard::DependencyBlocked;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    /// Actor or tenant setup is invalid; surfaced to an operator.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A tenant relationship path or dependency count could not be built.
    #[error("Query construction failed: {message}")]
    QueryConstruction { message: String },

    #[error(transparent)]
    DependencyBlocked(#[from] DependencyBlocked),

    #[error("Cannot {action}: {reason}")]
    InvalidTransition { action: &'static str, reason: String },

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: Uuid },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn query_construction(message: impl Into<String>) -> Self {
        Self::QueryConstruction {
            message: message.into(),
        }
    }

    pub fn invalid_transition(action: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidTransition {
            action,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn not_found(resource: &'static str, id: Uuid) -> Self {
        Self::NotFound { resource, id }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

impl From<ScopeError> for DomainError {
    fn from(e: ScopeError) -> Self {
        match e {
            ScopeError::Db(db) => Self::database(db.to_string()),
            ScopeError::UnresolvedPath { .. } | ScopeError::Invalid(_) => {
                Self::query_construction(e.to_string())
            }
            ScopeError::Denied(msg) => Self::forbidden(msg),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::database(e.to_string())
    }
}
