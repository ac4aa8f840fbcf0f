/// Errors that can occur during scoped query construction and execution.
#[derive(thiserror::Error, Debug)]
pub enum ScopeError {
    /// Database error occurred during query execution.
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    /// Invalid scope configuration.
    #[error("invalid scope: {0}")]
    Invalid(&'static str),

    /// Operation denied - entity not accessible in current security scope.
    #[error("access denied: {0}")]
    Denied(&'static str),

    /// A tenant relationship path could not be resolved against the schema.
    #[error("cannot resolve tenant path '{path}' from '{table}': {reason}")]
    UnresolvedPath {
        table: String,
        path: String,
        reason: String,
    },
}

/// Failure of [`SecureConn::in_transaction`](crate::secure::SecureConn::in_transaction).
/// Either kind rolls the transaction back.
#[derive(thiserror::Error, Debug)]
pub enum TxError<E> {
    /// Returned by the transaction body.
    #[error("{0}")]
    Domain(E),

    /// The transaction could not be opened or committed.
    #[error("transaction failed: {0}")]
    Scope(#[from] ScopeError),
}

impl<E: From<ScopeError>> TxError<E> {
    /// Collapse into the body's error type.
    #[must_use]
    pub fn into_domain(self) -> E {
        match self {
            Self::Domain(e) => e,
            Self::Scope(e) => e.into(),
        }
    }
}
