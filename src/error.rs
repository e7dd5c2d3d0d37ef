use thiserror::Error;

/// Custom error types for `dbquick`
#[derive(Error, Debug)]
pub enum DbQuickError {
    /// The open attempt did not report success within the effective timeout.
    ///
    /// Driver-level open failures are absorbed and surface as this variant
    /// too; the caller cannot distinguish a slow open from a failed one.
    #[error(
        "connection timed out after {effective_ms}ms: could not reach the database; \
         adjust the connect_timeout setting in the [database] config section if needed"
    )]
    ConnectTimeout {
        /// The clamped timeout that was enforced, in milliseconds
        effective_ms: u64,
    },

    /// A procedure name that is not a plain identifier was rejected.
    #[error("invalid procedure name: {name:?}")]
    InvalidIdentifier {
        /// The rejected name
        name: String,
    },

    /// Driver error from a statement executed over an open connection
    #[error("database query error: {0}")]
    Query(#[from] tokio_postgres::Error),
}

/// Result type alias for `dbquick` operations
pub type Result<T> = std::result::Result<T, DbQuickError>;
