//! # Database Connection Module
//!
//! Provides the [`Database`] handle: one PostgreSQL session opened through
//! the bounded-timeout opener, plus thin pass-through helpers for executing
//! parameterized statements, fetching result sets and scalars, and invoking
//! stored procedures. Each helper delegates straight to the driver; there
//! is no pooling, no transactions, and no SQL rewriting here.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use dbquick::{Config, Database};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_file("dbquick.toml")?;
//! let db = Database::from_config(&config.database).await?;
//! let rows = db.query("SELECT version()", &[]).await?;
//! # Ok(())
//! # }
//! ```

use crate::config::DatabaseConfig;
use crate::connect::open_bounded;
use crate::error::{DbQuickError, Result};
use crate::timeout::ConnectTimeout;
use tokio_postgres::types::{FromSqlOwned, ToSql};
use tokio_postgres::{Client, NoTls, Row};
use tracing::{debug, info, warn};

/// A single open database session.
///
/// Dropping the value closes the session: the background task driving the
/// socket ends once the client side is gone.
pub struct Database {
    client: Client,
}

impl Database {
    /// Open a connection described by configuration.
    ///
    /// The raw `connect_timeout` setting is clamped into the permitted
    /// range before the attempt starts; see [`ConnectTimeout`].
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        let timeout = ConnectTimeout::from_setting(config.connect_timeout.as_ref());
        Self::connect(&config.url, timeout).await
    }

    /// Open a connection to `url`, waiting at most `timeout`.
    ///
    /// The open attempt runs on its own task; if it has not reported
    /// success when the timeout elapses it is aborted and
    /// [`DbQuickError::ConnectTimeout`] is returned. Driver errors during
    /// the attempt collapse into the same timeout error.
    pub async fn connect(url: &str, timeout: ConnectTimeout) -> Result<Self> {
        info!(timeout_ms = timeout.millis(), "opening database connection");
        let client = open_bounded(open_attempt(url.to_string()), timeout).await?;
        Ok(Self { client })
    }

    /// Execute a statement and return the number of rows affected.
    pub async fn execute(&self, statement: &str, params: &[&(dyn ToSql + Sync)]) -> Result<u64> {
        let affected = self.client.execute(statement, params).await?;
        Ok(affected)
    }

    /// Execute a query and return the full result set.
    pub async fn query(&self, statement: &str, params: &[&(dyn ToSql + Sync)]) -> Result<Vec<Row>> {
        let rows = self.client.query(statement, params).await?;
        Ok(rows)
    }

    /// Execute a query and return the first column of the first row.
    ///
    /// Returns `None` when the result set is empty or the value is SQL
    /// NULL.
    pub async fn query_scalar<T>(
        &self,
        statement: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<T>>
    where
        T: FromSqlOwned,
    {
        let rows = self.client.query(statement, params).await?;
        match rows.first() {
            Some(row) => Ok(row.try_get::<_, Option<T>>(0)?),
            None => Ok(None),
        }
    }

    /// Invoke a set-returning procedure or function by name.
    ///
    /// `name` must be a plain, optionally schema-qualified identifier; it
    /// is never interpolated from untrusted input, anything else is
    /// rejected with [`DbQuickError::InvalidIdentifier`]. Parameters are
    /// passed positionally.
    pub async fn run_procedure(
        &self,
        name: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>> {
        let statement = procedure_call_sql(name, params.len())?;
        debug!(procedure = name, "invoking procedure");
        let rows = self.client.query(&statement, params).await?;
        Ok(rows)
    }
}

/// The actual open attempt, run on its own task by the bounded opener.
///
/// Resolves to `None` on any driver error; the error is logged here and
/// absorbed, which is what lets the opener collapse every failure mode
/// into a single timeout signal.
async fn open_attempt(url: String) -> Option<Client> {
    match tokio_postgres::connect(&url, NoTls).await {
        Ok((client, connection)) => {
            // Drives the socket until the client is dropped.
            tokio::spawn(async move {
                if let Err(err) = connection.await {
                    debug!("connection task ended: {err}");
                }
            });
            Some(client)
        }
        Err(err) => {
            warn!("open attempt failed: {err}");
            None
        }
    }
}

/// Build the invocation statement for a set-returning procedure.
fn procedure_call_sql(name: &str, param_count: usize) -> Result<String> {
    if !is_valid_procedure_name(name) {
        return Err(DbQuickError::InvalidIdentifier {
            name: name.to_string(),
        });
    }

    let placeholders: Vec<String> = (1..=param_count).map(|i| format!("${i}")).collect();
    Ok(format!("SELECT * FROM {name}({})", placeholders.join(", ")))
}

/// A plain identifier, optionally schema-qualified with a single dot.
fn is_valid_procedure_name(name: &str) -> bool {
    let mut parts = name.split('.');
    let first = parts.next().is_some_and(is_valid_identifier);
    match parts.next() {
        None => first,
        Some(second) => first && is_valid_identifier(second) && parts.next().is_none(),
    }
}

fn is_valid_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_procedure_call_without_params() {
        let sql = procedure_call_sql("report_totals", 0).unwrap();
        assert_eq!(sql, "SELECT * FROM report_totals()");
    }

    #[test]
    fn test_procedure_call_with_params() {
        let sql = procedure_call_sql("stock.daily_report", 3).unwrap();
        assert_eq!(sql, "SELECT * FROM stock.daily_report($1, $2, $3)");
    }

    #[test]
    fn test_procedure_name_rejects_injection() {
        for name in [
            "report; DROP TABLE users",
            "report()",
            "a.b.c",
            "",
            ".",
            "1report",
            "report totals",
        ] {
            let result = procedure_call_sql(name, 0);
            assert!(
                matches!(result, Err(DbQuickError::InvalidIdentifier { .. })),
                "expected {name:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_identifier_accepts_underscores() {
        assert!(is_valid_procedure_name("_private_fn"));
        assert!(is_valid_procedure_name("public._v2_report"));
    }
}
