//! SQLite access for wardctl.
//!
//! Every statement runs on its own short-lived connection obtained through
//! [`Database::with_connection`]; nothing holds a handle between calls. The
//! executors built on top of it log their outcome and collapse storage
//! failures into `bool` / `Option` sentinels.

pub mod schema;

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rusqlite::types::{ToSql, Type, Value};
use rusqlite::{params_from_iter, Connection, Row};
use tracing::{debug, error, warn, Span};

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::models::parse_timestamp;

/// Build a `Vec<Value>` for [`SqlOperation`] from anything convertible.
macro_rules! values {
    ($($value:expr),* $(,)?) => {
        vec![$(rusqlite::types::Value::from($value)),*]
    };
}

pub(crate) use values;

/// One statement of a [`Database::run_transaction`] batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlOperation {
    pub sql: String,
    pub params: Vec<Value>,
}

impl SqlOperation {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

/// Handle on the database file. Cheap to clone; opens nothing until used.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    foreign_keys: bool,
    span: Span,
}

impl Database {
    /// Database at `path` with foreign-key enforcement on.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let span = tracing::info_span!("db", path = %path.display());
        Self {
            path,
            foreign_keys: true,
            span,
        }
    }

    pub fn from_config(config: &DatabaseConfig) -> Self {
        let mut db = Self::new(&config.path);
        db.foreign_keys = config.foreign_keys;
        db
    }

    /// Replace the span every executor event is recorded under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn foreign_keys(&self) -> bool {
        self.foreign_keys
    }

    fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&self.path)?;
        if self.foreign_keys {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        }
        Ok(conn)
    }

    /// Run `block` against a fresh connection.
    ///
    /// With `start_transaction` the block runs inside `BEGIN`. On `Ok` any
    /// open transaction is committed; on `Err` it is rolled back and the error
    /// is logged and handed back. The connection is closed on every path.
    pub fn with_connection<T, F>(&self, start_transaction: bool, block: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let _entered = self.span.enter();

        let conn = match self.open() {
            Ok(conn) => conn,
            Err(err) => {
                error!(error = %err, "failed to open database");
                return Err(err);
            }
        };

        let outcome = (|| -> Result<T> {
            if start_transaction {
                conn.execute_batch("BEGIN;")?;
            }
            let value = block(&conn)?;
            if !conn.is_autocommit() {
                conn.execute_batch("COMMIT;")?;
            }
            Ok(value)
        })();

        if let Err(err) = &outcome {
            if !conn.is_autocommit() {
                if let Err(rollback_err) = conn.execute_batch("ROLLBACK;") {
                    warn!(error = %rollback_err, "rollback failed");
                }
            }
            error!(error = %err, "database operation failed, changes rolled back");
        }

        if let Err((_conn, close_err)) = conn.close() {
            warn!(error = %close_err, "failed to close database connection");
        }

        outcome
    }

    /// Execute DDL. Failures are logged and otherwise ignored.
    pub fn create_table(&self, sql: &str) {
        let result = self.with_connection(false, |conn| {
            conn.execute_batch(sql)?;
            Ok(())
        });
        if result.is_ok() {
            debug!(sql = first_line(sql), "table ready");
        }
    }

    /// Insert a row and return its rowid.
    pub fn insert(&self, sql: &str, params: &[&dyn ToSql]) -> Option<i64> {
        let result = self.with_connection(false, |conn| {
            conn.execute(sql, params)?;
            Ok(conn.last_insert_rowid())
        });
        match result {
            Ok(id) => {
                debug!(sql = first_line(sql), id, "inserted");
                Some(id)
            }
            Err(_) => None,
        }
    }

    /// Rows as dynamically typed values. `Some(vec![])` when nothing matched.
    pub fn query(&self, sql: &str, params: &[&dyn ToSql]) -> Option<Vec<Vec<Value>>> {
        self.query_map(sql, params, |row| {
            let columns = row.as_ref().column_count();
            (0..columns).map(|idx| row.get::<_, Value>(idx)).collect()
        })
    }

    /// Rows decoded through `mapper`.
    pub fn query_map<T, F>(&self, sql: &str, params: &[&dyn ToSql], mut mapper: F) -> Option<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let result = self.with_connection(false, |conn| {
            let mut stmt = conn.prepare(sql)?;
            let rows = stmt
                .query_map(params, |row| mapper(row))?
                .collect::<rusqlite::Result<Vec<T>>>()?;
            Ok(rows)
        });
        match result {
            Ok(rows) => {
                debug!(sql = first_line(sql), rows = rows.len(), "query");
                Some(rows)
            }
            Err(_) => None,
        }
    }

    /// Execute a statement and return the number of affected rows.
    pub fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> Option<usize> {
        let result = self.with_connection(false, |conn| Ok(conn.execute(sql, params)?));
        match result {
            Ok(changed) => {
                debug!(sql = first_line(sql), changed, "executed");
                Some(changed)
            }
            Err(_) => None,
        }
    }

    pub fn update(&self, sql: &str, params: &[&dyn ToSql]) {
        self.execute(sql, params);
    }

    pub fn delete(&self, sql: &str, params: &[&dyn ToSql]) {
        self.execute(sql, params);
    }

    /// Run every operation inside one transaction. Any failure rolls back
    /// the whole batch and yields `false`.
    pub fn run_transaction(&self, operations: &[SqlOperation]) -> bool {
        let result = self.with_connection(true, |conn| {
            for op in operations {
                conn.execute(&op.sql, params_from_iter(op.params.iter()))?;
            }
            Ok(())
        });
        if result.is_ok() {
            debug!(statements = operations.len(), "transaction committed");
        }
        result.is_ok()
    }
}

/// Read a timestamp column written by [`crate::models::format_timestamp`].
pub(crate) fn timestamp_column(row: &Row<'_>, idx: usize, column: &'static str) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    parse_timestamp(column, &raw)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

fn first_line(sql: &str) -> &str {
    sql.trim().lines().next().unwrap_or_default()
}
