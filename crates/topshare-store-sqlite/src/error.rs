//! Error type for `topshare-store-sqlite`.
//!
//! Raw SQLite faults are folded into a small closed set of kinds so callers
//! (and their HTTP error bodies) can tell a constraint violation from a
//! connectivity or execution fault without parsing driver messages.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The statement violated a schema constraint (foreign key, UNIQUE, NOT
  /// NULL). Typically an income-share insert referencing a country that
  /// does not exist.
  #[error("constraint violation: {0}")]
  Constraint(String),

  #[error("database error: {0}")]
  Database(tokio_rusqlite::Error),
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(e: tokio_rusqlite::Error) -> Self {
    match &e {
      tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _))
        if f.code == rusqlite::ErrorCode::ConstraintViolation =>
      {
        Error::Constraint(e.to_string())
      }
      _ => Error::Database(e),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
