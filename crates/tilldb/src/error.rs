//! Error types for tilldb

use thiserror::Error;

/// Result type alias for tilldb operations
pub type DbResult<T> = Result<T, DbError>;

/// Error types for database operations
#[derive(Debug, Error)]
pub enum DbError {
    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Unclassified query execution error (raw driver error preserved).
    ///
    /// Constructed only through [`from_db_error`](Self::from_db_error), so
    /// classifiable SQLSTATEs cannot slip through as raw driver errors.
    #[error("Query error: {0}")]
    Query(#[source] tokio_postgres::Error),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique constraint violation (SQLSTATE 23505)
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Foreign key constraint violation (SQLSTATE 23503)
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Not-null constraint violation (SQLSTATE 23502)
    #[error("Not-null violation: {0}")]
    NotNullViolation(String),

    /// Missing relation (SQLSTATE 42P01)
    #[error("Undefined table: {0}")]
    UndefinedTable(String),

    /// Missing column (SQLSTATE 42703)
    #[error("Undefined column: {0}")]
    UndefinedColumn(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Builder misuse caught before execution
    #[error("Validation error: {0}")]
    Validation(String),

    /// Pool error (checkout failure, timeout, pool closed)
    #[error("Pool error: {0}")]
    Pool(String),
}

/// Stable classification of a [`DbError`], surfaced to callers as a code
/// string rather than an exception type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DuplicateKey,
    ForeignKeyViolation,
    NotNullViolation,
    UndefinedTable,
    UndefinedColumn,
    NotFound,
    Decode,
    Validation,
    Connection,
    Pool,
    Unclassified,
}

impl ErrorKind {
    /// Stable string code for logs and user-facing reclassification.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DuplicateKey => "duplicate_key",
            Self::ForeignKeyViolation => "foreign_key_violation",
            Self::NotNullViolation => "not_null_violation",
            Self::UndefinedTable => "undefined_table",
            Self::UndefinedColumn => "undefined_column",
            Self::NotFound => "not_found",
            Self::Decode => "decode",
            Self::Validation => "validation",
            Self::Connection => "connection",
            Self::Pool => "pool",
            Self::Unclassified => "unclassified",
        }
    }
}

impl DbError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateKey(_) => ErrorKind::DuplicateKey,
            Self::ForeignKeyViolation(_) => ErrorKind::ForeignKeyViolation,
            Self::NotNullViolation(_) => ErrorKind::NotNullViolation,
            Self::UndefinedTable(_) => ErrorKind::UndefinedTable,
            Self::UndefinedColumn(_) => ErrorKind::UndefinedColumn,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Connection(_) => ErrorKind::Connection,
            Self::Pool(_) => ErrorKind::Pool,
            Self::Query(_) => ErrorKind::Unclassified,
        }
    }

    /// Check if this is a duplicate key error
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey(_))
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Parse a tokio_postgres error into a more specific DbError.
    ///
    /// SQLSTATEs outside the classified set keep the raw driver error.
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            let detail = match db_err.constraint().or(db_err.column()) {
                Some(name) => format!("{}: {}", name, db_err.message()),
                None => db_err.message().to_string(),
            };

            match db_err.code().code() {
                "23505" => return Self::DuplicateKey(detail),
                "23503" => return Self::ForeignKeyViolation(detail),
                "23502" => return Self::NotNullViolation(detail),
                "42P01" => return Self::UndefinedTable(detail),
                "42703" => return Self::UndefinedColumn(detail),
                _ => {}
            }
        }
        Self::Query(err)
    }
}

impl From<deadpool_postgres::PoolError> for DbError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_codes_are_stable() {
        assert_eq!(DbError::DuplicateKey("x".into()).kind().as_str(), "duplicate_key");
        assert_eq!(
            DbError::ForeignKeyViolation("x".into()).kind().as_str(),
            "foreign_key_violation"
        );
        assert_eq!(
            DbError::NotNullViolation("x".into()).kind().as_str(),
            "not_null_violation"
        );
        assert_eq!(DbError::UndefinedTable("x".into()).kind().as_str(), "undefined_table");
        assert_eq!(DbError::UndefinedColumn("x".into()).kind().as_str(), "undefined_column");
        assert_eq!(DbError::validation("x").kind().as_str(), "validation");
    }

    #[test]
    fn helpers_match_variants() {
        assert!(DbError::DuplicateKey("k".into()).is_duplicate_key());
        assert!(DbError::not_found("row").is_not_found());
        assert!(!DbError::not_found("row").is_duplicate_key());
    }
}
