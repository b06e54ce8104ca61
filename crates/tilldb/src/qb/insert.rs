//! INSERT query builder.

use crate::qb::param::{Param, ParamList};
use crate::qb::traits::{MutationBuilder, SqlBuilder};
use tokio_postgres::types::ToSql;

/// INSERT query builder.
///
/// The column list and the positional placeholders both come from the order
/// of the `set` calls, and the statement carries `RETURNING *` by default so
/// the inserted row (ids and column defaults included) comes back to the
/// caller.
#[derive(Clone, Debug)]
pub struct InsertBuilder {
    table: String,
    columns: Vec<String>,
    values: Vec<Param>,
    returning: Vec<String>,
}

impl InsertBuilder {
    /// Create a new INSERT query builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            values: Vec::new(),
            returning: vec!["*".to_string()],
        }
    }

    /// Set a column value.
    pub fn set<T: ToSql + Send + Sync + 'static>(mut self, column: &str, value: T) -> Self {
        self.columns.push(column.to_string());
        self.values.push(Param::new(value));
        self
    }

    /// Set an optional column value (None => omit the column, letting the
    /// database default apply).
    pub fn set_opt<T: ToSql + Send + Sync + 'static>(self, column: &str, value: Option<T>) -> Self {
        if let Some(v) = value {
            self.set(column, v)
        } else {
            self
        }
    }

    /// Set a JSON column.
    pub fn set_json<T: serde::Serialize + Sync + Send>(
        self,
        column: &str,
        value: &T,
    ) -> serde_json::Result<Self> {
        let json_val = serde_json::to_value(value)?;
        Ok(self.set(column, json_val))
    }

    /// Override the RETURNING columns (default `*`).
    pub fn returning(mut self, cols: &[&str]) -> Self {
        self.returning = cols.iter().map(|s| s.to_string()).collect();
        self
    }
}

impl SqlBuilder for InsertBuilder {
    fn build_query(&self) -> (String, ParamList) {
        let mut params = ParamList::new();

        let mut sql = if self.columns.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", self.table)
        } else {
            let placeholders: Vec<String> = self
                .values
                .iter()
                .map(|v| {
                    let idx = params.append(v.clone());
                    format!("${}", idx)
                })
                .collect();

            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.table,
                self.columns.join(", "),
                placeholders.join(", ")
            )
        };

        if !self.returning.is_empty() {
            sql.push_str(" RETURNING ");
            sql.push_str(&self.returning.join(", "));
        }

        (sql, params)
    }
}

impl MutationBuilder for InsertBuilder {}
