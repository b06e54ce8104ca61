//! UPDATE query builder.

use crate::error::{DbError, DbResult};
use crate::qb::filter::FilterSet;
use crate::qb::param::{Param, ParamList};
use crate::qb::traits::{MutationBuilder, SqlBuilder};
use tokio_postgres::types::ToSql;

/// UPDATE query builder.
///
/// SET values take placeholders `$1..$k` in `set`-call order; the accumulated
/// WHERE predicates continue from `$k+1`, and the bound parameter list is the
/// SET values followed by the WHERE values in that exact order.
#[derive(Clone, Debug)]
pub struct UpdateBuilder {
    table: String,
    sets: Vec<(String, Param)>,
    filters: FilterSet,
    returning: Vec<String>,
}

impl UpdateBuilder {
    /// Create a new UPDATE query builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            sets: Vec::new(),
            filters: FilterSet::new(),
            returning: vec!["*".to_string()],
        }
    }

    /// Set a column value.
    pub fn set<T: ToSql + Send + Sync + 'static>(mut self, column: &str, value: T) -> Self {
        self.sets.push((column.to_string(), Param::new(value)));
        self
    }

    /// Set an optional column value (None => leave the column untouched).
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

    // ==================== WHERE conditions ====================

    /// Add WHERE: column = value
    pub fn eq<T: ToSql + Send + Sync + 'static>(mut self, column: &str, value: T) -> Self {
        self.filters.eq(column, value);
        self
    }

    /// Add WHERE: column != value
    pub fn ne<T: ToSql + Send + Sync + 'static>(mut self, column: &str, value: T) -> Self {
        self.filters.ne(column, value);
        self
    }

    /// Add WHERE: column > value
    pub fn gt<T: ToSql + Send + Sync + 'static>(mut self, column: &str, value: T) -> Self {
        self.filters.gt(column, value);
        self
    }

    /// Add WHERE: column >= value
    pub fn gte<T: ToSql + Send + Sync + 'static>(mut self, column: &str, value: T) -> Self {
        self.filters.gte(column, value);
        self
    }

    /// Add WHERE: column < value
    pub fn lt<T: ToSql + Send + Sync + 'static>(mut self, column: &str, value: T) -> Self {
        self.filters.lt(column, value);
        self
    }

    /// Add WHERE: column <= value
    pub fn lte<T: ToSql + Send + Sync + 'static>(mut self, column: &str, value: T) -> Self {
        self.filters.lte(column, value);
        self
    }

    /// Add WHERE: column IN (values...)
    pub fn in_list<T: ToSql + Send + Sync + 'static>(mut self, column: &str, values: Vec<T>) -> Self {
        self.filters.in_list(column, values);
        self
    }

    /// Override the RETURNING columns (default `*`).
    pub fn returning(mut self, cols: &[&str]) -> Self {
        self.returning = cols.iter().map(|s| s.to_string()).collect();
        self
    }
}

impl SqlBuilder for UpdateBuilder {
    fn build_query(&self) -> (String, ParamList) {
        let mut params = ParamList::new();

        let set_parts: Vec<String> = self
            .sets
            .iter()
            .map(|(col, param)| {
                let idx = params.append(param.clone());
                format!("{} = ${}", col, idx)
            })
            .collect();

        let mut sql = format!("UPDATE {} SET {}", self.table, set_parts.join(", "));

        // WHERE placeholders continue from the SET count.
        let where_sql = self.filters.build(&mut params);
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }

        if !self.returning.is_empty() {
            sql.push_str(" RETURNING ");
            sql.push_str(&self.returning.join(", "));
        }

        (sql, params)
    }

    fn validate(&self) -> DbResult<()> {
        if self.sets.is_empty() {
            return Err(DbError::validation("UPDATE requires at least one SET column"));
        }
        Ok(())
    }
}

impl MutationBuilder for UpdateBuilder {}
