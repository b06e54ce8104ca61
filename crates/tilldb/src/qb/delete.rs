//! DELETE query builder.

use crate::qb::filter::FilterSet;
use crate::qb::param::ParamList;
use crate::qb::traits::{MutationBuilder, SqlBuilder};
use tokio_postgres::types::ToSql;

/// DELETE query builder.
///
/// Without WHERE conditions the builder compiles the no-op `WHERE 1=0`
/// unless [`allow_delete_all`](DeleteBuilder::allow_delete_all) is set, so a
/// forgotten filter cannot empty a table.
#[derive(Clone, Debug)]
pub struct DeleteBuilder {
    table: String,
    filters: FilterSet,
    returning: Vec<String>,
    allow_delete_all: bool,
}

impl DeleteBuilder {
    /// Create a new DELETE query builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            filters: FilterSet::new(),
            returning: vec!["*".to_string()],
            allow_delete_all: false,
        }
    }

    /// Allow DELETE without WHERE conditions (dangerous!).
    pub fn allow_delete_all(mut self, allow: bool) -> Self {
        self.allow_delete_all = allow;
        self
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

    /// Add WHERE: column < value
    pub fn lt<T: ToSql + Send + Sync + 'static>(mut self, column: &str, value: T) -> Self {
        self.filters.lt(column, value);
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

impl SqlBuilder for DeleteBuilder {
    fn build_query(&self) -> (String, ParamList) {
        let mut params = ParamList::new();

        let mut sql = format!("DELETE FROM {}", self.table);

        if self.filters.is_empty() && !self.allow_delete_all {
            sql.push_str(" WHERE 1=0");
        } else {
            let where_sql = self.filters.build(&mut params);
            if !where_sql.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&where_sql);
            }
        }

        if !self.returning.is_empty() {
            sql.push_str(" RETURNING ");
            sql.push_str(&self.returning.join(", "));
        }

        (sql, params)
    }
}

impl MutationBuilder for DeleteBuilder {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_delete() {
        let qb = DeleteBuilder::new("categories").eq("id", 1i64);
        assert_eq!(
            qb.to_sql(),
            "DELETE FROM categories WHERE id = $1 RETURNING *"
        );
    }

    #[test]
    fn delete_without_where_is_noop() {
        let qb = DeleteBuilder::new("categories");
        assert_eq!(qb.to_sql(), "DELETE FROM categories WHERE 1=0 RETURNING *");
    }

    #[test]
    fn delete_allow_all() {
        let qb = DeleteBuilder::new("order_items").allow_delete_all(true);
        assert_eq!(qb.to_sql(), "DELETE FROM order_items RETURNING *");
    }

    #[test]
    fn delete_complex_where() {
        let qb = DeleteBuilder::new("orders")
            .eq("status", "cancelled")
            .lt("opened_at", "2026-01-01");
        assert_eq!(
            qb.to_sql(),
            "DELETE FROM orders WHERE status = $1 AND opened_at < $2 RETURNING *"
        );
    }
}
