//! SELECT query builder.

use crate::client::GenericClient;
use crate::error::DbResult;
use crate::qb::filter::FilterSet;
use crate::qb::param::ParamList;
use crate::qb::traits::SqlBuilder;
use tokio_postgres::types::ToSql;

/// Sort direction for [`SelectBuilder::order_by`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// SELECT query builder.
///
/// Accumulates projection, filters, a single sort key, and paging, then
/// compiles one `SELECT` statement with positional parameters bound in the
/// order the filters were added.
#[derive(Clone, Debug)]
pub struct SelectBuilder {
    table: String,
    columns: Vec<String>,
    filters: FilterSet,
    /// Single active sort key; a later `order_by` call replaces it.
    order: Option<(String, Direction)>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl SelectBuilder {
    /// Create a new SELECT query builder for a table.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: vec!["*".to_string()],
            filters: FilterSet::new(),
            order: None,
            limit: None,
            offset: None,
        }
    }

    /// Set the projection list (default is all columns).
    ///
    /// Column names are not validated at this layer; an invalid name surfaces
    /// as [`DbError::UndefinedColumn`](crate::DbError::UndefinedColumn) at
    /// execution time.
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols.iter().map(|s| s.to_string()).collect();
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

    /// Add WHERE: column LIKE pattern (case-sensitive).
    ///
    /// The pattern is caller-supplied and not inspected for wildcards.
    pub fn like<T: ToSql + Send + Sync + 'static>(mut self, column: &str, pattern: T) -> Self {
        self.filters.like(column, pattern);
        self
    }

    /// Add WHERE: column ILIKE pattern (case-insensitive)
    pub fn ilike<T: ToSql + Send + Sync + 'static>(mut self, column: &str, pattern: T) -> Self {
        self.filters.ilike(column, pattern);
        self
    }

    /// Add WHERE: column IN (values...); empty `values` matches zero rows.
    pub fn in_list<T: ToSql + Send + Sync + 'static>(mut self, column: &str, values: Vec<T>) -> Self {
        self.filters.in_list(column, values);
        self
    }

    // ==================== Ordering & paging ====================

    /// Set the sort key. Only one is ever active: the last call wins.
    pub fn order_by(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some((column.to_string(), direction));
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET, independently of LIMIT.
    pub fn offset(mut self, n: i64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Sugar for `limit(1)`.
    ///
    /// Whether zero or one row came back is still the caller's check; pair
    /// with [`fetch_opt`](SqlBuilder::fetch_opt) to distinguish them.
    pub fn single(self) -> Self {
        self.limit(1)
    }

    // ==================== COUNT ====================

    /// Execute a `COUNT(*)` with the accumulated filters, ignoring
    /// projection, ordering, and paging.
    ///
    /// Takes `&self` and compiles a fresh statement, so counting never
    /// disturbs a later terminal call on the same builder.
    pub async fn count(&self, conn: &impl GenericClient) -> DbResult<i64> {
        let mut params = ParamList::new();
        let mut sql = format!("SELECT COUNT(*) FROM {}", self.table);
        let where_sql = self.filters.build(&mut params);
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }
        let row = conn.query_one(&sql, &params.as_refs()).await?;
        Ok(row.get(0))
    }

    /// The COUNT SQL string (for tests and debugging).
    pub fn to_count_sql(&self) -> String {
        let mut params = ParamList::new();
        let mut sql = format!("SELECT COUNT(*) FROM {}", self.table);
        let where_sql = self.filters.build(&mut params);
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }
        sql
    }
}

impl SqlBuilder for SelectBuilder {
    fn build_query(&self) -> (String, ParamList) {
        let mut params = ParamList::new();

        let mut sql = format!("SELECT {} FROM {}", self.columns.join(", "), self.table);

        let where_sql = self.filters.build(&mut params);
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }

        if let Some((column, direction)) = &self.order {
            sql.push_str(&format!(" ORDER BY {} {}", column, direction.as_sql()));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        (sql, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_select() {
        let qb = SelectBuilder::new("categories");
        assert_eq!(qb.to_sql(), "SELECT * FROM categories");
    }

    #[test]
    fn select_with_columns() {
        let qb = SelectBuilder::new("menu_items").columns(&["id", "name", "price_cents"]);
        assert_eq!(qb.to_sql(), "SELECT id, name, price_cents FROM menu_items");
    }

    #[test]
    fn filters_bind_in_call_order() {
        let qb = SelectBuilder::new("orders")
            .eq("status", "open")
            .gte("total_cents", 1000i64)
            .ne("waiter_id", 3i64);
        assert_eq!(
            qb.to_sql(),
            "SELECT * FROM orders WHERE status = $1 AND total_cents >= $2 AND waiter_id != $3"
        );
        let (_, params) = qb.build_query();
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn order_by_last_call_wins() {
        let qb = SelectBuilder::new("menu_items")
            .order_by("name", Direction::Asc)
            .order_by("price_cents", Direction::Desc);
        assert_eq!(
            qb.to_sql(),
            "SELECT * FROM menu_items ORDER BY price_cents DESC"
        );
    }

    #[test]
    fn limit_and_offset_are_independent() {
        let qb = SelectBuilder::new("orders").offset(40);
        assert_eq!(qb.to_sql(), "SELECT * FROM orders OFFSET 40");

        let qb = SelectBuilder::new("orders").limit(20).offset(40);
        assert_eq!(qb.to_sql(), "SELECT * FROM orders LIMIT 20 OFFSET 40");
    }

    #[test]
    fn single_is_limit_one() {
        let qb = SelectBuilder::new("cash_sessions").eq("status", "open").single();
        assert_eq!(
            qb.to_sql(),
            "SELECT * FROM cash_sessions WHERE status = $1 LIMIT 1"
        );
    }

    #[test]
    fn in_list_preserves_value_order() {
        let qb = SelectBuilder::new("dining_tables").in_list("id", vec![4i64, 2, 9]);
        assert_eq!(qb.to_sql(), "SELECT * FROM dining_tables WHERE id IN ($1, $2, $3)");
    }

    #[test]
    fn empty_in_list_builds_valid_sql() {
        let qb = SelectBuilder::new("dining_tables").in_list::<i64>("id", vec![]);
        assert_eq!(qb.to_sql(), "SELECT * FROM dining_tables WHERE 1=0");
    }

    #[test]
    fn count_ignores_projection_order_and_paging() {
        let qb = SelectBuilder::new("orders")
            .columns(&["id"])
            .eq("status", "open")
            .order_by("opened_at", Direction::Desc)
            .limit(10)
            .offset(20);
        assert_eq!(
            qb.to_count_sql(),
            "SELECT COUNT(*) FROM orders WHERE status = $1"
        );
        // The terminal query is untouched by the count build.
        assert_eq!(
            qb.to_sql(),
            "SELECT id FROM orders WHERE status = $1 ORDER BY opened_at DESC LIMIT 10 OFFSET 20"
        );
    }

    #[test]
    fn identically_configured_builders_compile_identically() {
        let build = || {
            SelectBuilder::new("orders")
                .eq("status", "open")
                .order_by("id", Direction::Asc)
                .limit(5)
        };
        let (sql_a, params_a) = build().build_query();
        let (sql_b, params_b) = build().build_query();
        assert_eq!(sql_a, sql_b);
        assert_eq!(params_a.len(), params_b.len());
    }
}
