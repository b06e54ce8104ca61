//! Cross-builder tests for the qb module.

use crate::qb::{delete, insert, select, update, Direction, SqlBuilder};

#[test]
fn select_entry_fn() {
    let qb = select("categories").eq("id", 1i64);
    assert_eq!(qb.to_sql(), "SELECT * FROM categories WHERE id = $1");
}

#[test]
fn placeholder_indices_match_filter_call_order() {
    // N filters, then a terminal build: $k binds the k-th filter's value.
    let qb = select("orders")
        .eq("status", "open")
        .gt("total_cents", 100i64)
        .lte("guest_count", 6i32)
        .in_list("waiter_id", vec![1i64, 2])
        .like("note", "%birthday%");

    let (sql, params) = qb.build_query();
    assert_eq!(
        sql,
        "SELECT * FROM orders WHERE status = $1 AND total_cents > $2 \
         AND guest_count <= $3 AND waiter_id IN ($4, $5) AND note LIKE $6"
    );
    assert_eq!(params.len(), 6);
}

#[test]
fn zero_filters_is_a_bare_select() {
    let (sql, params) = select("categories").build_query();
    assert_eq!(sql, "SELECT * FROM categories");
    assert!(params.is_empty());
}

#[test]
fn update_concatenates_set_then_where_params() {
    // update({a, b}) after filter eq(id): bound params must be [a, b, id]
    // and WHERE indices continue after SET.
    let qb = update("categories")
        .set("name", "Beverages")
        .set("sort_order", 2i32)
        .eq("id", 7i64);

    let (sql, params) = qb.build_query();
    assert_eq!(
        sql,
        "UPDATE categories SET name = $1, sort_order = $2 WHERE id = $3 RETURNING *"
    );
    assert_eq!(params.len(), 3);
}

#[test]
fn insert_returns_inserted_row_by_default() {
    let qb = insert("categories").set("name", "Drinks");
    assert!(qb.to_sql().ends_with("RETURNING *"));
}

#[test]
fn delete_composes_where_and_returning() {
    let qb = delete("categories").eq("id", 7i64);
    assert_eq!(qb.to_sql(), "DELETE FROM categories WHERE id = $1 RETURNING *");
}

#[test]
fn binds_timestamp_and_uuid_params() {
    let since = chrono::Utc::now() - chrono::Duration::hours(8);
    let device = uuid::Uuid::new_v4();

    let qb = select("cash_sessions")
        .eq("device_id", device)
        .gte("opened_at", since);
    let (sql, params) = qb.build_query();
    assert_eq!(
        sql,
        "SELECT * FROM cash_sessions WHERE device_id = $1 AND opened_at >= $2"
    );
    assert_eq!(params.len(), 2);
}

#[test]
fn full_read_clause_order() {
    // WHERE, ORDER BY, LIMIT, OFFSET compose in that order.
    let qb = select("menu_items")
        .columns(&["id", "name"])
        .eq("category_id", 3i64)
        .order_by("name", Direction::Asc)
        .limit(25)
        .offset(50);
    assert_eq!(
        qb.to_sql(),
        "SELECT id, name FROM menu_items WHERE category_id = $1 \
         ORDER BY name ASC LIMIT 25 OFFSET 50"
    );
}
