//! Compile-only tests for core API patterns.
//!
//! These tests verify that key API surfaces compile correctly.
//! They do NOT execute against a database — they only check types and signatures.

#![allow(dead_code)]

use tilldb::{
    Database, DbConfig, DbError, DbResult, Direction, FromRow, GenericClient, MutationBuilder,
    RowExt, SqlBuilder, TxConn, delete, insert, query, select, update,
};
use tokio_postgres::Row;

// ── Row mapping ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Category {
    id: i64,
    name: String,
    sort_order: i32,
}

impl FromRow for Category {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            name: row.try_get_column("name")?,
            sort_order: row.try_get_column("sort_order")?,
        })
    }
}

#[derive(Debug, Clone)]
struct Order {
    id: i64,
    table_id: Option<i64>,
    status: String,
    total_cents: i64,
}

impl FromRow for Order {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            table_id: row.try_get_column("table_id")?,
            status: row.try_get_column("status")?,
            total_cents: row.try_get_column("total_cents")?,
        })
    }
}

// ── Compile checks ──────────────────────────────────────────────────────────

#[test]
fn compile_config() {
    let config = DbConfig::default();
    let _ = config.to_pg_config();
    let _ = || DbConfig::from_env();
}

#[test]
fn compile_database_handle() {
    let _ = || -> DbResult<()> {
        let db = Database::connect(&DbConfig::default())?;
        let _cloned = db.clone();
        let _status = db.status();
        db.close();
        Ok(())
    };
}

async fn _database_async_surface(db: &Database) -> DbResult<()> {
    db.health_check().await?;
    let client = db.client().await?;
    let _rows: Vec<Category> = select("categories").fetch_all(&client).await?;
    Ok(())
}

#[test]
fn compile_select_chain() {
    let qb = select("menu_items")
        .columns(&["id", "name", "price_cents"])
        .eq("category_id", 3_i64)
        .ne("status", "retired")
        .gt("price_cents", 0_i64)
        .gte("price_cents", 100_i64)
        .lt("price_cents", 10_000_i64)
        .lte("price_cents", 9_999_i64)
        .like("name", "%latte%")
        .ilike("name", "%LATTE%")
        .in_list("id", vec![1_i64, 2, 3])
        .order_by("name", Direction::Asc)
        .limit(20)
        .offset(40);
    let (_sql, _params) = qb.build_query();
}

#[test]
fn compile_mutation_chains() {
    let _ = insert("categories")
        .set("name", "Drinks")
        .set_opt("sort_order", Some(1_i32))
        .set_opt("icon", None::<String>)
        .returning(&["id", "name"])
        .to_sql();

    let _ = update("orders")
        .set("status", "paid")
        .set_opt("closed_by", Some(7_i64))
        .eq("id", 42_i64)
        .to_sql();

    let _ = delete("order_items")
        .eq("order_id", 42_i64)
        .in_list("id", vec![1_i64, 2])
        .to_sql();
}

#[test]
fn compile_set_json() {
    #[derive(serde::Serialize)]
    struct Modifiers {
        extra_shot: bool,
        milk: String,
    }

    let _ = || -> serde_json::Result<String> {
        let qb = insert("order_items")
            .set("order_id", 1_i64)
            .set_json(
                "modifiers",
                &Modifiers {
                    extra_shot: true,
                    milk: "oat".into(),
                },
            )?;
        Ok(qb.to_sql())
    };
}

// Terminal methods accept any GenericClient impl, including TxConn and
// borrowed clients.
async fn _terminal_methods<C: GenericClient>(conn: &C) -> DbResult<()> {
    let _all: Vec<Category> = select("categories").fetch_all(conn).await?;
    let _one: Category = select("categories").eq("id", 1_i64).fetch_one(conn).await?;
    let _opt: Option<Category> = select("categories")
        .eq("id", 1_i64)
        .single()
        .fetch_opt(conn)
        .await?;
    let _rows = select("categories").query_rows(conn).await?;
    let _n: i64 = select("categories").eq("sort_order", 1_i32).count(conn).await?;

    let _inserted: Category = insert("categories")
        .set("name", "Drinks")
        .fetch_one(conn)
        .await?;
    let _affected: u64 = update("categories")
        .set("name", "Beverages")
        .eq("id", 1_i64)
        .execute(conn)
        .await?;
    let _deleted: Vec<Category> = delete("categories").eq("id", 1_i64).fetch_all(conn).await?;
    Ok(())
}

async fn _transaction_closure(db: &Database) -> DbResult<Order> {
    db.transaction(|tx| async move {
        let order: Order = insert("orders")
            .set("status", "open")
            .set("total_cents", 0_i64)
            .fetch_one(&tx)
            .await?;
        helper(&tx, order.id).await?;
        Ok(order)
    })
    .await
}

// TxConn clones thread through helper calls.
async fn helper(tx: &TxConn, order_id: i64) -> DbResult<u64> {
    update("dining_tables")
        .set("status", "occupied")
        .eq("current_order_id", order_id)
        .execute(tx)
        .await
}

async fn _raw_query<C: GenericClient>(conn: &C) -> DbResult<()> {
    let _report: Vec<Row> = query(
        "SELECT category_id, SUM(total_cents) FROM orders WHERE opened_at >= $1 GROUP BY 1",
    )
    .bind("2026-01-01")
    .query_rows(conn)
    .await?;

    let _one: Order = query("SELECT * FROM orders WHERE id = $1")
        .bind(42_i64)
        .fetch_one(conn)
        .await?;
    Ok(())
}

#[test]
fn compile_error_matching() {
    let classify = |err: DbError| match err {
        DbError::DuplicateKey(_) => "retry with different name",
        DbError::ForeignKeyViolation(_) => "parent row missing",
        DbError::NotFound(_) => "no such row",
        _ => "other",
    };
    let _ = classify(DbError::not_found("categories"));
    assert_eq!(DbError::not_found("categories").kind().as_str(), "not_found");
}
