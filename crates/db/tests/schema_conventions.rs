//! Schema-wide conventions every migration must follow.

use sqlx::PgPool;

/// Every entity `id` column is a UUID.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_uuid(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name::text, data_type::text
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(data_type, "uuid", "Table {table}.id should be uuid");
    }
}

/// Every entity table has an `updated_at` trigger.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_entity_tables_have_updated_at_trigger(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name::text
         FROM information_schema.columns
         WHERE column_name = 'updated_at'
           AND table_schema = 'public'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        let trigger: Option<(String,)> = sqlx::query_as(
            "SELECT trigger_name::text
             FROM information_schema.triggers
             WHERE event_object_table::text = $1::text
               AND trigger_name::text = 'trg_' || $1::text || '_updated_at'",
        )
        .bind(table)
        .fetch_optional(&pool)
        .await
        .unwrap();
        assert!(trigger.is_some(), "Table {table} is missing its updated_at trigger");
    }
}

/// Unique constraints are prefixed `uq_` so the API can map violations to 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_constraints_use_uq_prefix(pool: PgPool) {
    let names: Vec<(String,)> = sqlx::query_as(
        "SELECT constraint_name::text
         FROM information_schema.table_constraints
         WHERE constraint_type = 'UNIQUE'
           AND table_schema = 'public'",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!names.is_empty());
    for (name,) in &names {
        assert!(name.starts_with("uq_"), "Unique constraint {name} lacks uq_ prefix");
    }
}
