//! Repository for the `tags` table and its junction tables.

use furnicraft_core::catalog::{TAG_STATUS_ACTIVE, TAG_STATUS_ARCHIVED};
use furnicraft_core::types::DbId;
use sqlx::PgPool;

use crate::models::tag::{CreateTag, Tag, TagInfo, TagListParams, TaggedEntity, UpdateTag};

/// Column list for `tags` queries.
const TAG_COLUMNS: &str = "id, name, slug, color, status, created_at, updated_at";

/// Provides CRUD operations for tags and entity-tag associations.
pub struct TagRepo;

impl TagRepo {
    // -----------------------------------------------------------------------
    // Tag CRUD
    // -----------------------------------------------------------------------

    /// Insert a new tag, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTag) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (name, slug, color) \
             VALUES ($1, $2, $3) \
             RETURNING {TAG_COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    /// Find a tag by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {TAG_COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tags alphabetically. Archived tags are hidden unless requested.
    pub async fn list(pool: &PgPool, params: &TagListParams) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!(
            "SELECT {TAG_COLUMNS} FROM tags \
             WHERE ($1 OR status = $2) \
             ORDER BY name"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(params.include_archived)
            .bind(TAG_STATUS_ACTIVE)
            .fetch_all(pool)
            .await
    }

    /// Update a tag. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no tag with the given ID exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTag,
    ) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!(
            "UPDATE tags SET \
                 name = COALESCE($2, name), \
                 slug = COALESCE($3, slug), \
                 color = COALESCE($4, color), \
                 status = COALESCE($5, status) \
             WHERE id = $1 \
             RETURNING {TAG_COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.color)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Archive a tag. Existing associations are kept.
    ///
    /// Returns `true` if an active tag was archived.
    pub async fn archive(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE tags SET status = $2 WHERE id = $1 AND status <> $2")
            .bind(id)
            .bind(TAG_STATUS_ARCHIVED)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Entity-tag associations
    // -----------------------------------------------------------------------

    /// List all tags attached to an entity.
    pub async fn for_entity(
        pool: &PgPool,
        entity: TaggedEntity,
        entity_id: DbId,
    ) -> Result<Vec<TagInfo>, sqlx::Error> {
        let query = format!(
            "SELECT t.id, t.name, t.slug, t.color \
             FROM {table} et \
             JOIN tags t ON t.id = et.tag_id \
             WHERE et.{column} = $1 \
             ORDER BY t.name",
            table = entity.table(),
            column = entity.column(),
        );
        sqlx::query_as::<_, TagInfo>(&query)
            .bind(entity_id)
            .fetch_all(pool)
            .await
    }

    /// IDs in `tag_ids` that match no tag row, deduplicated and sorted.
    pub async fn missing_ids(pool: &PgPool, tag_ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT DISTINCT req.id FROM UNNEST($1::uuid[]) AS req(id) \
             WHERE NOT EXISTS (SELECT 1 FROM tags t WHERE t.id = req.id) \
             ORDER BY req.id",
        )
        .bind(tag_ids)
        .fetch_all(pool)
        .await
    }

    /// Replace all tags of an entity with `tag_ids` in one transaction.
    ///
    /// Unknown tag IDs fail the whole call with a foreign-key violation.
    pub async fn replace_for_entity(
        pool: &PgPool,
        entity: TaggedEntity,
        entity_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let delete = format!(
            "DELETE FROM {table} WHERE {column} = $1",
            table = entity.table(),
            column = entity.column(),
        );
        sqlx::query(&delete)
            .bind(entity_id)
            .execute(&mut *tx)
            .await?;

        let insert = format!(
            "INSERT INTO {table} ({column}, tag_id) \
             SELECT $1, tag_id FROM UNNEST($2::uuid[]) AS tag_id \
             ON CONFLICT DO NOTHING",
            table = entity.table(),
            column = entity.column(),
        );
        sqlx::query(&insert)
            .bind(entity_id)
            .bind(tag_ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
