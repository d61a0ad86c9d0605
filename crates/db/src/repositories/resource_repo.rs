//! Repository contract and PostgreSQL implementation for `resources`.

use async_trait::async_trait;
use resource_core::search::{SearchSpec, SortOrder};
use resource_core::types::DbId;
use sqlx::PgPool;

use crate::models::resource::{NewResource, Resource};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, status, created_at, updated_at";

/// Shared `WHERE` clause for searches. `$1` is the name substring, `$2` the
/// status; either may be NULL to disable that predicate.
const SEARCH_FILTER: &str = "WHERE ($1::TEXT IS NULL OR strpos(name, $1) > 0)
               AND ($2::BOOL IS NULL OR status = $2)";

/// Storage operations the resource service needs.
///
/// Not-found is signalled through return values (`None`, zero affected rows),
/// never through errors. An `Err` always means the store itself failed.
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// One page of records matching `spec`, plus the total match count
    /// ignoring offset and limit.
    async fn find_matching(&self, spec: &SearchSpec) -> Result<(Vec<Resource>, i64), sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Resource>, sqlx::Error>;

    /// Insert a new record and return it with its assigned id and timestamps.
    async fn insert(&self, input: &NewResource) -> Result<Resource, sqlx::Error>;

    /// Persist every mutable field of `resource` and refresh `updated_at`.
    ///
    /// Returns `None` if the row no longer exists.
    async fn save(&self, resource: &Resource) -> Result<Option<Resource>, sqlx::Error>;

    /// Delete by id, returning the number of rows removed.
    async fn delete_by_id(&self, id: DbId) -> Result<u64, sqlx::Error>;

    /// Cheap reachability check used by the health endpoint.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// [`ResourceRepository`] backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgResourceRepo {
    pool: PgPool,
}

impl PgResourceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn order_clause(order: SortOrder) -> &'static str {
    match order {
        SortOrder::CreatedAtDesc => "created_at DESC, id DESC",
    }
}

#[async_trait]
impl ResourceRepository for PgResourceRepo {
    async fn find_matching(&self, spec: &SearchSpec) -> Result<(Vec<Resource>, i64), sqlx::Error> {
        let name = spec.filter.name_contains.as_deref();
        let status = spec.filter.status;

        let query = format!(
            "SELECT {COLUMNS} FROM resources
             {SEARCH_FILTER}
             ORDER BY {}
             LIMIT $3 OFFSET $4",
            order_clause(spec.order)
        );
        let rows = sqlx::query_as::<_, Resource>(&query)
            .bind(name)
            .bind(status)
            .bind(spec.limit)
            .bind(spec.offset)
            .fetch_all(&self.pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM resources {SEARCH_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_query)
            .bind(name)
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(rows = rows.len(), total, "Resource search executed");
        Ok((rows, total))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Resource>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM resources WHERE id = $1");
        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn insert(&self, input: &NewResource) -> Result<Resource, sqlx::Error> {
        let query = format!(
            "INSERT INTO resources (name, description, status)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.status)
            .fetch_one(&self.pool)
            .await
    }

    async fn save(&self, resource: &Resource) -> Result<Option<Resource>, sqlx::Error> {
        let query = format!(
            "UPDATE resources SET
                name = $2,
                description = $3,
                status = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(resource.id)
            .bind(&resource.name)
            .bind(&resource.description)
            .bind(resource.status)
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete_by_id(&self, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
