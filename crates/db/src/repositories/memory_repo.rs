//! In-process [`ResourceRepository`] used when no database is configured and
//! by the test suites.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use resource_core::search::{SearchSpec, SortOrder};
use resource_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::resource::{NewResource, Resource};
use crate::repositories::ResourceRepository;

#[derive(Debug, Default)]
struct Store {
    /// Last id handed out. Ids are never reused, even after deletes.
    last_id: DbId,
    rows: BTreeMap<DbId, Resource>,
}

/// Thread-safe in-memory store with `Arc<RwLock<...>>` interior.
///
/// Cloning shares the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResourceRepo {
    store: Arc<RwLock<Store>>,
}

impl InMemoryResourceRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.store.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn sort_rows(rows: &mut [&Resource], order: SortOrder) {
    match order {
        SortOrder::CreatedAtDesc => {
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        }
    }
}

#[async_trait]
impl ResourceRepository for InMemoryResourceRepo {
    async fn find_matching(&self, spec: &SearchSpec) -> Result<(Vec<Resource>, i64), sqlx::Error> {
        let store = self.store.read().await;

        let mut matching: Vec<&Resource> = store
            .rows
            .values()
            .filter(|row| spec.filter.matches(&row.name, row.status))
            .collect();
        sort_rows(&mut matching, spec.order);

        let total = matching.len() as i64;
        let offset = usize::try_from(spec.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(spec.limit).unwrap_or(0);
        let page = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Resource>, sqlx::Error> {
        Ok(self.store.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, input: &NewResource) -> Result<Resource, sqlx::Error> {
        let mut store = self.store.write().await;
        store.last_id += 1;
        let now = Utc::now();
        let resource = Resource {
            id: store.last_id,
            name: input.name.clone(),
            description: input.description.clone(),
            status: input.status,
            created_at: now,
            updated_at: now,
        };
        store.rows.insert(resource.id, resource.clone());
        Ok(resource)
    }

    async fn save(&self, resource: &Resource) -> Result<Option<Resource>, sqlx::Error> {
        let mut store = self.store.write().await;
        let Some(existing) = store.rows.get_mut(&resource.id) else {
            return Ok(None);
        };
        existing.name = resource.name.clone();
        existing.description = resource.description.clone();
        existing.status = resource.status;
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn delete_by_id(&self, id: DbId) -> Result<u64, sqlx::Error> {
        let removed = self.store.write().await.rows.remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
