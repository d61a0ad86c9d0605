//! CRUD orchestration for resources.
//!
//! Handlers validate raw input, then call into [`ResourceService`], which
//! talks to the repository, applies defaults and partial-update rules, and
//! raises domain errors. Nothing here formats HTTP bodies.

use std::sync::Arc;

use resource_core::error::CoreError;
use resource_core::resource::{CreateResource, UpdateResource, DEFAULT_STATUS, ENTITY};
use resource_core::search::{build_search_spec, PageResult, SearchResource};
use resource_core::types::DbId;
use resource_db::models::resource::{to_views, NewResource, Resource, ResourceView};
use resource_db::repositories::ResourceRepository;

use crate::error::AppResult;

/// Resource operations over any [`ResourceRepository`].
///
/// Cloning is cheap; clones share the repository.
#[derive(Clone)]
pub struct ResourceService {
    repo: Arc<dyn ResourceRepository>,
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: ENTITY, id }
}

/// Overwrite the fields present in `update`, leaving the rest untouched.
pub fn apply_update(resource: &mut Resource, update: UpdateResource) {
    if let Some(name) = update.name {
        resource.name = name;
    }
    if let Some(description) = update.description {
        resource.description = description;
    }
    if let Some(status) = update.status {
        resource.status = status;
    }
}

impl ResourceService {
    pub fn new(repo: Arc<dyn ResourceRepository>) -> Self {
        Self { repo }
    }

    /// One page of resources matching the request. Empty pages are not errors.
    pub async fn search(&self, request: &SearchResource) -> AppResult<PageResult<ResourceView>> {
        let spec = build_search_spec(request);
        let (rows, total) = self.repo.find_matching(&spec).await?;
        tracing::debug!(
            page = request.page,
            limit = request.limit,
            returned = rows.len(),
            total,
            "Searched resources"
        );
        Ok(PageResult::new(to_views(rows), request, total))
    }

    pub async fn get_by_id(&self, id: DbId) -> AppResult<ResourceView> {
        let resource = self.repo.find_by_id(id).await?.ok_or(not_found(id))?;
        Ok(resource.into())
    }

    /// Persist a new resource. `status` defaults to `true` when omitted.
    pub async fn create(&self, request: CreateResource) -> AppResult<ResourceView> {
        let input = NewResource {
            name: request.name,
            description: request.description,
            status: request.status.unwrap_or(DEFAULT_STATUS),
        };
        let resource = self.repo.insert(&input).await?;
        tracing::info!(resource_id = resource.id, "Resource created");
        Ok(resource.into())
    }

    /// Load, merge the present fields, save.
    ///
    /// There is no lock between the load and the save; a concurrent delete in
    /// that window surfaces as not-found.
    pub async fn update(&self, id: DbId, request: UpdateResource) -> AppResult<ResourceView> {
        let mut resource = self.repo.find_by_id(id).await?.ok_or(not_found(id))?;
        apply_update(&mut resource, request);
        let saved = self.repo.save(&resource).await?.ok_or(not_found(id))?;
        tracing::info!(resource_id = id, "Resource updated");
        Ok(saved.into())
    }

    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        let affected = self.repo.delete_by_id(id).await?;
        if affected == 0 {
            return Err(not_found(id).into());
        }
        tracing::info!(resource_id = id, "Resource deleted");
        Ok(())
    }

    /// Whether the backing store answers.
    pub async fn is_healthy(&self) -> bool {
        self.repo.ping().await.is_ok()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
