//! Resource entity model, insert DTO and public view.

use resource_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `resources` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Resource {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub status: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields supplied when inserting a resource. Ids and timestamps are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResource {
    pub name: String,
    pub description: Option<String>,
    pub status: bool,
}

/// Externally visible projection of a [`Resource`]. Timestamps are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceView {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub status: bool,
}

impl From<&Resource> for ResourceView {
    fn from(resource: &Resource) -> Self {
        Self {
            id: resource.id,
            name: resource.name.clone(),
            description: resource.description.clone(),
            status: resource.status,
        }
    }
}

impl From<Resource> for ResourceView {
    fn from(resource: Resource) -> Self {
        Self {
            id: resource.id,
            name: resource.name,
            description: resource.description,
            status: resource.status,
        }
    }
}

/// Map rows to views, preserving order.
pub fn to_views(resources: Vec<Resource>) -> Vec<ResourceView> {
    resources.into_iter().map(ResourceView::from).collect()
}
