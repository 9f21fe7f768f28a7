//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{DomainResult, Entity, RoomScoped};

/// Offset paging for room lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub skip: u32,
    /// `None` returns everything after `skip`
    #[serde(default)]
    pub limit: Option<u32>,
}

impl Page {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self {
            skip,
            limit: Some(limit),
        }
    }

    pub fn all() -> Self {
        Self::default()
    }
}

/// Core repository trait: store a new entity
///
/// Generic over any Entity type.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity; the stored copy carries its id and timestamp
    async fn create(&self, entity: &T) -> DomainResult<T>;
}

/// Extension for entities listed per room, newest first
#[async_trait]
pub trait RoomScopedRepository<T: RoomScoped>: Repository<T> {
    async fn list_by_room(&self, room_id: u32, page: Page) -> DomainResult<Vec<T>>;

    /// An entity from another room is not found
    async fn find_in_room(&self, room_id: u32, id: T::Id) -> DomainResult<Option<T>>;

    /// Delete only if the entity belongs to `room_id`
    async fn delete_in_room(&self, room_id: u32, id: T::Id) -> DomainResult<()>;
}

/// Entities whose fields can be edited after registration
#[async_trait]
pub trait EditableRepository<T: RoomScoped>: RoomScopedRepository<T> {
    /// Replace the editable fields of the entity with `entity.id()` in
    /// `entity.room_id()`; `NotFound` when it lives elsewhere
    async fn update(&self, entity: &T) -> DomainResult<T>;
}
