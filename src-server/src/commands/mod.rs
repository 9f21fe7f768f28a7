//! Commands Layer
//!
//! Use-case handlers shared by the HTTP layer and tests. Each takes the
//! application state and plain arguments and returns a `DomainResult`.

mod room_cmd;
mod dish_cmd;
mod drink_cmd;
mod wish_cmd;
mod totals_cmd;


pub use room_cmd::*;
pub use dish_cmd::*;
pub use drink_cmd::*;
pub use wish_cmd::*;
pub use totals_cmd::*;

use std::collections::HashMap;

use potluck_totals::{sorted_items, ContributedItem, RoomContext, SortMode};

use crate::domain::Entity;
use crate::repository::Page;

/// Paging and sorting for the editable lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListOptions {
    pub page: Page,
    pub sort: SortMode,
}

/// Reorder a fetched page with the room's user sort
fn apply_sort<T>(entities: Vec<T>, sort: SortMode, room: &RoomContext) -> Vec<T>
where
    T: Entity<Id = u32>,
    for<'a> &'a T: Into<ContributedItem>,
{
    if sort == SortMode::None {
        return entities;
    }

    let items: Vec<ContributedItem> = entities.iter().map(Into::into).collect();
    let order: Vec<u32> = sorted_items(&items, sort, room)
        .into_iter()
        .map(|item| item.id)
        .collect();

    let mut by_id: HashMap<u32, T> = entities.into_iter().map(|e| (e.id(), e)).collect();
    order.into_iter().filter_map(|id| by_id.remove(&id)).collect()
}
