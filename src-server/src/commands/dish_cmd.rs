//! Dish Commands

use tracing::info;

use crate::domain::{meal_types as offered_meal_types, Dish, DishInput, DomainError, DomainResult, MealType};
use crate::repository::{EditableRepository, Repository, RoomScopedRepository};
use crate::AppState;
use super::room_cmd::require_room;
use super::{apply_sort, ListOptions};

pub async fn create_dish(state: &AppState, input: DishInput) -> DomainResult<Dish> {
    input.validate()?;
    require_room(state, input.room_id).await?;

    let dish = state.dishes.create(&input.into_dish(0)).await?;
    info!(room_id = dish.room_id, dish_id = dish.id, "dish registered");
    Ok(dish)
}

/// Newest first, one page, then the optional user sort over that page
pub async fn list_dishes(
    state: &AppState,
    room_id: u32,
    options: ListOptions,
) -> DomainResult<Vec<Dish>> {
    let room = require_room(state, room_id).await?;
    let dishes = state.dishes.list_by_room(room_id, options.page).await?;
    Ok(apply_sort(dishes, options.sort, &room.context()))
}

pub async fn get_dish(state: &AppState, room_id: u32, id: u32) -> DomainResult<Dish> {
    require_room(state, room_id).await?;
    state
        .dishes
        .find_in_room(room_id, id)
        .await?
        .ok_or_else(|| DomainError::NotFound("Dish not found in this room".to_string()))
}

/// Replace a dish; the room in the path wins over the body
pub async fn update_dish(
    state: &AppState,
    room_id: u32,
    id: u32,
    input: DishInput,
) -> DomainResult<Dish> {
    input.validate()?;
    require_room(state, room_id).await?;

    let dish = DishInput { room_id, ..input }.into_dish(id);
    state.dishes.update(&dish).await
}

pub async fn delete_dish(state: &AppState, room_id: u32, id: u32) -> DomainResult<()> {
    require_room(state, room_id).await?;
    state.dishes.delete_in_room(room_id, id).await?;
    info!(room_id, dish_id = id, "dish removed");
    Ok(())
}

pub fn meal_types() -> Vec<MealType> {
    offered_meal_types()
}
