//! Drink Commands

use tracing::info;

use crate::domain::{
    drink_categories as offered_categories, DomainError, DomainResult, Drink, DrinkCategoryOption,
    DrinkInput,
};
use crate::repository::{EditableRepository, Repository, RoomScopedRepository};
use crate::AppState;
use super::room_cmd::require_room;
use super::{apply_sort, ListOptions};

pub async fn create_drink(state: &AppState, input: DrinkInput) -> DomainResult<Drink> {
    input.validate()?;
    require_room(state, input.room_id).await?;

    let drink = state.drinks.create(&input.into_drink(0)).await?;
    info!(room_id = drink.room_id, drink_id = drink.id, category = %drink.category, "drink registered");
    Ok(drink)
}

pub async fn list_drinks(
    state: &AppState,
    room_id: u32,
    options: ListOptions,
) -> DomainResult<Vec<Drink>> {
    let room = require_room(state, room_id).await?;
    let drinks = state.drinks.list_by_room(room_id, options.page).await?;
    Ok(apply_sort(drinks, options.sort, &room.context()))
}

pub async fn get_drink(state: &AppState, room_id: u32, id: u32) -> DomainResult<Drink> {
    require_room(state, room_id).await?;
    state
        .drinks
        .find_in_room(room_id, id)
        .await?
        .ok_or_else(|| DomainError::NotFound("Drink not found in this room".to_string()))
}

pub async fn update_drink(
    state: &AppState,
    room_id: u32,
    id: u32,
    input: DrinkInput,
) -> DomainResult<Drink> {
    input.validate()?;
    require_room(state, room_id).await?;

    let drink = DrinkInput { room_id, ..input }.into_drink(id);
    state.drinks.update(&drink).await
}

pub async fn delete_drink(state: &AppState, room_id: u32, id: u32) -> DomainResult<()> {
    require_room(state, room_id).await?;
    state.drinks.delete_in_room(room_id, id).await?;
    info!(room_id, drink_id = id, "drink removed");
    Ok(())
}

pub fn drink_categories() -> Vec<DrinkCategoryOption> {
    offered_categories()
}
