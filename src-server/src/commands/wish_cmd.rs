//! Wishlist Commands
//!
//! Dish wishes can only change while their room is active; drink wishes
//! only need the room to exist.

use tracing::info;

use crate::domain::{
    Dish, DishInput, DishWish, DishWishInput, DomainResult, Drink, DrinkInput,
    DrinkWish, DrinkWishInput,
};
use crate::repository::{Page, Repository, RoomScopedRepository};
use crate::AppState;
use super::room_cmd::{require_active_room, require_room};

// ========================
// Dish wishes
// ========================

pub async fn create_dish_wish(state: &AppState, input: DishWishInput) -> DomainResult<DishWish> {
    input.validate()?;
    require_active_room(state, input.room_id).await?;

    let wish = state.dish_wishes.create(&input.into_wish(0)).await?;
    info!(room_id = wish.room_id, wish_id = wish.id, "dish wish added");
    Ok(wish)
}

pub async fn list_dish_wishes(
    state: &AppState,
    room_id: u32,
    page: Page,
) -> DomainResult<Vec<DishWish>> {
    require_room(state, room_id).await?;
    state.dish_wishes.list_by_room(room_id, page).await
}

pub async fn delete_dish_wish(state: &AppState, room_id: u32, id: u32) -> DomainResult<()> {
    require_active_room(state, room_id).await?;
    state.dish_wishes.delete_in_room(room_id, id).await
}

/// Register the dish someone brings for a wish and drop the wish
pub async fn resolve_dish_wish(
    state: &AppState,
    room_id: u32,
    wish_id: u32,
    input: DishInput,
) -> DomainResult<Dish> {
    input.validate()?;
    require_active_room(state, room_id).await?;

    let dish = DishInput { room_id, ..input }.into_dish(0);
    let stored = state.dish_wishes.resolve(wish_id, &dish).await?;
    info!(room_id, wish_id, dish_id = stored.id, "dish wish resolved");
    Ok(stored)
}

// ========================
// Drink wishes
// ========================

pub async fn create_drink_wish(
    state: &AppState,
    input: DrinkWishInput,
) -> DomainResult<DrinkWish> {
    input.validate()?;
    require_room(state, input.room_id).await?;

    let wish = state.drink_wishes.create(&input.into_wish(0)).await?;
    info!(room_id = wish.room_id, wish_id = wish.id, "drink wish added");
    Ok(wish)
}

pub async fn list_drink_wishes(
    state: &AppState,
    room_id: u32,
    page: Page,
) -> DomainResult<Vec<DrinkWish>> {
    require_room(state, room_id).await?;
    state.drink_wishes.list_by_room(room_id, page).await
}

pub async fn delete_drink_wish(state: &AppState, room_id: u32, id: u32) -> DomainResult<()> {
    require_room(state, room_id).await?;
    state.drink_wishes.delete_in_room(room_id, id).await
}

pub async fn resolve_drink_wish(
    state: &AppState,
    room_id: u32,
    wish_id: u32,
    input: DrinkInput,
) -> DomainResult<Drink> {
    input.validate()?;
    require_room(state, room_id).await?;

    let drink = DrinkInput { room_id, ..input }.into_drink(0);
    let stored = state.drink_wishes.resolve(wish_id, &drink).await?;
    info!(room_id, wish_id, drink_id = stored.id, "drink wish resolved");
    Ok(stored)
}

