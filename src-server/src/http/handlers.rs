//! Route handlers: extract, call the command, wrap the result as JSON.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use potluck_totals::SortMode;
use serde::Deserialize;
use serde_json::{json, Value};

use super::extract::{ApiJson, ApiPath, ApiQuery};
use crate::commands::{self, ListOptions, RoomStatusView, TotalsView};
use crate::domain::{
    Dish, DishInput, DishWish, DishWishInput, DomainError, DomainResult, Drink, DrinkCategoryOption,
    DrinkInput, DrinkWish, DrinkWishInput, MealType, Room, RoomSettings,
};
use crate::repository::Page;
use crate::AppState;

type ApiResult<T> = Result<Json<T>, DomainError>;
type AppStateRef = State<Arc<AppState>>;

/// `?skip=&limit=&sort=` on list routes
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub sort: Option<String>,
}

impl ListQuery {
    fn page(&self, default_limit: u32) -> Page {
        Page::new(self.skip.unwrap_or(0), self.limit.unwrap_or(default_limit))
    }

    fn options(&self, default_limit: u32) -> DomainResult<ListOptions> {
        let sort = match self.sort.as_deref() {
            None | Some("") => SortMode::None,
            Some(raw) => raw.parse::<SortMode>().map_err(DomainError::InvalidInput)?,
        };
        Ok(ListOptions {
            page: self.page(default_limit),
            sort,
        })
    }
}

fn deleted(what: &str) -> Json<Value> {
    Json(json!({ "message": format!("{} deleted successfully", what) }))
}

pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Potluck API" }))
}

pub async fn healthz_handler(State(state): AppStateRef) -> Json<Value> {
    let db = if state.db_state.is_initialized().await {
        "up"
    } else {
        "down"
    };
    Json(json!({ "status": "ok", "database": db }))
}

// ========================
// Rooms
// ========================

pub async fn create_room_handler(State(state): AppStateRef) -> ApiResult<Room> {
    commands::create_room(&state).await.map(Json)
}

pub async fn get_room_handler(
    State(state): AppStateRef,
    ApiPath(seed): ApiPath<String>,
) -> ApiResult<Room> {
    commands::get_room(&state, &seed).await.map(Json)
}

pub async fn room_status_handler(
    State(state): AppStateRef,
    ApiPath(seed): ApiPath<String>,
) -> ApiResult<RoomStatusView> {
    commands::get_room_status(&state, &seed).await.map(Json)
}

pub async fn activate_room_handler(
    State(state): AppStateRef,
    ApiPath(seed): ApiPath<String>,
    ApiJson(settings): ApiJson<RoomSettings>,
) -> ApiResult<Room> {
    commands::activate_room(&state, &seed, settings).await.map(Json)
}

// ========================
// Reference data
// ========================

pub async fn meal_types_handler() -> Json<Vec<MealType>> {
    Json(commands::meal_types())
}

pub async fn drink_categories_handler() -> Json<Vec<DrinkCategoryOption>> {
    Json(commands::drink_categories())
}

// ========================
// Dishes
// ========================

pub async fn create_dish_handler(
    State(state): AppStateRef,
    ApiJson(input): ApiJson<DishInput>,
) -> ApiResult<Dish> {
    commands::create_dish(&state, input).await.map(Json)
}

pub async fn list_dishes_handler(
    State(state): AppStateRef,
    ApiPath(room_id): ApiPath<u32>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<Vec<Dish>> {
    let options = query.options(state.page_limit)?;
    commands::list_dishes(&state, room_id, options).await.map(Json)
}

pub async fn get_dish_handler(
    State(state): AppStateRef,
    ApiPath((room_id, id)): ApiPath<(u32, u32)>,
) -> ApiResult<Dish> {
    commands::get_dish(&state, room_id, id).await.map(Json)
}

pub async fn update_dish_handler(
    State(state): AppStateRef,
    ApiPath((room_id, id)): ApiPath<(u32, u32)>,
    ApiJson(input): ApiJson<DishInput>,
) -> ApiResult<Dish> {
    commands::update_dish(&state, room_id, id, input).await.map(Json)
}

pub async fn delete_dish_handler(
    State(state): AppStateRef,
    ApiPath((room_id, id)): ApiPath<(u32, u32)>,
) -> ApiResult<Value> {
    commands::delete_dish(&state, room_id, id).await?;
    Ok(deleted("Dish"))
}

// ========================
// Drinks
// ========================

pub async fn create_drink_handler(
    State(state): AppStateRef,
    ApiJson(input): ApiJson<DrinkInput>,
) -> ApiResult<Drink> {
    commands::create_drink(&state, input).await.map(Json)
}

pub async fn list_drinks_handler(
    State(state): AppStateRef,
    ApiPath(room_id): ApiPath<u32>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<Vec<Drink>> {
    let options = query.options(state.page_limit)?;
    commands::list_drinks(&state, room_id, options).await.map(Json)
}

pub async fn get_drink_handler(
    State(state): AppStateRef,
    ApiPath((room_id, id)): ApiPath<(u32, u32)>,
) -> ApiResult<Drink> {
    commands::get_drink(&state, room_id, id).await.map(Json)
}

pub async fn update_drink_handler(
    State(state): AppStateRef,
    ApiPath((room_id, id)): ApiPath<(u32, u32)>,
    ApiJson(input): ApiJson<DrinkInput>,
) -> ApiResult<Drink> {
    commands::update_drink(&state, room_id, id, input).await.map(Json)
}

pub async fn delete_drink_handler(
    State(state): AppStateRef,
    ApiPath((room_id, id)): ApiPath<(u32, u32)>,
) -> ApiResult<Value> {
    commands::delete_drink(&state, room_id, id).await?;
    Ok(deleted("Drink"))
}

// ========================
// Wishlists
// ========================

pub async fn create_dish_wish_handler(
    State(state): AppStateRef,
    ApiJson(input): ApiJson<DishWishInput>,
) -> ApiResult<DishWish> {
    commands::create_dish_wish(&state, input).await.map(Json)
}

pub async fn list_dish_wishes_handler(
    State(state): AppStateRef,
    ApiPath(room_id): ApiPath<u32>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<Vec<DishWish>> {
    let page = query.page(state.page_limit);
    commands::list_dish_wishes(&state, room_id, page).await.map(Json)
}

pub async fn delete_dish_wish_handler(
    State(state): AppStateRef,
    ApiPath((room_id, id)): ApiPath<(u32, u32)>,
) -> ApiResult<Value> {
    commands::delete_dish_wish(&state, room_id, id).await?;
    Ok(deleted("Wishlist item"))
}

pub async fn resolve_dish_wish_handler(
    State(state): AppStateRef,
    ApiPath((room_id, id)): ApiPath<(u32, u32)>,
    ApiJson(input): ApiJson<DishInput>,
) -> ApiResult<Dish> {
    commands::resolve_dish_wish(&state, room_id, id, input).await.map(Json)
}

pub async fn create_drink_wish_handler(
    State(state): AppStateRef,
    ApiJson(input): ApiJson<DrinkWishInput>,
) -> ApiResult<DrinkWish> {
    commands::create_drink_wish(&state, input).await.map(Json)
}

pub async fn list_drink_wishes_handler(
    State(state): AppStateRef,
    ApiPath(room_id): ApiPath<u32>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<Vec<DrinkWish>> {
    let page = query.page(state.page_limit);
    commands::list_drink_wishes(&state, room_id, page).await.map(Json)
}

pub async fn delete_drink_wish_handler(
    State(state): AppStateRef,
    ApiPath((room_id, id)): ApiPath<(u32, u32)>,
) -> ApiResult<Value> {
    commands::delete_drink_wish(&state, room_id, id).await?;
    Ok(deleted("Drink wish"))
}

pub async fn resolve_drink_wish_handler(
    State(state): AppStateRef,
    ApiPath((room_id, id)): ApiPath<(u32, u32)>,
    ApiJson(input): ApiJson<DrinkInput>,
) -> ApiResult<Drink> {
    commands::resolve_drink_wish(&state, room_id, id, input).await.map(Json)
}

// ========================
// Totals
// ========================

pub async fn dish_totals_handler(
    State(state): AppStateRef,
    ApiPath(room_id): ApiPath<u32>,
) -> ApiResult<TotalsView> {
    commands::dish_totals(&state, room_id).await.map(Json)
}

pub async fn drink_totals_handler(
    State(state): AppStateRef,
    ApiPath(room_id): ApiPath<u32>,
) -> ApiResult<TotalsView> {
    commands::drink_totals(&state, room_id).await.map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let options = ListQuery::default().options(100).unwrap();
        assert_eq!(options.page, Page::new(0, 100));
        assert_eq!(options.sort, SortMode::None);
    }

    #[test]
    fn test_list_query_sort_parsing() {
        let query = ListQuery {
            skip: Some(10),
            limit: Some(5),
            sort: Some("quantity_descending".to_string()),
        };
        let options = query.options(100).unwrap();
        assert_eq!(options.page, Page::new(10, 5));
        assert_eq!(options.sort, SortMode::QuantityDescending);

        let bad = ListQuery {
            sort: Some("by_mood".to_string()),
            ..ListQuery::default()
        };
        assert!(matches!(bad.options(100), Err(DomainError::InvalidInput(_))));
    }
}
