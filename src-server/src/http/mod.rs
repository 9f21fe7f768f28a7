//! HTTP Layer
//!
//! axum router over the commands layer. JSON in, JSON out; failures are
//! `{"detail": ...}` with a status derived from the domain error.

mod error;
mod extract;
pub mod handlers;

pub use extract::{ApiJson, ApiPath, ApiQuery};

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::AppState;
use handlers::*;

pub fn build_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/rooms", post(create_room_handler))
        .route("/rooms/{seed}", get(get_room_handler))
        .route("/rooms/{seed}/status", get(room_status_handler))
        .route("/rooms/{seed}/activate", put(activate_room_handler))
        .route("/meal-types", get(meal_types_handler))
        .route("/drink-categories", get(drink_categories_handler))
        .route("/dishes", post(create_dish_handler))
        .route("/dishes/{room_id}", get(list_dishes_handler))
        .route(
            "/dishes/{room_id}/{id}",
            get(get_dish_handler)
                .put(update_dish_handler)
                .delete(delete_dish_handler),
        )
        .route("/drinks", post(create_drink_handler))
        .route("/drinks/{room_id}", get(list_drinks_handler))
        .route(
            "/drinks/{room_id}/{id}",
            get(get_drink_handler)
                .put(update_drink_handler)
                .delete(delete_drink_handler),
        )
        .route("/wishlist", post(create_dish_wish_handler))
        .route("/wishlist/{room_id}", get(list_dish_wishes_handler))
        .route("/wishlist/{room_id}/{id}", delete(delete_dish_wish_handler))
        .route("/wishlist/{room_id}/{id}/resolve", post(resolve_dish_wish_handler))
        .route("/drink-wishlist", post(create_drink_wish_handler))
        .route("/drink-wishlist/{room_id}", get(list_drink_wishes_handler))
        .route("/drink-wishlist/{room_id}/{id}", delete(delete_drink_wish_handler))
        .route(
            "/drink-wishlist/{room_id}/{id}/resolve",
            post(resolve_drink_wish_handler),
        )
        .route("/totals/{room_id}/dishes", get(dish_totals_handler))
        .route("/totals/{room_id}/drinks", get(drink_totals_handler));

    Router::new()
        .route("/", get(root_handler))
        .route("/healthz", get(healthz_handler))
        .nest("/api", api)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Allow the listed origins, or any origin when the list is empty
fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "skipping unusable CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(allowed)
}
