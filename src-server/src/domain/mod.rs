//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer does no I/O; totals are delegated to `potluck_totals`.

mod entity;
mod room;
mod dish;
mod drink;
mod wish;

pub use entity::{Entity, RoomScoped, DomainError, DomainResult};
pub use room::{Room, RoomStatus, RoomSettings, MealPlan, SEED_LENGTH, SEED_ALPHABET};
pub use dish::{Dish, DishInput, MealType, MEAL_TYPES, meal_types};
pub use drink::{Drink, DrinkInput, DrinkCategory, DrinkCategoryOption, drink_categories};
pub use wish::{DishWish, DishWishInput, DrinkWish, DrinkWishInput};
