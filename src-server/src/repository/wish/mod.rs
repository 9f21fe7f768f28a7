//! Wishlist Repository Module
//!
//! - dish_wish_repo: dish wishes and resolving them into dishes
//! - drink_wish_repo: drink wishes and resolving them into drinks

mod dish_wish_repo;
mod drink_wish_repo;

pub use dish_wish_repo::DishWishRepository;
pub use drink_wish_repo::DrinkWishRepository;
