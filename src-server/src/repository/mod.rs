//! Repository Layer
//!
//! Data access abstractions and their SQLite implementations.

mod traits;
mod db;
mod room_repo;
mod dish_repo;
mod drink_repo;
mod wish;


pub use traits::{EditableRepository, Page, Repository, RoomScopedRepository};
pub use db::{init_db, DbState, SharedConnection};
pub use room_repo::RoomRepository;
pub use dish_repo::DishRepository;
pub use drink_repo::DrinkRepository;
pub use wish::{DishWishRepository, DrinkWishRepository};
