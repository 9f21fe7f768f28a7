//! Potluck Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and SQLite implementations
//! - commands: Use-case handlers
//! - http: axum routes over the commands

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

pub mod commands;
pub mod config;
pub mod domain;
pub mod http;
pub mod repository;

pub use config::ServerConfig;

use repository::{
    init_db, DbState, DishRepository, DishWishRepository, DrinkRepository, DrinkWishRepository,
    RoomRepository,
};

/// Application state shared across commands
pub struct AppState {
    pub db_state: DbState,
    pub rooms: RoomRepository,
    pub dishes: DishRepository,
    pub drinks: DrinkRepository,
    pub dish_wishes: DishWishRepository,
    pub drink_wishes: DrinkWishRepository,
    pub page_limit: u32,
}

impl AppState {
    pub fn new(db_state: DbState, page_limit: u32) -> Self {
        let conn = db_state.connection();
        Self {
            rooms: RoomRepository::new(conn.clone()),
            dishes: DishRepository::new(conn.clone()),
            drinks: DrinkRepository::new(conn.clone()),
            dish_wishes: DishWishRepository::new(conn.clone()),
            drink_wishes: DrinkWishRepository::new(conn),
            db_state,
            page_limit,
        }
    }
}

/// Open the database named in `config` and wire up the repositories
pub async fn build_state(config: &ServerConfig) -> Result<AppState, String> {
    let db_state = init_db(&config.db_path).await?;
    info!(db = %config.db_path.display(), "database ready");
    Ok(AppState::new(db_state, config.page_limit))
}

/// Serve until SIGINT/SIGTERM
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(build_state(&config).await.map_err(anyhow::Error::msg)?);
    let app = http::build_router(state.clone(), &config.cors_origins);

    let listener = TcpListener::bind(config.bind).await?;
    info!(addr = %listener.local_addr()?, "potluck listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    state.db_state.close().await;
    info!("potluck stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
