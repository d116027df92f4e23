//! Web layer for the rail map server.
//!
//! Provides the dataset endpoints and serves the static map client.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
