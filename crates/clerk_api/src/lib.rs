//! HTTP shell for clerk.
//!
//! # Responsibility
//! - Expose task, note and search operations as JSON over HTTP.
//! - Keep store access off the async workers.

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use server::{serve, serve_with_shutdown, shutdown_signal, ServerConfig};
pub use state::AppState;
