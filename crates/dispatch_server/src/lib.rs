//! HTTP surface for the partner dispatch pipeline.

pub mod config;
pub mod server;

pub use config::{ServerArgs, ServerConfig};
pub use server::{app_router, run_server, AppState};
