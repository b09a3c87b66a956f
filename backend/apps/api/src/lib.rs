//! API Application
//!
//! Server composition shared by the `api` binary and the `manage-admin`
//! CLI: environment configuration and the top-level router.

pub mod app;
pub mod config;
pub mod pages;

pub use app::{build_router, cors_layer};
pub use config::{ApiConfig, AppEnv};

/// Default `RUST_LOG` filter for both binaries
pub const DEFAULT_LOG_FILTER: &str = "api=info,auth=info,portfolio=info,tower_http=info";
