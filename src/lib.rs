//! Browser front-end for the personal finance tracker: sign-in, transaction
//! and category management, CSV import and read-only analytics over the
//! finance backend's HTTP API.

pub mod api;
pub mod app;
pub mod auth;
pub mod components;
pub mod config;
pub mod error;
pub mod format;
pub mod insights;
pub mod models;
pub mod pages;
pub mod routes;
pub mod session;
pub mod storage;
pub mod tasks;
pub mod workflow;

pub use app::App;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Installs the browser console subscriber once and logs startup.
pub fn init() {
    INIT_TRACING.call_once(|| {
        #[cfg(target_arch = "wasm32")]
        tracing_wasm::set_as_global_default();
        tracing::info!("finance tracker front-end starting");
    });
}
