//! Single-endpoint in-memory key-value service.
//!
//! Clients POST (or send with any verb) a JSON command to `/req`:
//!
//! ```json
//! {"method":"SET","key":"test_key","value":"test_val"}
//! ```
//!
//! and receive a JSON reply describing the outcome. See [`services::kv_service`].

pub mod app;
pub mod config;
pub mod errors;
pub mod routes;
pub mod services;
pub mod state;

pub use app::build_app;
pub use config::AppConfig;
pub use state::kv::{KvStore, SharedStore};
