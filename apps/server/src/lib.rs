//! # Minimart Server
//!
//! HTTP JSON API for the Minimart point-of-sale backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Minimart Server                                 │
//! │                                                                         │
//! │  POS terminal ───► axum routes ───► repositories ───► SQLite            │
//! │  dashboard          │                                                   │
//! │                     └──► minimart-core (validation, id generation)      │
//! │                                                                         │
//! │  Port: 5000 (PORT env)                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Request/response only: no sessions, no background tasks, no retries. A
//! failed write surfaces to the caller on the first attempt.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::router;
pub use state::AppState;
