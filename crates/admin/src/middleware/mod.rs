//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, start transactions)
//! 2. `TraceLayer` (request tracing with status and latency)
//! 3. Security headers (`nosniff`, frame denial)
//! 4. Session layer (tower-sessions with in-memory store, flash messages)
//!
//! Sentry layers are added in `main.rs` so tests can build the router
//! without a Sentry hub.

pub mod session;

pub use session::{SESSION_COOKIE_NAME, create_session_layer};
