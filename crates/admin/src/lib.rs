//! Catalog Admin library.
//!
//! Server-rendered product administration over a remote catalog API. The
//! binary in `main.rs` wires configuration, tracing, and Sentry around the
//! router built by [`routes::app`]; integration tests drive the same router
//! in-process.
//!
//! Nothing is stored locally. Every page reads the catalog afresh and every
//! change is sent straight to it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod flash;
pub mod forms;
pub mod middleware;
pub mod routes;
pub mod state;
