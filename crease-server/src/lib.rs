//! Crease gateway server library.
//!
//! Exposed as a library so the integration tests can build the router with
//! mock collaborators; the binary entry point lives in `main.rs`.

pub mod api;
pub mod config;
pub mod server;
pub mod shutdown;
pub mod state;
