//! Intent Bridge API Library Crate
//!
//! This library contains the web-facing half of the bridge: configuration,
//! the voice-platform envelope models, the webhook handlers and routing. The
//! `api` binary is a thin wrapper around this library.

pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
