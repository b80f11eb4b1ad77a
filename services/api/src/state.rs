//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds all shared,
//! clonable resources like the intent bridge and the loaded configuration.

use crate::config::Config;
use intent_bridge_core::bridge::IntentBridge;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub bridge: Arc<IntentBridge>,
    pub config: Arc<Config>,
}
