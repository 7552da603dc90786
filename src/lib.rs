//! Court Clock - A basketball game clock and shot clock server
//!
//! This library provides drift-free countdown timers for the game clock and the
//! shot clock, an expiry buzzer, and per-quarter foul and timeout bookkeeping.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
