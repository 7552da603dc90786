//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod buzzer;
pub mod clock_ticker;

// Re-export main functions
pub use buzzer::buzzer_task;
pub use clock_ticker::clock_ticker_task;
