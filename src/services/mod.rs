//! External collaborator module
//!
//! This module contains the buzzer that turns clock expirations into sound.

pub mod buzzer;

// Re-export main types
pub use buzzer::*;
