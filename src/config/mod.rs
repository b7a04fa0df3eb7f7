//! Configuration module for Markview
//!
//! This module handles user preferences: the `Settings` struct with its
//! JSON serialization, and persistence to the platform config directory.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
