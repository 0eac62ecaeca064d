//! Shared utilities for statbot
//!
//! This crate provides common functionality used across the statbot workspace:
//! tracing setup and the application-level configuration.

pub mod config;
pub mod logging;

pub use config::{Config, ConfigError};
pub use logging::{init_tracing, init_tracing_with};
