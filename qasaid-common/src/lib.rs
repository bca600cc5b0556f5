//! # Qasaid Common Library
//!
//! Shared code for the qasaid tools:
//! - Error type
//! - TOML configuration loading and environment-sourced secrets
//! - Tracing initialisation
//! - Atomic file writes

pub mod config;
pub mod error;
pub mod fs;
pub mod logging;

pub use error::{Error, Result};
