//! # Core Module
//!
//! Configuration shared by the persona chat service.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod config;

pub use config::Config;
