//! Trendwave - terminal client for a social-media task marketplace
//!
//! This library provides the signup wizard, session handling, and the
//! HTTP clients for the account and location services.

// Core modules
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod screens;
pub mod services;
pub mod session;
pub mod styles;
pub mod tui;
pub mod utils;
pub mod validate;
pub mod widgets;
pub mod wizard;

// Re-exports for convenience
pub use config::Config;
pub use session::Session;
pub use wizard::{Step, Wizard, WizardError};
