//! Async service layer bridging the event loop and the remote API.

pub mod signup_service;

pub use signup_service::{AccountService, CallHandle, LocationService, RegisterOutcome};
