//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Completion clients (OpenAI-compatible HTTP, scripted mock)
//! - Credential sources (secrets file, environment)
//! - Terminal front end (container, router, controllers)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
