//! Cross-cutting service plumbing: configuration, tracing, health, HTTP layers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
