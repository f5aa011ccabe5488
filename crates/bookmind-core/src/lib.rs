//! HTTP plumbing shared by Bookmind services.

pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod time;
pub mod tracing;
