//! Domain types shared across all Bookmind crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import from the service's `usecase/` and `domain/` layers and from the
//! client sync crate.

pub mod error_body;
pub mod id;
pub mod reflection;
pub mod sort;
pub mod status;
