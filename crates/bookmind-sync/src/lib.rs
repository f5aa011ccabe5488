//! Client-side synchronized collections for the reading service.
//!
//! Each resource lives in an in-memory [`collection::Collection`] that
//! hydrates from the REST API, applies mutations optimistically, forwards
//! them to the server and restores the previous value when the server
//! refuses. Views are read through [`query::LiveQuery`], which re-runs its
//! filter whenever the collection or the filter inputs change.

pub mod action_plans;
pub mod client;
pub mod collection;
pub mod config;
pub mod error;
pub mod mental_models;
pub mod query;
pub mod types;
