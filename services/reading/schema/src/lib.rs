//! sea-orm entities for the reading service tables.

pub mod action_plans;
pub mod books;
pub mod likes;
pub mod mental_models;
pub mod users;
