//! Caller identity as seen by Bookmind services.
//!
//! Session issuance lives in the external identity provider; services only
//! read the user id it hands back through the `authorization` header.

pub mod identity;
