//! Authentication types shared across bookstore crates.
//!
//! Provides the token service (issue + verify) and the authorization guard extractors.

pub mod guard;
pub mod token;
