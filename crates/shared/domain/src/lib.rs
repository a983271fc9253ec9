//! Domain layer - Account entity and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Persistence mapping lives in the user service crate.

pub mod constants;
pub mod error;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use user::{NewUser, User, UserChanges, UserResponse};
