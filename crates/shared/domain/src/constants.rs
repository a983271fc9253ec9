//! Domain-level constants.
//!
//! Storage names and validation rules shared across crates.

// =============================================================================
// Storage names
// =============================================================================

/// Unique index backing email lookups
pub const USERS_EMAIL_INDEX: &str = "ix_users_email";

// =============================================================================
// Validation
// =============================================================================

/// Separator every email address must contain
pub const EMAIL_SEPARATOR: char = '@';

/// Field names reported in validation errors
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_FIRST_NAME: &str = "first_name";
pub const FIELD_LAST_NAME: &str = "last_name";
