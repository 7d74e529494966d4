//! Input validation for CLI-provided values.
//!
//! Validates the two inputs that reach the database as raw strings: US
//! state/territory codes on customers and organization names, which become
//! database file names. Both checks run before any statement is built.
//!
//! # Examples
//!
//! ```
//! use org_store_core::{validate_org_name, validate_state};
//!
//! assert_eq!(validate_state("ca").unwrap(), "CA");
//! assert!(validate_state("ZZ").is_err());
//!
//! assert!(validate_org_name("acme_west").is_ok());
//! assert!(validate_org_name("acme corp").is_err());
//! ```

use thiserror::Error;

/// Validation errors for CLI-provided values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// State code is not exactly two characters.
    #[error("state code must be exactly 2 letters, got '{0}'")]
    StateLength(String),
    /// State code is not a US state or territory.
    #[error("'{0}' is not a US state or territory code")]
    UnknownState(String),
    /// Org name is empty.
    #[error("org name cannot be empty")]
    EmptyOrgName,
    /// Org name contains characters unusable in a database name.
    #[error("invalid org name '{0}': must contain only lowercase letters, digits, and underscores")]
    InvalidOrgName(String),
}

/// US state and territory codes accepted on customer records.
const US_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "AS", "CA", "CO", "CT", "DE", "DC", "FL", "GA",
    "GU", "HI", "ID", "IL", "IN", "IA", "KS", "KY", "LA", "ME", "MD", "MA",
    "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC",
    "ND", "MP", "OH", "OK", "OR", "PA", "PR", "RI", "SC", "SD", "TN", "TX",
    "VT", "UT", "VA", "VI", "WA", "WV", "WI", "WY",
];

/// Validates a US state/territory code and returns its canonical uppercase form.
///
/// # Errors
///
/// Returns [`ValidationError::StateLength`] if the input is not two
/// characters, or [`ValidationError::UnknownState`] if it is not in the
/// state/territory table.
pub fn validate_state(state: &str) -> Result<String, ValidationError> {
    if state.chars().count() != 2 {
        return Err(ValidationError::StateLength(state.to_string()));
    }

    let upper = state.to_ascii_uppercase();
    if !US_STATES.contains(&upper.as_str()) {
        return Err(ValidationError::UnknownState(state.to_string()));
    }

    Ok(upper)
}

/// Validates an organization name against the database naming convention.
///
/// Org names become database file names (`store_<org>.db`), so only
/// lowercase ASCII letters, digits, and underscores are accepted.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyOrgName`] or
/// [`ValidationError::InvalidOrgName`].
pub fn validate_org_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyOrgName);
    }

    let ok = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if !ok {
        return Err(ValidationError::InvalidOrgName(name.to_string()));
    }

    Ok(())
}
