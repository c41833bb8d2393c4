// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Domain Invariants
//!
//! Business rule checks for record sets and health checks. All functions are
//! pure (no side effects) and return detailed validation results.
//!
//! # Invariant Categories
//!
//! 1. **Range Invariants**: numeric fields inside Route53's accepted bounds
//! 2. **Combination Invariants**: fields that exclude or require each other
//! 3. **Format Invariants**: string fields with length or shape limits

/// Validation result with detailed error information
pub type ValidationResult = Result<(), ValidationError>;

/// Validation error with context
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Numeric value outside its accepted range
    #[error("{field} must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: u64,
        max: u64,
        actual: u64,
    },

    /// More than one routing policy on a single record set
    #[error("Only one of region, weight, multiValueAnswer or geoLocation can be defined, got: {0}")]
    MultipleRoutingPolicies(String),

    /// A set identifier on a record set using simple routing
    #[error("setIdentifier can only be specified for non-simple routing policies")]
    SetIdentifierWithoutRoutingPolicy,

    /// Request interval other than the two values Route53 supports
    #[error("requestInterval must be 10 or 30 seconds, got {0}")]
    InvalidRequestInterval(u64),

    /// Field that only applies to some health check types
    #[error("{field} is not supported for health check type {check_type}")]
    UnsupportedForType { field: String, check_type: String },

    /// Field that a health check type cannot do without
    #[error("{field} is required for health check type {check_type}")]
    RequiredForType { field: String, check_type: String },

    /// String too long or too short
    #[error("{field} length must be between {min} and {max} characters, got {actual}")]
    InvalidLength {
        field: String,
        min: usize,
        max: usize,
        actual: usize,
    },
}

/// Maximum weight of a weighted record
pub const MAX_WEIGHT: u64 = 255;

/// Maximum length of a record set identifier
pub const MAX_SET_IDENTIFIER_LENGTH: usize = 128;

/// Largest TTL Route53 accepts, in seconds
pub const MAX_TTL_SECONDS: u64 = 2_147_483_647;

/// Validate a value against an inclusive range
pub fn validate_range(field: &str, value: u64, min: u64, max: u64) -> ValidationResult {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
            actual: value,
        });
    }
    Ok(())
}

/// Validate a string length against an inclusive range
pub fn validate_length(field: &str, value: &str, min: usize, max: usize) -> ValidationResult {
    let actual = value.chars().count();
    if actual < min || actual > max {
        return Err(ValidationError::InvalidLength {
            field: field.to_string(),
            min,
            max,
            actual,
        });
    }
    Ok(())
}

/// Validate record weight
///
/// # Rules
/// - 0 (never returned) through 255
pub fn validate_weight(weight: u64) -> ValidationResult {
    validate_range("weight", weight, 0, MAX_WEIGHT)
}

/// Validate a record TTL in seconds
///
/// # Rules
/// - 0 through 2147483647 (a signed 32-bit value)
pub fn validate_ttl(seconds: u64) -> ValidationResult {
    validate_range("ttl", seconds, 0, MAX_TTL_SECONDS)
}

/// Validate the routing policy combination of a record set
///
/// # Rules
/// - At most one of region, weight, multi-value answer or geolocation
/// - A set identifier requires one of them
///
/// `policies` names the routing policies that are set.
pub fn validate_routing_policy(policies: &[&str], has_set_identifier: bool) -> ValidationResult {
    if policies.len() > 1 {
        return Err(ValidationError::MultipleRoutingPolicies(policies.join(", ")));
    }
    if has_set_identifier && policies.is_empty() {
        return Err(ValidationError::SetIdentifierWithoutRoutingPolicy);
    }
    Ok(())
}

/// Validate a record set identifier
///
/// # Rules
/// - 1 through 128 characters
pub fn validate_set_identifier(set_identifier: &str) -> ValidationResult {
    validate_length("setIdentifier", set_identifier, 1, MAX_SET_IDENTIFIER_LENGTH)
}

/// Validate a health check failure threshold
///
/// # Rules
/// - 1 through 10 consecutive checks
pub fn validate_failure_threshold(threshold: u64) -> ValidationResult {
    validate_range("failureThreshold", threshold, 1, 10)
}

/// Validate a health check request interval in seconds
///
/// # Rules
/// - Standard (30) or fast (10) only
pub fn validate_request_interval(seconds: u64) -> ValidationResult {
    match seconds {
        10 | 30 => Ok(()),
        other => Err(ValidationError::InvalidRequestInterval(other)),
    }
}

/// Validate a health check search string
///
/// # Rules
/// - Only string-matching check types accept it, and they require it
/// - At most 255 characters
pub fn validate_search_string(
    check_type: &str,
    matches_string: bool,
    search_string: Option<&str>,
) -> ValidationResult {
    match (matches_string, search_string) {
        (true, Some(value)) => validate_length("searchString", value, 1, 255),
        (true, None) => Err(ValidationError::RequiredForType {
            field: "searchString".to_string(),
            check_type: check_type.to_string(),
        }),
        (false, Some(_)) => Err(ValidationError::UnsupportedForType {
            field: "searchString".to_string(),
            check_type: check_type.to_string(),
        }),
        (false, None) => Ok(()),
    }
}
