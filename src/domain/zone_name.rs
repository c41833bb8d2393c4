// Copyright (c) 2025 - Cowboy AI, Inc.
//! Zone Name Value Object with DNS Validation Invariants

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Zone name validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ZoneNameError {
    #[error("Zone name is empty")]
    Empty,

    #[error("Zone name exceeds maximum length of 253 characters: {0}")]
    TooLong(usize),

    #[error("Zone name must not end with a period: {0}")]
    TrailingDot(String),

    #[error("Zone name contains an empty label: {0}")]
    EmptyLabel(String),

    #[error("Label exceeds maximum length of 63 characters: {0}")]
    LabelTooLong(String),

    #[error("Invalid character in zone name: {0}")]
    InvalidCharacter(char),

    #[error("Label cannot start or end with hyphen: {0}")]
    InvalidLabelFormat(String),

    #[error("Wildcard label is only allowed as the leftmost label: {0}")]
    MisplacedWildcard(String),
}

/// DNS zone name value object
///
/// The name is stored without the trailing dot; rendering adds the dot that
/// Route53 expects. Invariants:
/// - Non-empty and at most 253 characters
/// - No trailing dot and no empty labels
/// - Each label at most 63 characters
/// - Labels contain only ASCII alphanumerics, hyphens and underscores
/// - Labels cannot start or end with hyphens
/// - `*` only as the complete leftmost label
///
/// # Examples
///
/// ```rust
/// use cim_route53::domain::ZoneName;
///
/// let zone = ZoneName::new("example.com").unwrap();
/// assert_eq!(zone.fully_qualified(), "example.com.");
///
/// assert!(ZoneName::new("").is_err());
/// assert!(ZoneName::new("example.com.").is_err());
/// assert!(ZoneName::new("bad..example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneName(String);

impl ZoneName {
    /// Maximum total length of a zone name
    pub const MAX_LENGTH: usize = 253;

    /// Maximum length of a single label
    pub const MAX_LABEL_LENGTH: usize = 63;

    /// Create a new zone name with validation
    pub fn new(name: impl Into<String>) -> Result<Self, ZoneNameError> {
        let name = name.into();

        if name.is_empty() {
            return Err(ZoneNameError::Empty);
        }

        if name.len() > Self::MAX_LENGTH {
            return Err(ZoneNameError::TooLong(name.len()));
        }

        if name.ends_with('.') {
            return Err(ZoneNameError::TrailingDot(name));
        }

        for (index, label) in name.split('.').enumerate() {
            if label.is_empty() {
                return Err(ZoneNameError::EmptyLabel(name.clone()));
            }
            Self::validate_label(label, index == 0)?;
        }

        Ok(Self(name))
    }

    fn validate_label(label: &str, leftmost: bool) -> Result<(), ZoneNameError> {
        if label.len() > Self::MAX_LABEL_LENGTH {
            return Err(ZoneNameError::LabelTooLong(label.to_string()));
        }

        if label == "*" {
            return if leftmost {
                Ok(())
            } else {
                Err(ZoneNameError::MisplacedWildcard(label.to_string()))
            };
        }

        for ch in label.chars() {
            if ch == '*' {
                return Err(ZoneNameError::MisplacedWildcard(label.to_string()));
            }
            if !ch.is_ascii_alphanumeric() && ch != '-' && ch != '_' {
                return Err(ZoneNameError::InvalidCharacter(ch));
            }
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(ZoneNameError::InvalidLabelFormat(label.to_string()));
        }

        Ok(())
    }

    /// Get the zone name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The zone name with the trailing dot Route53 uses on the wire
    pub fn fully_qualified(&self) -> String {
        format!("{}.", self.0)
    }

    /// Get labels as a vector
    pub fn labels(&self) -> Vec<&str> {
        self.0.split('.').collect()
    }

    /// Parent zone name, if this zone is not a top-level domain
    pub fn parent(&self) -> Option<ZoneName> {
        self.0
            .split_once('.')
            .map(|(_, parent)| ZoneName(parent.to_string()))
    }

    /// Convert to lowercase (canonical form)
    pub fn to_lowercase(&self) -> Self {
        Self(self.0.to_lowercase())
    }
}

impl fmt::Display for ZoneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ZoneName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ZoneName {
    type Error = ZoneNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ZoneName {
    type Error = ZoneNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ZoneName> for String {
    fn from(value: ZoneName) -> Self {
        value.0
    }
}
