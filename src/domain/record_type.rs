// Copyright (c) 2025 - Cowboy AI, Inc.
//! DNS Record Type Domain Model
//!
//! The record types Route53 accepts in a record set, with their wire
//! spelling and a few classification helpers used by the record builders.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ConstructError;

/// DNS record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address
    A,
    /// IPv6 address
    Aaaa,
    /// Certification authority authorization
    Caa,
    /// Canonical name
    Cname,
    /// Delegation signer
    Ds,
    /// Mail exchange
    Mx,
    /// Name authority pointer
    Naptr,
    /// Name server
    Ns,
    /// Pointer
    Ptr,
    /// Start of authority
    Soa,
    /// Sender policy framework
    Spf,
    /// Service locator
    Srv,
    /// Text
    Txt,
}

impl RecordType {
    /// All record types in wire order
    pub const ALL: [RecordType; 13] = [
        Self::A,
        Self::Aaaa,
        Self::Caa,
        Self::Cname,
        Self::Ds,
        Self::Mx,
        Self::Naptr,
        Self::Ns,
        Self::Ptr,
        Self::Soa,
        Self::Spf,
        Self::Srv,
        Self::Txt,
    ];

    /// Get the wire representation used in the `Type` property
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Caa => "CAA",
            Self::Cname => "CNAME",
            Self::Ds => "DS",
            Self::Mx => "MX",
            Self::Naptr => "NAPTR",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Soa => "SOA",
            Self::Spf => "SPF",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
        }
    }

    /// Whether Route53 accepts an alias target for this type
    pub fn supports_alias(&self) -> bool {
        matches!(
            self,
            Self::A | Self::Aaaa | Self::Caa | Self::Cname | Self::Mx | Self::Naptr | Self::Ptr
                | Self::Spf | Self::Srv | Self::Txt
        )
    }

    /// Whether this type describes delegation rather than an answer
    pub fn is_delegation(&self) -> bool {
        matches!(self, Self::Ns | Self::Ds | Self::Soa)
    }
}

impl FromStr for RecordType {
    type Err = ConstructError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let message = format!("unknown record type '{}'", s);
                ConstructError::invalid_argument("record_type", message)
            })
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
