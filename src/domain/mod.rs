// Copyright (c) 2025 - Cowboy AI, Inc.
//! DNS Domain Models
//!
//! Value objects with validation invariants shared by the Route53 constructs.
//!
//! # Value Objects with Invariants
//!
//! - [`ZoneName`] - DNS-validated hosted zone names
//! - [`RecordType`] - record types Route53 accepts
//!
//! # Validation
//!
//! - [`invariants`] - pure range and combination checks for record sets and
//!   health checks

pub mod invariants;
pub mod record_type;
pub mod zone_name;

pub use invariants::{ValidationError, ValidationResult};
pub use record_type::RecordType;
pub use zone_name::{ZoneName, ZoneNameError};
