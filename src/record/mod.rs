// Copyright (c) 2025 - Cowboy AI, Inc.
//! Record Sets
//!
//! A [`RecordSet`] is one DNS answer inside a hosted zone. Its answer is a
//! [`RecordTarget`]: literal values, a list-valued token, or an alias target
//! resolved through the [`AliasRecordTarget`] capability.
//!
//! # Record names
//!
//! ```text
//! record_name     zone          rendered Name
//! (none)          example.com   example.com.
//! www             example.com   www.example.com.
//! www.example.com example.com   www.example.com.
//! other.org.      example.com   other.org.
//! ```
//!
//! # Routing
//!
//! At most one of weight, latency region, geolocation, multi-value answer
//! or CIDR routing may be set. A routing policy without an explicit set
//! identifier gets one generated from the construct path.

pub mod kinds;

use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::domain::invariants::{
    validate_routing_policy, validate_set_identifier, validate_ttl, validate_weight,
    MAX_SET_IDENTIFIER_LENGTH,
};
use crate::domain::RecordType;
use crate::errors::{ConstructError, ConstructResult};
use crate::property::PropertyStruct;
use crate::resource::ResourceHandle;
use crate::schema::route53::{
    ALIAS_TARGET, CIDR_ROUTING_CONFIG, GEO_LOCATION, RECORD_SET, RECORD_SET_PROPERTIES,
};
use crate::stack::{ConstructPath, Stack};
use crate::token::{AttrValue, Token};
use crate::zone::HostedZoneRef;

/// TTL applied when none is given
pub const DEFAULT_TTL: Duration = Duration::from_secs(1800);

/// The DNS name and zone an alias record points at
#[derive(Debug, Clone, PartialEq)]
pub struct AliasTargetConfig {
    pub dns_name: AttrValue,
    pub hosted_zone_id: AttrValue,
}

/// The record an alias target is being bound to
#[derive(Debug, Clone, Copy)]
pub struct RecordBinding<'a> {
    pub path: &'a ConstructPath,
    /// Fully qualified record name
    pub record_name: &'a str,
    pub record_type: RecordType,
    pub stack: &'a Stack,
}

/// Something an alias record can point at
pub trait AliasRecordTarget: fmt::Debug {
    /// Produce the alias configuration for `record` in `zone`
    fn bind(
        &self,
        record: &RecordBinding<'_>,
        zone: Option<&dyn HostedZoneRef>,
    ) -> ConstructResult<AliasTargetConfig>;

    /// `EvaluateTargetHealth` for the alias block; omitted when `None`
    fn evaluate_target_health(&self) -> Option<bool> {
        None
    }
}

/// The answer of a record set
#[derive(Debug)]
pub enum RecordTarget {
    /// Literal or token values, one resource record each
    Values(Vec<AttrValue>),
    /// A token resolving to the whole list of values
    ValueList(Token),
    /// An alias to another AWS resource
    Alias(Box<dyn AliasRecordTarget>),
}

impl RecordTarget {
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttrValue>,
    {
        Self::Values(values.into_iter().map(Into::into).collect())
    }

    pub fn from_value_list(token: Token) -> Self {
        Self::ValueList(token)
    }

    pub fn from_alias(target: impl AliasRecordTarget + 'static) -> Self {
        Self::Alias(Box::new(target))
    }

    /// A single value that is either one literal or a list-valued token
    pub fn from_attr_list(value: AttrValue) -> Self {
        match value {
            AttrValue::Literal(literal) => Self::Values(vec![AttrValue::Literal(literal)]),
            AttrValue::Token(token) => Self::ValueList(token),
        }
    }

    /// Build from optional parts, requiring exactly one
    pub fn try_new(
        values: Option<Vec<AttrValue>>,
        alias_target: Option<Box<dyn AliasRecordTarget>>,
    ) -> ConstructResult<Self> {
        match (values, alias_target) {
            (Some(_), Some(_)) => Err(ConstructError::ConflictingRecordTarget),
            (Some(values), None) => Ok(Self::Values(values)),
            (None, Some(alias)) => Ok(Self::Alias(alias)),
            (None, None) => Err(ConstructError::EmptyRecordTarget),
        }
    }

    pub fn is_alias(&self) -> bool {
        matches!(self, Self::Alias(_))
    }
}

/// Continent codes accepted by geolocation routing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continent {
    Africa,
    Antarctica,
    Asia,
    Europe,
    Oceania,
    NorthAmerica,
    SouthAmerica,
}

impl Continent {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Africa => "AF",
            Self::Antarctica => "AN",
            Self::Asia => "AS",
            Self::Europe => "EU",
            Self::Oceania => "OC",
            Self::NorthAmerica => "NA",
            Self::SouthAmerica => "SA",
        }
    }
}

/// Geolocation routing criteria
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeoLocation {
    pub continent_code: Option<String>,
    pub country_code: Option<String>,
    pub subdivision_code: Option<String>,
}

impl GeoLocation {
    pub fn continent(continent: Continent) -> Self {
        Self {
            continent_code: Some(continent.code().to_string()),
            ..Default::default()
        }
    }

    /// ISO 3166-1 alpha-2 country
    pub fn country(country_code: impl Into<String>) -> Self {
        Self {
            country_code: Some(country_code.into()),
            ..Default::default()
        }
    }

    /// Subdivision of a country; Route53 defaults the country to `US`
    pub fn subdivision(subdivision_code: impl Into<String>, country_code: Option<String>) -> Self {
        Self {
            country_code: Some(country_code.unwrap_or_else(|| "US".to_string())),
            subdivision_code: Some(subdivision_code.into()),
            ..Default::default()
        }
    }

    /// Catch-all location for queries no other record matches
    pub fn everywhere() -> Self {
        Self::country("*")
    }

    fn to_property(&self) -> ConstructResult<PropertyStruct> {
        PropertyStruct::builder(&GEO_LOCATION)
            .field_opt("continent_code", self.continent_code.clone())
            .field_opt("country_code", self.country_code.clone())
            .field_opt("subdivision_code", self.subdivision_code.clone())
            .build()
    }

    fn set_identifier(&self) -> String {
        let mut identifier = "GEO".to_string();
        if let Some(code) = &self.continent_code {
            identifier.push_str("_CONTINENT_");
            identifier.push_str(code);
        }
        if let Some(code) = &self.country_code {
            identifier.push_str("_COUNTRY_");
            identifier.push_str(code);
        }
        if let Some(code) = &self.subdivision_code {
            identifier.push_str("_SUBDIVISION_");
            identifier.push_str(code);
        }
        identifier
    }
}

/// IP-based routing through a CIDR collection location
#[derive(Debug, Clone, PartialEq)]
pub struct CidrRoutingConfig {
    pub collection_id: AttrValue,
    pub location_name: String,
}

/// Options common to every record kind
#[derive(Debug, Clone, Default)]
pub struct RecordSetOptions {
    /// Relative or fully qualified name; the zone apex when absent
    pub record_name: Option<String>,
    /// Ignored for alias records
    pub ttl: Option<Duration>,
    pub comment: Option<String>,
    pub geo_location: Option<GeoLocation>,
    pub set_identifier: Option<String>,
    /// Weighted routing, 0 through 255
    pub weight: Option<u16>,
    /// Latency routing region
    pub region: Option<String>,
    pub multi_value_answer: Option<bool>,
    pub health_check_id: Option<AttrValue>,
    pub cidr_routing_config: Option<CidrRoutingConfig>,
}

impl RecordSetOptions {
    fn routing_policies(&self) -> Vec<&'static str> {
        let mut policies = Vec::new();
        if self.geo_location.is_some() {
            policies.push("geoLocation");
        }
        if self.region.is_some() {
            policies.push("region");
        }
        if self.weight.is_some() {
            policies.push("weight");
        }
        if self.multi_value_answer == Some(true) {
            policies.push("multiValueAnswer");
        }
        if self.cidr_routing_config.is_some() {
            policies.push("cidrRoutingConfig");
        }
        policies
    }

    fn validate(&self, target: &RecordTarget) -> ConstructResult<()> {
        if let Some(ttl) = self.ttl {
            validate_ttl(ttl.as_secs())?;
        }
        if let Some(weight) = self.weight {
            validate_weight(u64::from(weight))?;
        }
        if let Some(set_identifier) = &self.set_identifier {
            validate_set_identifier(set_identifier)?;
        }
        if self.multi_value_answer == Some(true) && target.is_alias() {
            return Err(ConstructError::invalid_argument(
                "multi_value_answer",
                "multi-value answer cannot be used with an alias record",
            ));
        }
        validate_routing_policy(&self.routing_policies(), self.set_identifier.is_some())?;
        Ok(())
    }

    /// Explicit set identifier, or one derived from the routing policy
    fn resolve_set_identifier(&self, path: &ConstructPath) -> Option<String> {
        if let Some(set_identifier) = &self.set_identifier {
            return Some(set_identifier.clone());
        }
        if let Some(geo_location) = &self.geo_location {
            return Some(geo_location.set_identifier());
        }
        let prefix = if let Some(weight) = self.weight {
            format!("WEIGHT_{}_ID_", weight)
        } else if let Some(region) = &self.region {
            format!("REGION_{}_ID_", region)
        } else if self.multi_value_answer == Some(true) {
            "MVA_ID_".to_string()
        } else if let Some(cidr) = &self.cidr_routing_config {
            format!("CIDR_{}_ID_", cidr.location_name)
        } else {
            return None;
        };

        let remaining = MAX_SET_IDENTIFIER_LENGTH.saturating_sub(prefix.len());
        Some(format!("{}{}", prefix, unique_resource_name(path, remaining)))
    }
}

/// Path-derived name of at most `max_length` characters, keeping the digest
fn unique_resource_name(path: &ConstructPath, max_length: usize) -> String {
    let logical_id = path.logical_id();
    if logical_id.len() <= max_length {
        return logical_id;
    }
    let hash_start = logical_id.len() - 8;
    let keep = max_length.saturating_sub(8);
    format!("{}{}", &logical_id[..keep.min(hash_start)], &logical_id[hash_start..])
}

/// Resolve a record name against its zone
///
/// Names ending in a dot are taken as fully qualified; names already under
/// the zone get a trailing dot; anything else is made relative to the zone.
pub fn determine_fully_qualified_domain_name(record_name: &str, zone_name: &str) -> String {
    if record_name.ends_with('.') {
        return record_name.to_string();
    }
    let zone_name = zone_name.trim_end_matches('.');
    let suffix = format!(".{}", zone_name);
    if record_name == zone_name || record_name.ends_with(&suffix) {
        format!("{}.", record_name)
    } else {
        format!("{}{}.", record_name, suffix)
    }
}

/// Everything needed to create a record set
#[derive(Debug)]
pub struct RecordSetProps<'a> {
    pub zone: &'a dyn HostedZoneRef,
    pub record_type: RecordType,
    pub target: RecordTarget,
    pub options: RecordSetOptions,
}

/// A record set registered in a stack
#[derive(Debug, Clone)]
pub struct RecordSet {
    path: ConstructPath,
    handle: ResourceHandle,
    record_type: RecordType,
    fqdn: String,
}

impl RecordSet {
    pub fn new(
        stack: &mut Stack,
        scope: &ConstructPath,
        id: &str,
        props: RecordSetProps<'_>,
    ) -> ConstructResult<Self> {
        let RecordSetProps {
            zone,
            record_type,
            target,
            options,
        } = props;
        let path = scope.child(id);
        stack.ensure_available(&path)?;
        options.validate(&target)?;

        let zone_name = zone.zone_name()?;
        let fqdn = determine_fully_qualified_domain_name(
            options.record_name.as_deref().unwrap_or(zone_name),
            zone_name,
        );

        let mut builder = PropertyStruct::builder(&RECORD_SET_PROPERTIES)
            .field("name", fqdn.as_str())
            .field("record_type", record_type.as_str())
            .field("hosted_zone_id", zone.hosted_zone_id());

        match &target {
            RecordTarget::Values(values) => {
                if values.is_empty() {
                    return Err(ConstructError::invalid_argument(
                        "target",
                        "a record needs at least one value",
                    ));
                }
                builder = builder.field("resource_records", values.clone());
            }
            RecordTarget::ValueList(token) => {
                builder = builder.field("resource_records", token.clone());
            }
            RecordTarget::Alias(alias) => {
                if !record_type.supports_alias() {
                    return Err(ConstructError::invalid_argument(
                        "target",
                        format!("{} records cannot be alias records", record_type),
                    ));
                }
                let binding = RecordBinding {
                    path: &path,
                    record_name: &fqdn,
                    record_type,
                    stack: &*stack,
                };
                let config = alias.bind(&binding, Some(zone))?;
                let alias_block = PropertyStruct::builder(&ALIAS_TARGET)
                    .field("dns_name", config.dns_name)
                    .field("hosted_zone_id", config.hosted_zone_id)
                    .field_opt("evaluate_target_health", alias.evaluate_target_health())
                    .build()?;
                builder = builder.field("alias_target", alias_block);
            }
        }

        if !target.is_alias() {
            let ttl = options.ttl.unwrap_or(DEFAULT_TTL);
            builder = builder.field("ttl", ttl.as_secs().to_string());
        }

        let cidr_routing_config = options
            .cidr_routing_config
            .as_ref()
            .map(|cidr| {
                PropertyStruct::builder(&CIDR_ROUTING_CONFIG)
                    .field("collection_id", &cidr.collection_id)
                    .field("location_name", cidr.location_name.as_str())
                    .build()
            })
            .transpose()?;
        let geo_location = options
            .geo_location
            .as_ref()
            .map(GeoLocation::to_property)
            .transpose()?;

        let properties = builder
            .field_opt("comment", options.comment.clone())
            .field_opt("geo_location", geo_location)
            .field_opt("set_identifier", options.resolve_set_identifier(&path))
            .field_opt("weight", options.weight.map(i64::from))
            .field_opt("region", options.region.clone())
            .field_opt("multi_value_answer", options.multi_value_answer)
            .field_opt("health_check_id", options.health_check_id.clone())
            .field_opt("cidr_routing_config", cidr_routing_config)
            .build()?;

        stack.define_construct(&path)?;
        let handle = stack.define_resource(&path.child("Resource"), &RECORD_SET, properties)?;
        debug!("Created {} record {} at {}", record_type, fqdn, path);

        Ok(Self {
            path,
            handle,
            record_type,
            fqdn,
        })
    }

    pub fn path(&self) -> &ConstructPath {
        &self.path
    }

    pub fn handle(&self) -> &ResourceHandle {
        &self.handle
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// Fully qualified name as rendered
    pub fn fqdn(&self) -> &str {
        &self.fqdn
    }

    /// The record's domain name as CloudFormation reports it
    pub fn domain_name(&self) -> AttrValue {
        self.handle.ref_token()
    }
}
