// Copyright (c) 2025 - Cowboy AI, Inc.
//! Typed record constructors
//!
//! Each helper formats its values the way Route53 expects for the record
//! type and delegates to [`RecordSet::new`].

use std::fmt;
use std::time::Duration;

use super::{RecordSet, RecordSetOptions, RecordSetProps, RecordTarget};
use crate::domain::RecordType;
use crate::errors::{ConstructError, ConstructResult};
use crate::stack::{ConstructPath, Stack};
use crate::token::AttrValue;
use crate::zone::HostedZoneRef;

/// Default TTL of a delegation record
pub const ZONE_DELEGATION_TTL: Duration = Duration::from_secs(172_800);

/// Longest character-string a TXT record value may hold, in bytes
const TXT_CHUNK_LENGTH: usize = 255;

fn record(
    stack: &mut Stack,
    scope: &ConstructPath,
    id: &str,
    zone: &dyn HostedZoneRef,
    record_type: RecordType,
    target: RecordTarget,
    options: RecordSetOptions,
) -> ConstructResult<RecordSet> {
    RecordSet::new(
        stack,
        scope,
        id,
        RecordSetProps {
            zone,
            record_type,
            target,
            options,
        },
    )
}

/// IPv4 addresses or an alias
pub fn a_record(
    stack: &mut Stack,
    scope: &ConstructPath,
    id: &str,
    zone: &dyn HostedZoneRef,
    target: RecordTarget,
    options: RecordSetOptions,
) -> ConstructResult<RecordSet> {
    record(stack, scope, id, zone, RecordType::A, target, options)
}

/// IPv6 addresses or an alias
pub fn aaaa_record(
    stack: &mut Stack,
    scope: &ConstructPath,
    id: &str,
    zone: &dyn HostedZoneRef,
    target: RecordTarget,
    options: RecordSetOptions,
) -> ConstructResult<RecordSet> {
    record(stack, scope, id, zone, RecordType::Aaaa, target, options)
}

pub fn cname_record(
    stack: &mut Stack,
    scope: &ConstructPath,
    id: &str,
    zone: &dyn HostedZoneRef,
    domain_name: impl Into<AttrValue>,
    options: RecordSetOptions,
) -> ConstructResult<RecordSet> {
    let target = RecordTarget::Values(vec![domain_name.into()]);
    record(stack, scope, id, zone, RecordType::Cname, target, options)
}

/// Quote a TXT value, splitting it into strings of at most 255 bytes
///
/// Splits fall on character boundaries, so a multibyte character is never
/// divided between two strings.
pub fn format_txt(value: &str) -> String {
    let mut formatted = String::new();
    let mut rest = value;
    while !rest.is_empty() {
        let mut end = rest.len().min(TXT_CHUNK_LENGTH);
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        let (chunk, tail) = rest.split_at(end);
        formatted.push_str(&serde_json::Value::String(chunk.to_string()).to_string());
        rest = tail;
    }
    formatted
}

pub fn txt_record(
    stack: &mut Stack,
    scope: &ConstructPath,
    id: &str,
    zone: &dyn HostedZoneRef,
    values: &[&str],
    options: RecordSetOptions,
) -> ConstructResult<RecordSet> {
    if values.iter().any(|value| value.is_empty()) {
        return Err(ConstructError::invalid_argument("values", "TXT values must not be empty"));
    }
    let target = RecordTarget::from_values(values.iter().map(|value| format_txt(value)));
    record(stack, scope, id, zone, RecordType::Txt, target, options)
}

/// One SRV answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrvRecordValue {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub host_name: String,
}

impl fmt::Display for SrvRecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.priority, self.weight, self.port, self.host_name)
    }
}

pub fn srv_record(
    stack: &mut Stack,
    scope: &ConstructPath,
    id: &str,
    zone: &dyn HostedZoneRef,
    values: &[SrvRecordValue],
    options: RecordSetOptions,
) -> ConstructResult<RecordSet> {
    let target = RecordTarget::from_values(values.iter().map(ToString::to_string));
    record(stack, scope, id, zone, RecordType::Srv, target, options)
}

/// CAA property tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaaTag {
    /// Authorize a CA to issue certificates for the domain
    Issue,
    /// Authorize a CA to issue wildcard certificates
    IssueWild,
    /// Where CAs report policy violations
    Iodef,
}

impl CaaTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::IssueWild => "issuewild",
            Self::Iodef => "iodef",
        }
    }
}

/// One CAA answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaaRecordValue {
    pub flag: u8,
    pub tag: CaaTag,
    pub value: String,
}

impl fmt::Display for CaaRecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} \"{}\"", self.flag, self.tag.as_str(), self.value)
    }
}

pub fn caa_record(
    stack: &mut Stack,
    scope: &ConstructPath,
    id: &str,
    zone: &dyn HostedZoneRef,
    values: &[CaaRecordValue],
    options: RecordSetOptions,
) -> ConstructResult<RecordSet> {
    let target = RecordTarget::from_values(values.iter().map(ToString::to_string));
    record(stack, scope, id, zone, RecordType::Caa, target, options)
}

/// CAA record allowing only Amazon to issue certificates
pub fn caa_amazon_record(
    stack: &mut Stack,
    scope: &ConstructPath,
    id: &str,
    zone: &dyn HostedZoneRef,
    options: RecordSetOptions,
) -> ConstructResult<RecordSet> {
    let amazon = CaaRecordValue {
        flag: 0,
        tag: CaaTag::Issue,
        value: "amazon.com".to_string(),
    };
    caa_record(stack, scope, id, zone, &[amazon], options)
}

/// One MX answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxRecordValue {
    pub priority: u16,
    pub host_name: String,
}

impl fmt::Display for MxRecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.priority, self.host_name)
    }
}

pub fn mx_record(
    stack: &mut Stack,
    scope: &ConstructPath,
    id: &str,
    zone: &dyn HostedZoneRef,
    values: &[MxRecordValue],
    options: RecordSetOptions,
) -> ConstructResult<RecordSet> {
    let target = RecordTarget::from_values(values.iter().map(ToString::to_string));
    record(stack, scope, id, zone, RecordType::Mx, target, options)
}

pub fn ns_record(
    stack: &mut Stack,
    scope: &ConstructPath,
    id: &str,
    zone: &dyn HostedZoneRef,
    name_servers: RecordTarget,
    options: RecordSetOptions,
) -> ConstructResult<RecordSet> {
    reject_alias(&name_servers, RecordType::Ns)?;
    record(stack, scope, id, zone, RecordType::Ns, name_servers, options)
}

/// Delegation signer digests of a child zone
pub fn ds_record(
    stack: &mut Stack,
    scope: &ConstructPath,
    id: &str,
    zone: &dyn HostedZoneRef,
    values: &[&str],
    options: RecordSetOptions,
) -> ConstructResult<RecordSet> {
    let target = RecordTarget::from_values(values.iter().copied());
    record(stack, scope, id, zone, RecordType::Ds, target, options)
}

/// NS record handing a subdomain to another zone's name servers
///
/// Literal name servers are made fully qualified; TTL defaults to two days.
pub fn zone_delegation_record(
    stack: &mut Stack,
    scope: &ConstructPath,
    id: &str,
    zone: &dyn HostedZoneRef,
    name_servers: RecordTarget,
    options: RecordSetOptions,
) -> ConstructResult<RecordSet> {
    reject_alias(&name_servers, RecordType::Ns)?;
    let name_servers = match name_servers {
        RecordTarget::Values(values) => RecordTarget::Values(
            values
                .into_iter()
                .map(|value| match value {
                    AttrValue::Literal(ns) if !ns.ends_with('.') => {
                        AttrValue::Literal(format!("{}.", ns))
                    }
                    other => other,
                })
                .collect(),
        ),
        other => other,
    };

    let options = RecordSetOptions {
        ttl: Some(options.ttl.unwrap_or(ZONE_DELEGATION_TTL)),
        ..options
    };
    record(stack, scope, id, zone, RecordType::Ns, name_servers, options)
}

fn reject_alias(target: &RecordTarget, record_type: RecordType) -> ConstructResult<()> {
    if target.is_alias() {
        return Err(ConstructError::invalid_argument(
            "target",
            format!("{} records cannot be alias records", record_type),
        ));
    }
    Ok(())
}
