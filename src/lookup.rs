// Copyright (c) 2025 - Cowboy AI, Inc.
//! Deployment Context Lookups
//!
//! `HostedZone::from_lookup` resolves a zone from a key/value cache kept by
//! the deployment tool (`cdk.context.json`). The cache is passed in
//! explicitly as a [`ContextProvider`]; nothing here reads ambient state.
//!
//! # Cache keys
//!
//! ```text
//! hosted-zone:account=123456789012:domainName=example.com:privateZone=false:region=us-east-1
//! ```
//!
//! Keys are the provider name followed by the query properties in sorted
//! order. A miss is recorded on the stack as [`MissingContext`] and answered
//! with a placeholder so synthesis can finish and the tool can fill the cache.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::errors::{ConstructError, ConstructResult};
use crate::stack::{MissingContext, Stack};

/// Provider name for hosted zone lookups
pub const HOSTED_ZONE_PROVIDER: &str = "hosted-zone";

/// Zone id returned while the real value is not cached yet
pub const DUMMY_HOSTED_ZONE_ID: &str = "DUMMY";

/// Marker key for a provider failure stored in the cache
const PROVIDER_ERROR_KEY: &str = "$providerError";

/// Prefix the Route53 API puts in front of zone ids
const HOSTED_ZONE_ID_PREFIX: &str = "/hostedzone/";

/// Read access to the deployment context cache
pub trait ContextProvider {
    fn lookup(&self, key: &str) -> Option<&Value>;
}

/// In-memory context cache
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextCache {
    entries: BTreeMap<String, Value>,
}

impl ContextCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `cdk.context.json`-shaped document
    pub fn from_json_str(json: &str) -> ConstructResult<Self> {
        let entries: BTreeMap<String, Value> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// Load from a context file on disk
    pub fn from_file(path: impl AsRef<Path>) -> ConstructResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let cache = Self::from_json_str(&contents)?;
        debug!("Loaded {} context entries from {}", cache.len(), path.display());
        Ok(cache)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ContextProvider for ContextCache {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }
}

/// Criteria for a hosted zone lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostedZoneQuery {
    /// Zone name to find
    pub domain_name: String,
    /// Restrict to private zones
    pub private_zone: bool,
    /// Restrict to private zones associated with this VPC
    pub vpc_id: Option<String>,
}

impl HostedZoneQuery {
    pub fn public(domain_name: impl Into<String>) -> Self {
        Self {
            domain_name: domain_name.into(),
            ..Default::default()
        }
    }

    pub fn private(domain_name: impl Into<String>, vpc_id: Option<String>) -> Self {
        Self {
            domain_name: domain_name.into(),
            private_zone: true,
            vpc_id,
        }
    }

    fn validate(&self) -> ConstructResult<()> {
        if self.domain_name.is_empty() {
            return Err(ConstructError::MissingRequiredField {
                kind: "HostedZoneQuery".to_string(),
                field: "domain_name".to_string(),
            });
        }
        if self.vpc_id.is_some() && !self.private_zone {
            return Err(ConstructError::invalid_argument(
                "vpc_id",
                "a VPC can only be given together with private_zone",
            ));
        }
        Ok(())
    }
}

/// A zone the lookup resolved (or the placeholder for a miss)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundHostedZone {
    pub hosted_zone_id: String,
    pub zone_name: String,
}

impl FoundHostedZone {
    /// Whether this is the placeholder answer for a cache miss
    pub fn is_dummy(&self) -> bool {
        self.hosted_zone_id == DUMMY_HOSTED_ZONE_ID
    }
}

/// Build a context key from a provider name and its query properties
///
/// Properties are emitted in sorted order; strings verbatim, everything else
/// as JSON.
pub fn context_key(provider: &str, props: &Map<String, Value>) -> String {
    let mut keys: Vec<&String> = props.keys().collect();
    keys.sort();

    let mut key = provider.to_string();
    for name in keys {
        let rendered = match &props[name.as_str()] {
            Value::String(value) => value.clone(),
            other => other.to_string(),
        };
        key.push(':');
        key.push_str(name);
        key.push('=');
        key.push_str(&rendered);
    }
    key
}

/// Resolve a hosted zone through the deployment context
pub(crate) fn find_hosted_zone(
    stack: &mut Stack,
    query: &HostedZoneQuery,
    context: &dyn ContextProvider,
) -> ConstructResult<FoundHostedZone> {
    query.validate()?;

    let env = stack.environment();
    let (account, region) = match (&env.account, &env.region) {
        (Some(account), Some(region)) => (account.clone(), region.clone()),
        _ => {
            return Err(ConstructError::MissingEnvironment {
                provider: HOSTED_ZONE_PROVIDER.to_string(),
            })
        }
    };

    let mut props = Map::new();
    props.insert("account".to_string(), Value::String(account));
    props.insert("region".to_string(), Value::String(region));
    props.insert("domainName".to_string(), Value::String(query.domain_name.clone()));
    props.insert("privateZone".to_string(), Value::Bool(query.private_zone));
    if let Some(vpc_id) = &query.vpc_id {
        props.insert("vpcId".to_string(), Value::String(vpc_id.clone()));
    }
    let key = context_key(HOSTED_ZONE_PROVIDER, &props);

    let Some(value) = context.lookup(&key) else {
        warn!("Context value for {} not found, using dummy hosted zone", key);
        stack.report_missing_context(MissingContext {
            key,
            provider: HOSTED_ZONE_PROVIDER.to_string(),
            props: Value::Object(props),
        });
        return Ok(FoundHostedZone {
            hosted_zone_id: DUMMY_HOSTED_ZONE_ID.to_string(),
            zone_name: query.domain_name.clone(),
        });
    };

    if let Some(message) = value.get(PROVIDER_ERROR_KEY) {
        return Err(ConstructError::LookupFailed {
            key,
            message: message
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| message.to_string()),
        });
    }

    let id = value
        .get("Id")
        .and_then(Value::as_str)
        .ok_or_else(|| ConstructError::LookupFailed {
            key: key.clone(),
            message: format!("expected an object with an 'Id' string, got {}", value),
        })?;

    let hosted_zone_id = id.strip_prefix(HOSTED_ZONE_ID_PREFIX).unwrap_or(id).to_string();
    debug!("Resolved {} to hosted zone {}", key, hosted_zone_id);
    Ok(FoundHostedZone {
        hosted_zone_id,
        zone_name: query.domain_name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::{Environment, StackProps};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn env_stack() -> Stack {
        Stack::new(
            "App",
            StackProps {
                env: Environment::new("123456789012", "us-east-1"),
                description: None,
            },
        )
    }

    const PUBLIC_KEY: &str =
        "hosted-zone:account=123456789012:domainName=example.com:privateZone=false:region=us-east-1";

    #[test]
    fn test_context_key_sorts_props() {
        let mut props = Map::new();
        props.insert("region".to_string(), json!("us-east-1"));
        props.insert("account".to_string(), json!("123456789012"));
        props.insert("privateZone".to_string(), json!(false));
        props.insert("domainName".to_string(), json!("example.com"));
        assert_eq!(context_key(HOSTED_ZONE_PROVIDER, &props), PUBLIC_KEY);
    }

    #[test]
    fn test_hit_strips_prefix() {
        let mut cache = ContextCache::new();
        cache.insert(PUBLIC_KEY, json!({"Id": "/hostedzone/Z0001", "Name": "example.com."}));
        let mut stack = env_stack();

        let found =
            find_hosted_zone(&mut stack, &HostedZoneQuery::public("example.com"), &cache).unwrap();
        assert_eq!(
            found,
            FoundHostedZone {
                hosted_zone_id: "Z0001".to_string(),
                zone_name: "example.com".to_string(),
            }
        );
        assert!(stack.missing_context().is_empty());
    }

    #[test]
    fn test_miss_records_missing_context() {
        let mut stack = env_stack();
        let found = find_hosted_zone(
            &mut stack,
            &HostedZoneQuery::public("example.com"),
            &ContextCache::new(),
        )
        .unwrap();

        assert!(found.is_dummy());
        assert_eq!(stack.missing_context().len(), 1);
        assert_eq!(stack.missing_context()[0].key, PUBLIC_KEY);
        assert_eq!(stack.missing_context()[0].props["domainName"], json!("example.com"));
    }

    #[test]
    fn test_provider_error_fails() {
        let mut cache = ContextCache::new();
        cache.insert(PUBLIC_KEY, json!({"$providerError": "Found zones: [] for dns:example.com"}));
        let mut stack = env_stack();

        let err = find_hosted_zone(&mut stack, &HostedZoneQuery::public("example.com"), &cache)
            .unwrap_err();
        assert!(matches!(err, ConstructError::LookupFailed { .. }));
    }

    #[test]
    fn test_requires_environment() {
        let mut stack = Stack::new("App", StackProps::default());
        let err = find_hosted_zone(
            &mut stack,
            &HostedZoneQuery::public("example.com"),
            &ContextCache::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConstructError::MissingEnvironment {
                provider: "hosted-zone".to_string()
            }
        );
    }

    #[test]
    fn test_vpc_requires_private_zone() {
        let mut stack = env_stack();
        let query = HostedZoneQuery {
            domain_name: "example.com".to_string(),
            private_zone: false,
            vpc_id: Some("vpc-1".to_string()),
        };
        assert!(matches!(
            find_hosted_zone(&mut stack, &query, &ContextCache::new()),
            Err(ConstructError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_private_key_includes_vpc() {
        let mut stack = env_stack();
        let query = HostedZoneQuery::private("corp.internal", Some("vpc-1".to_string()));
        find_hosted_zone(&mut stack, &query, &ContextCache::new()).unwrap();
        assert_eq!(
            stack.missing_context()[0].key,
            "hosted-zone:account=123456789012:domainName=corp.internal:privateZone=true:region=us-east-1:vpcId=vpc-1"
        );
    }
}
