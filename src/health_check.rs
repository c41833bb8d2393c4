// Copyright (c) 2025 - Cowboy AI, Inc.
//! Health Checks
//!
//! An `AWS::Route53::HealthCheck` whose id can gate record answers through
//! [`RecordSetOptions::health_check_id`](crate::record::RecordSetOptions).
//! Which fields apply depends on the check type; combinations Route53 would
//! reject at deploy time are rejected at construction instead.

use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::domain::invariants::{
    validate_failure_threshold, validate_range, validate_request_interval, validate_search_string,
    ValidationError,
};
use crate::errors::ConstructResult;
use crate::property::{PropertyStruct, PropertyValue};
use crate::resource::ResourceHandle;
use crate::schema::route53::{
    ALARM_IDENTIFIER, HEALTH_CHECK, HEALTH_CHECK_CONFIG, HEALTH_CHECK_PROPERTIES, TAG,
};
use crate::stack::{ConstructPath, Stack};
use crate::token::AttrValue;

/// Most child checks a calculated check may combine
const MAX_CHILD_HEALTH_CHECKS: u64 = 256;

/// What a health check targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthCheckType {
    Http,
    Https,
    HttpStrMatch,
    HttpsStrMatch,
    Tcp,
    CloudwatchMetric,
    Calculated,
    RecoveryControl,
}

impl HealthCheckType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "HTTP",
            Self::Https => "HTTPS",
            Self::HttpStrMatch => "HTTP_STR_MATCH",
            Self::HttpsStrMatch => "HTTPS_STR_MATCH",
            Self::Tcp => "TCP",
            Self::CloudwatchMetric => "CLOUDWATCH_METRIC",
            Self::Calculated => "CALCULATED",
            Self::RecoveryControl => "RECOVERY_CONTROL",
        }
    }

    /// Probes an endpoint over the network
    pub fn is_endpoint_check(&self) -> bool {
        matches!(
            self,
            Self::Http | Self::Https | Self::HttpStrMatch | Self::HttpsStrMatch | Self::Tcp
        )
    }

    fn is_http(&self) -> bool {
        matches!(self, Self::Http | Self::Https | Self::HttpStrMatch | Self::HttpsStrMatch)
    }

    fn is_https(&self) -> bool {
        matches!(self, Self::Https | Self::HttpsStrMatch)
    }

    fn matches_string(&self) -> bool {
        matches!(self, Self::HttpStrMatch | Self::HttpsStrMatch)
    }

    fn default_port(&self) -> Option<u16> {
        match self {
            Self::Http | Self::HttpStrMatch => Some(80),
            Self::Https | Self::HttpsStrMatch => Some(443),
            _ => None,
        }
    }
}

impl fmt::Display for HealthCheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status reported while a CloudWatch alarm has insufficient data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsufficientDataHealthStatus {
    Healthy,
    Unhealthy,
    LastKnownStatus,
}

impl InsufficientDataHealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Unhealthy => "Unhealthy",
            Self::LastKnownStatus => "LastKnownStatus",
        }
    }
}

/// CloudWatch alarm backing a `CLOUDWATCH_METRIC` check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmIdentifier {
    pub name: String,
    pub region: String,
}

#[derive(Debug, Clone)]
pub struct HealthCheckProps {
    pub check_type: HealthCheckType,
    pub fqdn: Option<String>,
    pub ip_address: Option<String>,
    /// Defaults to 80 for HTTP and 443 for HTTPS checks
    pub port: Option<u16>,
    pub resource_path: Option<String>,
    pub search_string: Option<String>,
    pub request_interval: Option<Duration>,
    pub failure_threshold: Option<u32>,
    pub enable_sni: Option<bool>,
    pub measure_latency: Option<bool>,
    pub inverted: Option<bool>,
    pub regions: Vec<String>,
    pub child_health_checks: Vec<AttrValue>,
    pub health_threshold: Option<u32>,
    pub alarm_identifier: Option<AlarmIdentifier>,
    pub insufficient_data_health_status: Option<InsufficientDataHealthStatus>,
    pub routing_control_arn: Option<String>,
    pub tags: Vec<(String, String)>,
}

impl HealthCheckProps {
    pub fn new(check_type: HealthCheckType) -> Self {
        Self {
            check_type,
            fqdn: None,
            ip_address: None,
            port: None,
            resource_path: None,
            search_string: None,
            request_interval: None,
            failure_threshold: None,
            enable_sni: None,
            measure_latency: None,
            inverted: None,
            regions: Vec::new(),
            child_health_checks: Vec::new(),
            health_threshold: None,
            alarm_identifier: None,
            insufficient_data_health_status: None,
            routing_control_arn: None,
            tags: Vec::new(),
        }
    }

    fn validate(&self) -> ConstructResult<()> {
        let check_type = self.check_type;
        let required = |field: &str| ValidationError::RequiredForType {
            field: field.to_string(),
            check_type: check_type.to_string(),
        };
        let unsupported = |field: &str| ValidationError::UnsupportedForType {
            field: field.to_string(),
            check_type: check_type.to_string(),
        };

        if let Some(threshold) = self.failure_threshold {
            validate_failure_threshold(u64::from(threshold))?;
        }
        if let Some(interval) = self.request_interval {
            validate_request_interval(interval.as_secs())?;
        }
        validate_search_string(
            check_type.as_str(),
            check_type.matches_string(),
            self.search_string.as_deref(),
        )?;

        if check_type.is_endpoint_check() {
            if self.fqdn.is_none() && self.ip_address.is_none() {
                return Err(required("fqdn or ipAddress").into());
            }
        } else {
            for (field, present) in [
                ("fqdn", self.fqdn.is_some()),
                ("ipAddress", self.ip_address.is_some()),
                ("port", self.port.is_some()),
                ("resourcePath", self.resource_path.is_some()),
                ("requestInterval", self.request_interval.is_some()),
            ] {
                if present {
                    return Err(unsupported(field).into());
                }
            }
        }

        if check_type == HealthCheckType::Tcp && self.port.is_none() {
            return Err(required("port").into());
        }
        if self.resource_path.is_some() && !check_type.is_http() {
            return Err(unsupported("resourcePath").into());
        }
        if self.enable_sni.is_some() && !check_type.is_https() {
            return Err(unsupported("enableSni").into());
        }

        if check_type == HealthCheckType::Calculated {
            if self.child_health_checks.is_empty() {
                return Err(required("childHealthChecks").into());
            }
            let children = self.child_health_checks.len() as u64;
            validate_range("childHealthChecks", children, 1, MAX_CHILD_HEALTH_CHECKS)?;
            if let Some(threshold) = self.health_threshold {
                validate_range("healthThreshold", u64::from(threshold), 0, children)?;
            }
        } else {
            if !self.child_health_checks.is_empty() {
                return Err(unsupported("childHealthChecks").into());
            }
            if self.health_threshold.is_some() {
                return Err(unsupported("healthThreshold").into());
            }
        }

        match (check_type, self.alarm_identifier.is_some()) {
            (HealthCheckType::CloudwatchMetric, false) => {
                return Err(required("alarmIdentifier").into())
            }
            (HealthCheckType::CloudwatchMetric, true) => {}
            (_, true) => return Err(unsupported("alarmIdentifier").into()),
            (_, false) => {}
        }
        if self.insufficient_data_health_status.is_some()
            && check_type != HealthCheckType::CloudwatchMetric
        {
            return Err(unsupported("insufficientDataHealthStatus").into());
        }

        match (check_type, self.routing_control_arn.is_some()) {
            (HealthCheckType::RecoveryControl, false) => Err(required("routingControlArn").into()),
            (HealthCheckType::RecoveryControl, true) => Ok(()),
            (_, true) => Err(unsupported("routingControlArn").into()),
            (_, false) => Ok(()),
        }
    }

    fn to_config(&self) -> ConstructResult<PropertyStruct> {
        let alarm_identifier = self
            .alarm_identifier
            .as_ref()
            .map(|alarm| {
                PropertyStruct::builder(&ALARM_IDENTIFIER)
                    .field("name", alarm.name.as_str())
                    .field("region", alarm.region.as_str())
                    .build()
            })
            .transpose()?;

        let list =
            |values: &[String]| (!values.is_empty()).then(|| PropertyValue::from(values.to_vec()));
        let children = (!self.child_health_checks.is_empty())
            .then(|| PropertyValue::from(self.child_health_checks.clone()));

        PropertyStruct::builder(&HEALTH_CHECK_CONFIG)
            .field("check_type", self.check_type.as_str())
            .field_opt("fully_qualified_domain_name", self.fqdn.clone())
            .field_opt("ip_address", self.ip_address.clone())
            .field_opt("port", self.port.or_else(|| self.check_type.default_port()))
            .field_opt("resource_path", self.resource_path.clone())
            .field_opt("search_string", self.search_string.clone())
            .field_opt(
                "request_interval",
                self.request_interval.map(|interval| interval.as_secs() as i64),
            )
            .field_opt("failure_threshold", self.failure_threshold)
            .field_opt("enable_sni", self.enable_sni)
            .field_opt("measure_latency", self.measure_latency)
            .field_opt("inverted", self.inverted)
            .field_opt("regions", list(&self.regions))
            .field_opt("child_health_checks", children)
            .field_opt("health_threshold", self.health_threshold)
            .field_opt("alarm_identifier", alarm_identifier)
            .field_opt(
                "insufficient_data_health_status",
                self.insufficient_data_health_status.map(|status| status.as_str()),
            )
            .field_opt("routing_control_arn", self.routing_control_arn.clone())
            .build()
    }
}

/// A health check registered in a stack
#[derive(Debug, Clone)]
pub struct HealthCheck {
    path: ConstructPath,
    handle: ResourceHandle,
    check_type: HealthCheckType,
}

impl HealthCheck {
    pub fn new(
        stack: &mut Stack,
        scope: &ConstructPath,
        id: &str,
        props: HealthCheckProps,
    ) -> ConstructResult<Self> {
        let path = scope.child(id);
        stack.ensure_available(&path)?;
        props.validate()?;

        let tags = props
            .tags
            .iter()
            .map(|(key, value)| {
                PropertyStruct::builder(&TAG)
                    .field("key", key.as_str())
                    .field("value", value.as_str())
                    .build()
            })
            .collect::<ConstructResult<Vec<_>>>()?;

        let properties = PropertyStruct::builder(&HEALTH_CHECK_PROPERTIES)
            .field("health_check_config", props.to_config()?)
            .field_opt("health_check_tags", (!tags.is_empty()).then_some(tags))
            .build()?;

        stack.define_construct(&path)?;
        let handle = stack.define_resource(&path.child("Resource"), &HEALTH_CHECK, properties)?;
        debug!("Created {} health check at {}", props.check_type, path);

        Ok(Self {
            path,
            handle,
            check_type: props.check_type,
        })
    }

    pub fn path(&self) -> &ConstructPath {
        &self.path
    }

    pub fn handle(&self) -> &ResourceHandle {
        &self.handle
    }

    pub fn check_type(&self) -> HealthCheckType {
        self.check_type
    }

    /// `Ref` of a health check resolves to its id
    pub fn health_check_id(&self) -> AttrValue {
        self.handle.ref_token()
    }
}
