// Copyright (c) 2025 - Cowboy AI, Inc.
//! Alias Record Targets
//!
//! Implementations of [`AliasRecordTarget`] for the AWS resources Route53 can
//! alias to. Each target is described by the attributes it needs (usually
//! tokens from another stack resource) rather than by the resource itself.
//!
//! | Target | DNS name | Hosted zone id |
//! |--------|----------|----------------|
//! | [`CloudFrontTarget`] | distribution domain | CloudFront zone |
//! | [`LoadBalancerTarget`] | `dualstack.` + DNS name | canonical zone |
//! | [`ClassicLoadBalancerTarget`] | `dualstack.` + DNS name | canonical zone |
//! | [`ApiGatewayDomain`] | regional / edge alias | alias zone |
//! | [`ApiGatewayDomain::from_rest_api`] | REST API's custom domain | alias zone |
//! | [`ApiGatewayDomain::from_v2_domain`] | regional domain name | regional zone |
//! | [`BucketWebsiteTarget`] | regional website endpoint | regional table |
//! | [`Route53RecordTarget`] | record domain name | record's zone |
//! | [`GlobalAcceleratorDomainTarget`] | accelerator DNS name | accelerator zone |
//! | [`GlobalAcceleratorDomainTarget::from_accelerator`] | accelerator DNS name | same |
//! | [`UserPoolDomainTarget`] | CloudFront endpoint | CloudFront zone |
//! | [`ElasticBeanstalkEnvironmentEndpointTarget`] | environment endpoint | regional table |
//! | [`InterfaceVpcEndpointTarget`] | first DNS entry | first DNS entry |

pub mod regions;

use crate::errors::{ConstructError, ConstructResult};
use crate::record::{AliasRecordTarget, AliasTargetConfig, RecordBinding, RecordSet};
use crate::token::{AttrValue, Token};
use crate::zone::HostedZoneRef;

/// Zone id of every CloudFront distribution in the commercial partition
pub const CLOUDFRONT_ZONE_ID: &str = "Z2FDTNDATAQYW2";

/// Zone id of CloudFront distributions in the China partition
pub const CLOUDFRONT_CHINA_ZONE_ID: &str = "Z3RFFRIM2A3IF5";

/// Zone id of every Global Accelerator
pub const GLOBAL_ACCELERATOR_ZONE_ID: &str = "Z2BJ6XQ5FK7U4H";

fn cloudfront_zone_id(record: &RecordBinding<'_>) -> &'static str {
    match record.stack.region().as_literal() {
        Some(region) if region.starts_with("cn-") => CLOUDFRONT_CHINA_ZONE_ID,
        _ => CLOUDFRONT_ZONE_ID,
    }
}

fn dualstack(dns_name: &AttrValue) -> AttrValue {
    AttrValue::concat([AttrValue::from("dualstack."), dns_name.clone()])
}

/// A CloudFront distribution
#[derive(Debug, Clone, PartialEq)]
pub struct CloudFrontTarget {
    pub distribution_domain_name: AttrValue,
}

impl CloudFrontTarget {
    pub fn new(distribution_domain_name: impl Into<AttrValue>) -> Self {
        Self {
            distribution_domain_name: distribution_domain_name.into(),
        }
    }
}

impl AliasRecordTarget for CloudFrontTarget {
    fn bind(
        &self,
        record: &RecordBinding<'_>,
        _zone: Option<&dyn HostedZoneRef>,
    ) -> ConstructResult<AliasTargetConfig> {
        Ok(AliasTargetConfig {
            dns_name: self.distribution_domain_name.clone(),
            hosted_zone_id: AttrValue::from(cloudfront_zone_id(record)),
        })
    }
}

/// An application or network load balancer
#[derive(Debug, Clone, PartialEq)]
pub struct LoadBalancerTarget {
    pub dns_name: AttrValue,
    pub canonical_hosted_zone_id: AttrValue,
    pub evaluate_target_health: Option<bool>,
}

impl LoadBalancerTarget {
    pub fn new(
        dns_name: impl Into<AttrValue>,
        canonical_hosted_zone_id: impl Into<AttrValue>,
    ) -> Self {
        Self {
            dns_name: dns_name.into(),
            canonical_hosted_zone_id: canonical_hosted_zone_id.into(),
            evaluate_target_health: None,
        }
    }

    pub fn with_evaluate_target_health(mut self, evaluate: bool) -> Self {
        self.evaluate_target_health = Some(evaluate);
        self
    }
}

impl AliasRecordTarget for LoadBalancerTarget {
    fn bind(
        &self,
        _record: &RecordBinding<'_>,
        _zone: Option<&dyn HostedZoneRef>,
    ) -> ConstructResult<AliasTargetConfig> {
        Ok(AliasTargetConfig {
            dns_name: dualstack(&self.dns_name),
            hosted_zone_id: self.canonical_hosted_zone_id.clone(),
        })
    }

    fn evaluate_target_health(&self) -> Option<bool> {
        self.evaluate_target_health
    }
}

/// A classic load balancer
#[derive(Debug, Clone, PartialEq)]
pub struct ClassicLoadBalancerTarget {
    pub dns_name: AttrValue,
    pub canonical_hosted_zone_name_id: AttrValue,
    pub evaluate_target_health: Option<bool>,
}

impl ClassicLoadBalancerTarget {
    pub fn new(
        dns_name: impl Into<AttrValue>,
        canonical_hosted_zone_name_id: impl Into<AttrValue>,
    ) -> Self {
        Self {
            dns_name: dns_name.into(),
            canonical_hosted_zone_name_id: canonical_hosted_zone_name_id.into(),
            evaluate_target_health: None,
        }
    }

    pub fn with_evaluate_target_health(mut self, evaluate: bool) -> Self {
        self.evaluate_target_health = Some(evaluate);
        self
    }
}

impl AliasRecordTarget for ClassicLoadBalancerTarget {
    fn bind(
        &self,
        _record: &RecordBinding<'_>,
        _zone: Option<&dyn HostedZoneRef>,
    ) -> ConstructResult<AliasTargetConfig> {
        Ok(AliasTargetConfig {
            dns_name: dualstack(&self.dns_name),
            hosted_zone_id: self.canonical_hosted_zone_name_id.clone(),
        })
    }

    fn evaluate_target_health(&self) -> Option<bool> {
        self.evaluate_target_health
    }
}

/// An API Gateway custom domain
#[derive(Debug, Clone, PartialEq)]
pub struct ApiGatewayDomain {
    pub alias_domain_name: AttrValue,
    pub alias_hosted_zone_id: AttrValue,
    pub evaluate_target_health: Option<bool>,
}

impl ApiGatewayDomain {
    pub fn new(
        alias_domain_name: impl Into<AttrValue>,
        alias_hosted_zone_id: impl Into<AttrValue>,
    ) -> Self {
        Self {
            alias_domain_name: alias_domain_name.into(),
            alias_hosted_zone_id: alias_hosted_zone_id.into(),
            evaluate_target_health: None,
        }
    }
}

/// Alias attributes of an API Gateway custom domain name resource
#[derive(Debug, Clone, PartialEq)]
pub struct DomainNameAttributes {
    pub alias_domain_name: AttrValue,
    pub alias_hosted_zone_id: AttrValue,
}

/// A REST API, described by its optional default custom domain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestApiAttributes {
    pub rest_api_name: String,
    pub domain_name: Option<DomainNameAttributes>,
}

impl ApiGatewayDomain {
    /// Alias to the default custom domain of a REST API
    pub fn from_rest_api(api: &RestApiAttributes) -> ConstructResult<Self> {
        let domain = api.domain_name.as_ref().ok_or_else(|| {
            ConstructError::invalid_argument(
                "api",
                format!("API {} does not define a default domain name", api.rest_api_name),
            )
        })?;
        Ok(Self::new(domain.alias_domain_name.clone(), domain.alias_hosted_zone_id.clone()))
    }

    /// Alias to the regional endpoint of an HTTP or WebSocket API domain
    pub fn from_v2_domain(
        regional_domain_name: impl Into<AttrValue>,
        regional_hosted_zone_id: impl Into<AttrValue>,
    ) -> Self {
        Self::new(regional_domain_name, regional_hosted_zone_id)
    }
}

impl AliasRecordTarget for ApiGatewayDomain {
    fn bind(
        &self,
        _record: &RecordBinding<'_>,
        _zone: Option<&dyn HostedZoneRef>,
    ) -> ConstructResult<AliasTargetConfig> {
        Ok(AliasTargetConfig {
            dns_name: self.alias_domain_name.clone(),
            hosted_zone_id: self.alias_hosted_zone_id.clone(),
        })
    }

    fn evaluate_target_health(&self) -> Option<bool> {
        self.evaluate_target_health
    }
}

/// An S3 bucket configured for website hosting
///
/// The bucket must live in a concrete region; by default the region of the
/// stack the record is in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketWebsiteTarget {
    pub region: Option<String>,
    pub evaluate_target_health: Option<bool>,
}

impl BucketWebsiteTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_region(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            evaluate_target_health: None,
        }
    }
}

impl AliasRecordTarget for BucketWebsiteTarget {
    fn bind(
        &self,
        record: &RecordBinding<'_>,
        _zone: Option<&dyn HostedZoneRef>,
    ) -> ConstructResult<AliasTargetConfig> {
        let region = match &self.region {
            Some(region) => region.clone(),
            None => record
                .stack
                .region()
                .as_literal()
                .map(str::to_string)
                .ok_or_else(|| {
                    ConstructError::invalid_argument(
                        "region",
                        "cannot use an S3 website alias in a region-agnostic stack",
                    )
                })?,
        };

        let unsupported = || {
            ConstructError::invalid_argument(
                "region",
                format!("bucket website target is not supported in {}", region),
            )
        };
        let dns_name = regions::s3_website_endpoint(&region).ok_or_else(unsupported)?;
        let hosted_zone_id = regions::s3_website_hosted_zone_id(&region).ok_or_else(unsupported)?;

        Ok(AliasTargetConfig {
            dns_name: AttrValue::from(dns_name),
            hosted_zone_id: AttrValue::from(hosted_zone_id),
        })
    }

    fn evaluate_target_health(&self) -> Option<bool> {
        self.evaluate_target_health
    }
}

/// Another record in the same zone
#[derive(Debug, Clone, PartialEq)]
pub struct Route53RecordTarget {
    pub domain_name: AttrValue,
}

impl Route53RecordTarget {
    pub fn new(record: &RecordSet) -> Self {
        Self {
            domain_name: record.domain_name(),
        }
    }
}

impl AliasRecordTarget for Route53RecordTarget {
    fn bind(
        &self,
        record: &RecordBinding<'_>,
        zone: Option<&dyn HostedZoneRef>,
    ) -> ConstructResult<AliasTargetConfig> {
        let zone = zone.ok_or_else(|| {
            ConstructError::invalid_argument(
                "zone",
                format!("cannot bind {} to another record without a zone", record.path),
            )
        })?;
        Ok(AliasTargetConfig {
            dns_name: self.domain_name.clone(),
            hosted_zone_id: zone.hosted_zone_id(),
        })
    }
}

/// A Global Accelerator, by DNS name
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalAcceleratorDomainTarget {
    pub accelerator_dns_name: AttrValue,
}

/// A Global Accelerator resource
#[derive(Debug, Clone, PartialEq)]
pub struct AcceleratorAttributes {
    pub accelerator_arn: AttrValue,
    pub dns_name: AttrValue,
}

impl GlobalAcceleratorDomainTarget {
    pub fn new(accelerator_dns_name: impl Into<AttrValue>) -> Self {
        Self {
            accelerator_dns_name: accelerator_dns_name.into(),
        }
    }

    /// Alias to an accelerator's DNS name
    pub fn from_accelerator(accelerator: &AcceleratorAttributes) -> Self {
        Self::new(accelerator.dns_name.clone())
    }
}

impl AliasRecordTarget for GlobalAcceleratorDomainTarget {
    fn bind(
        &self,
        _record: &RecordBinding<'_>,
        _zone: Option<&dyn HostedZoneRef>,
    ) -> ConstructResult<AliasTargetConfig> {
        Ok(AliasTargetConfig {
            dns_name: self.accelerator_dns_name.clone(),
            hosted_zone_id: AttrValue::from(GLOBAL_ACCELERATOR_ZONE_ID),
        })
    }
}

/// A Cognito user pool custom domain
#[derive(Debug, Clone, PartialEq)]
pub struct UserPoolDomainTarget {
    pub cloudfront_endpoint: AttrValue,
}

impl UserPoolDomainTarget {
    pub fn new(cloudfront_endpoint: impl Into<AttrValue>) -> Self {
        Self {
            cloudfront_endpoint: cloudfront_endpoint.into(),
        }
    }
}

impl AliasRecordTarget for UserPoolDomainTarget {
    fn bind(
        &self,
        record: &RecordBinding<'_>,
        _zone: Option<&dyn HostedZoneRef>,
    ) -> ConstructResult<AliasTargetConfig> {
        Ok(AliasTargetConfig {
            dns_name: self.cloudfront_endpoint.clone(),
            hosted_zone_id: AttrValue::from(cloudfront_zone_id(record)),
        })
    }
}

/// An Elastic Beanstalk environment endpoint such as
/// `my-env.us-east-1.elasticbeanstalk.com`
#[derive(Debug, Clone, PartialEq)]
pub struct ElasticBeanstalkEnvironmentEndpointTarget {
    pub environment_endpoint: AttrValue,
    pub evaluate_target_health: Option<bool>,
}

impl ElasticBeanstalkEnvironmentEndpointTarget {
    pub fn new(environment_endpoint: impl Into<AttrValue>) -> Self {
        Self {
            environment_endpoint: environment_endpoint.into(),
            evaluate_target_health: None,
        }
    }
}

impl AliasRecordTarget for ElasticBeanstalkEnvironmentEndpointTarget {
    fn bind(
        &self,
        _record: &RecordBinding<'_>,
        _zone: Option<&dyn HostedZoneRef>,
    ) -> ConstructResult<AliasTargetConfig> {
        let endpoint = self.environment_endpoint.as_literal().ok_or_else(|| {
            ConstructError::invalid_argument(
                "environment_endpoint",
                "the environment endpoint must be a literal host name, not a token",
            )
        })?;

        let labels: Vec<&str> = endpoint.trim_end_matches('.').split('.').collect();
        let region = labels
            .len()
            .checked_sub(3)
            .and_then(|index| labels.get(index))
            .copied()
            .unwrap_or_default();

        let hosted_zone_id = regions::elastic_beanstalk_hosted_zone_id(region).ok_or_else(|| {
            ConstructError::invalid_argument(
                "environment_endpoint",
                format!(
                    "Elastic Beanstalk environment target is not supported for the '{}' region",
                    region
                ),
            )
        })?;

        Ok(AliasTargetConfig {
            dns_name: AttrValue::from(endpoint),
            hosted_zone_id: AttrValue::from(hosted_zone_id),
        })
    }

    fn evaluate_target_health(&self) -> Option<bool> {
        self.evaluate_target_health
    }
}

/// An interface VPC endpoint
///
/// `dns_entries` is the endpoint's `DnsEntries` attribute, whose entries have
/// the form `<zone id>:<dns name>`. A literal entry is split now; a token is
/// split by CloudFormation.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceVpcEndpointTarget {
    pub dns_entries: AttrValue,
}

impl InterfaceVpcEndpointTarget {
    pub fn new(dns_entries: impl Into<AttrValue>) -> Self {
        Self {
            dns_entries: dns_entries.into(),
        }
    }
}

impl AliasRecordTarget for InterfaceVpcEndpointTarget {
    fn bind(
        &self,
        _record: &RecordBinding<'_>,
        _zone: Option<&dyn HostedZoneRef>,
    ) -> ConstructResult<AliasTargetConfig> {
        if let Some(entry) = self.dns_entries.as_literal() {
            let (zone_id, dns_name) = entry.split_once(':').ok_or_else(|| {
                ConstructError::invalid_argument(
                    "dns_entries",
                    format!("expected '<zone id>:<dns name>', got '{}'", entry),
                )
            })?;
            return Ok(AliasTargetConfig {
                dns_name: AttrValue::from(dns_name),
                hosted_zone_id: AttrValue::from(zone_id),
            });
        }

        let first_entry = AttrValue::Token(Token::Select {
            index: 0,
            list: Box::new(self.dns_entries.clone()),
        });
        let part = |index: usize| {
            AttrValue::Token(Token::Select {
                index,
                list: Box::new(AttrValue::Token(Token::Split {
                    delimiter: ":".to_string(),
                    source: Box::new(first_entry.clone()),
                })),
            })
        };
        Ok(AliasTargetConfig {
            dns_name: part(1),
            hosted_zone_id: part(0),
        })
    }
}
