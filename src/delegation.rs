// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cross-Account Zone Delegation
//!
//! A child zone in one account is delegated from a parent zone in another
//! account by a custom resource. At deploy time the provider assumes the
//! delegation role in the parent account and upserts an NS record for the
//! child zone; on deletion it removes the record again.
//!
//! This module decides what that provider is asked to do:
//!
//! ```text
//! CrossAccountZoneDelegationRecord ──render──► Custom::CrossAccountZoneDelegation
//!          │                                     ServiceToken, AssumeRoleArn,
//!          │                                     ParentZoneName | ParentZoneId,
//!          │                                     DelegatedZoneName, ..., TTL
//!          └──delegation_request()──► DelegationRequest ──► change batch
//! ```

use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::domain::invariants::validate_ttl;
use crate::errors::{ConstructError, ConstructResult};
use crate::property::PropertyStruct;
use crate::record::kinds::ZONE_DELEGATION_TTL;
use crate::resource::{RemovalPolicy, ResourceHandle};
use crate::schema::route53::{
    CROSS_ACCOUNT_ZONE_DELEGATION, CROSS_ACCOUNT_ZONE_DELEGATION_PROPERTIES,
};
use crate::stack::{ConstructPath, Stack};
use crate::token::AttrValue;
use crate::zone::HostedZoneRef;

/// The custom resource provider that performs the delegation
#[derive(Debug, Clone, PartialEq)]
pub struct CustomResourceProvider {
    pub service_token: AttrValue,
}

impl CustomResourceProvider {
    pub fn from_service_token(service_token: impl Into<AttrValue>) -> Self {
        Self {
            service_token: service_token.into(),
        }
    }
}

/// How the parent zone is identified
#[derive(Debug, Clone, PartialEq)]
pub enum ParentZone {
    Name(String),
    Id(AttrValue),
}

#[derive(Debug)]
pub struct CrossAccountZoneDelegationRecordProps<'a> {
    /// The child zone whose name servers are published in the parent
    pub delegated_zone: &'a dyn HostedZoneRef,
    pub parent_hosted_zone_name: Option<String>,
    pub parent_hosted_zone_id: Option<AttrValue>,
    /// Role in the parent account allowed to change the parent zone
    pub delegation_role_arn: AttrValue,
    /// Region for the STS call; the provider's default when absent
    pub assume_role_region: Option<String>,
    pub provider: CustomResourceProvider,
    /// Defaults to two days
    pub ttl: Option<Duration>,
    /// Defaults to [`RemovalPolicy::Destroy`]
    pub removal_policy: Option<RemovalPolicy>,
}

/// The work the delegation provider performs
#[derive(Debug, Clone, PartialEq)]
pub struct DelegationRequest {
    pub assume_role_arn: AttrValue,
    pub assume_role_region: Option<String>,
    pub parent_zone: ParentZone,
    pub delegated_zone_name: String,
    pub delegated_zone_name_servers: AttrValue,
    pub ttl: Duration,
    pub removal_policy: RemovalPolicy,
}

/// Route53 change action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    Upsert,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeBatch {
    pub changes: Vec<Change>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Change {
    pub action: ChangeAction,
    pub resource_record_set: ChangeRecordSet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeRecordSet {
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "TTL")]
    pub ttl: u64,
    pub resource_records: serde_json::Value,
}

impl DelegationRequest {
    /// Change batch the provider submits against the parent zone
    ///
    /// Name servers that are still tokens render as intrinsics.
    pub fn change_batch(&self, action: ChangeAction) -> ChangeBatch {
        ChangeBatch {
            changes: vec![Change {
                action,
                resource_record_set: ChangeRecordSet {
                    name: self.delegated_zone_name.clone(),
                    record_type: "NS".to_string(),
                    ttl: self.ttl.as_secs(),
                    resource_records: match &self.delegated_zone_name_servers {
                        AttrValue::Literal(value) => serde_json::json!([{ "Value": value }]),
                        AttrValue::Token(token) => token.to_json(),
                    },
                },
            }],
        }
    }

    /// Action taken when the construct is deleted, if any
    pub fn deletion_action(&self) -> Option<ChangeAction> {
        match self.removal_policy {
            RemovalPolicy::Destroy => Some(ChangeAction::Delete),
            RemovalPolicy::Retain | RemovalPolicy::Snapshot => None,
        }
    }
}

/// NS record for a child zone, written into a parent zone in another account
#[derive(Debug, Clone)]
pub struct CrossAccountZoneDelegationRecord {
    path: ConstructPath,
    handle: ResourceHandle,
    request: DelegationRequest,
}

impl CrossAccountZoneDelegationRecord {
    pub fn new(
        stack: &mut Stack,
        scope: &ConstructPath,
        id: &str,
        props: CrossAccountZoneDelegationRecordProps<'_>,
    ) -> ConstructResult<Self> {
        let path = scope.child(id);
        stack.ensure_available(&path)?;

        let parent_zone = match (props.parent_hosted_zone_name, props.parent_hosted_zone_id) {
            (Some(_), Some(_)) => {
                return Err(ConstructError::invalid_argument(
                    "parent_hosted_zone_name",
                    "only one of parent_hosted_zone_name and parent_hosted_zone_id is supported",
                ))
            }
            (None, None) => {
                return Err(ConstructError::invalid_argument(
                    "parent_hosted_zone_name",
                    "one of parent_hosted_zone_name or parent_hosted_zone_id is required",
                ))
            }
            (Some(name), None) => ParentZone::Name(name),
            (None, Some(id)) => ParentZone::Id(id),
        };

        let ttl = props.ttl.unwrap_or(ZONE_DELEGATION_TTL);
        validate_ttl(ttl.as_secs())?;
        let ttl_seconds = i64::try_from(ttl.as_secs()).map_err(|_| {
            ConstructError::invalid_argument("ttl", "TTL does not fit in a signed 64-bit value")
        })?;

        let delegated_zone_name = props.delegated_zone.zone_name()?.to_string();
        let name_servers = props.delegated_zone.name_servers().ok_or_else(|| {
            ConstructError::AttributeUnavailable {
                construct: delegated_zone_name.clone(),
                attribute: "name_servers".to_string(),
                reason: "the delegated zone does not have name servers".to_string(),
            }
        })?;

        let request = DelegationRequest {
            assume_role_arn: props.delegation_role_arn,
            assume_role_region: props.assume_role_region,
            parent_zone,
            delegated_zone_name,
            delegated_zone_name_servers: name_servers,
            ttl,
            removal_policy: props.removal_policy.unwrap_or_default(),
        };

        let (parent_zone_name, parent_zone_id) = match &request.parent_zone {
            ParentZone::Name(name) => (Some(name.clone()), None),
            ParentZone::Id(id) => (None, Some(id.clone())),
        };
        let properties = PropertyStruct::builder(&CROSS_ACCOUNT_ZONE_DELEGATION_PROPERTIES)
            .field("service_token", props.provider.service_token)
            .field("assume_role_arn", &request.assume_role_arn)
            .field_opt("assume_role_region", request.assume_role_region.clone())
            .field_opt("parent_zone_name", parent_zone_name)
            .field_opt("parent_zone_id", parent_zone_id)
            .field("delegated_zone_name", request.delegated_zone_name.as_str())
            .field("delegated_zone_name_servers", &request.delegated_zone_name_servers)
            .field("ttl", ttl_seconds)
            .build()?;

        stack.define_construct(&path)?;
        let handle = stack.define_resource(
            &path.child("Resource"),
            &CROSS_ACCOUNT_ZONE_DELEGATION,
            properties,
        )?;
        stack
            .resource_mut(&handle)?
            .apply_removal_policy(request.removal_policy);
        debug!(
            "Created cross-account delegation for {} at {}",
            request.delegated_zone_name, path
        );

        Ok(Self {
            path,
            handle,
            request,
        })
    }

    pub fn path(&self) -> &ConstructPath {
        &self.path
    }

    pub fn handle(&self) -> &ResourceHandle {
        &self.handle
    }

    pub fn delegation_request(&self) -> &DelegationRequest {
        &self.request
    }
}
