// Copyright (c) 2025 - Cowboy AI, Inc.
//! Hosted Zones
//!
//! Three kinds of zone sit behind the [`HostedZoneRef`] capability:
//!
//! - [`HostedZone`] / [`PublicHostedZone`] / [`PrivateHostedZone`] own an
//!   `AWS::Route53::HostedZone` resource and expose deferred attributes
//! - [`ImportedHostedZone`] stands in for a zone created elsewhere; it is
//!   registered in the construct tree but never rendered
//!
//! Records, alias targets and delegation accept `&dyn HostedZoneRef`, so
//! owned and imported zones are interchangeable.

use std::fmt;
use tracing::debug;

use crate::domain::ZoneName;
use crate::errors::{ConstructError, ConstructResult};
use crate::lookup::{self, ContextProvider, HostedZoneQuery};
use crate::property::{PropertyStruct, PropertyValue};
use crate::record::{kinds, RecordSet, RecordSetOptions, RecordTarget};
use crate::resource::ResourceHandle;
use crate::schema::route53::{
    HOSTED_ZONE, HOSTED_ZONE_CONFIG, HOSTED_ZONE_PROPERTIES, QUERY_LOGGING_CONFIG, VPC,
};
use crate::stack::{ConstructPath, Stack};
use crate::token::{AttrValue, PseudoParameter, Token};

/// Capability shared by every zone a record can live in
pub trait HostedZoneRef: fmt::Debug {
    /// Zone id; a `Ref` token for zones created in this stack
    fn hosted_zone_id(&self) -> AttrValue;

    /// Zone name without the trailing dot
    ///
    /// Fails with [`ConstructError::AttributeUnavailable`] for zones imported
    /// by id alone.
    fn zone_name(&self) -> ConstructResult<&str>;

    /// `arn:${Partition}:route53:::hostedzone/${Id}`
    fn hosted_zone_arn(&self) -> AttrValue {
        AttrValue::concat([
            AttrValue::from("arn:"),
            AttrValue::Token(Token::Pseudo(PseudoParameter::Partition)),
            AttrValue::from(":route53:::hostedzone/"),
            self.hosted_zone_id(),
        ])
    }

    /// List-valued name server token; `None` where Route53 assigns none
    fn name_servers(&self) -> Option<AttrValue> {
        None
    }
}

/// A VPC a private zone is associated with
#[derive(Debug, Clone, PartialEq)]
pub struct Vpc {
    pub vpc_id: AttrValue,
    pub region: AttrValue,
}

impl Vpc {
    pub fn new(vpc_id: impl Into<AttrValue>, region: impl Into<AttrValue>) -> Self {
        Self {
            vpc_id: vpc_id.into(),
            region: region.into(),
        }
    }

    /// VPC in the stack's own region
    pub fn in_stack_region(stack: &Stack, vpc_id: impl Into<AttrValue>) -> Self {
        Self::new(vpc_id, stack.region())
    }

    fn to_property(&self) -> ConstructResult<PropertyStruct> {
        PropertyStruct::builder(&VPC)
            .field("vpc_id", &self.vpc_id)
            .field("vpc_region", &self.region)
            .build()
    }
}

/// Options shared by every zone kind
#[derive(Debug, Clone, Default)]
pub struct HostedZoneProps {
    /// Domain name, without a trailing dot
    pub zone_name: String,
    pub comment: Option<String>,
    /// CloudWatch Logs log group receiving DNS query logs
    pub query_logs_log_group_arn: Option<String>,
    /// VPCs for a private zone; empty for a public one
    pub vpcs: Vec<Vpc>,
}

/// A zone owned by this stack
#[derive(Debug, Clone)]
pub struct HostedZone {
    path: ConstructPath,
    handle: ResourceHandle,
    zone_name: ZoneName,
    vpcs: Vec<Vpc>,
}

impl HostedZone {
    pub fn new(
        stack: &mut Stack,
        scope: &ConstructPath,
        id: &str,
        props: HostedZoneProps,
    ) -> ConstructResult<Self> {
        let zone_name = ZoneName::new(props.zone_name.as_str())?;

        let hosted_zone_config = props
            .comment
            .as_deref()
            .map(|comment| {
                PropertyStruct::builder(&HOSTED_ZONE_CONFIG)
                    .field("comment", comment)
                    .build()
            })
            .transpose()?;
        let query_logging_config = props
            .query_logs_log_group_arn
            .as_deref()
            .map(|arn| {
                PropertyStruct::builder(&QUERY_LOGGING_CONFIG)
                    .field("cloud_watch_logs_log_group_arn", arn)
                    .build()
            })
            .transpose()?;

        let properties = PropertyStruct::builder(&HOSTED_ZONE_PROPERTIES)
            .field("name", zone_name.fully_qualified())
            .field_opt("hosted_zone_config", hosted_zone_config)
            .field_opt("query_logging_config", query_logging_config)
            .field_opt("vpcs", vpc_list(&props.vpcs)?)
            .build()?;

        let path = scope.child(id);
        stack.define_construct(&path)?;
        let handle = stack.define_resource(&path.child("Resource"), &HOSTED_ZONE, properties)?;
        debug!("Created hosted zone {} at {}", zone_name, path);

        Ok(Self {
            path,
            handle,
            zone_name,
            vpcs: props.vpcs,
        })
    }

    /// Import a zone by id; its name stays unknown
    pub fn from_hosted_zone_id(
        stack: &mut Stack,
        scope: &ConstructPath,
        id: &str,
        hosted_zone_id: impl Into<String>,
    ) -> ConstructResult<ImportedHostedZone> {
        ImportedHostedZone::register(stack, scope, id, hosted_zone_id.into(), None)
    }

    /// Import a zone by id and name
    pub fn from_hosted_zone_attributes(
        stack: &mut Stack,
        scope: &ConstructPath,
        id: &str,
        attributes: HostedZoneAttributes,
    ) -> ConstructResult<ImportedHostedZone> {
        if attributes.zone_name.is_empty() {
            return Err(ConstructError::MissingRequiredField {
                kind: "HostedZoneAttributes".to_string(),
                field: "zone_name".to_string(),
            });
        }
        let zone_name = ZoneName::new(attributes.zone_name.trim_end_matches('.'))?;
        ImportedHostedZone::register(
            stack,
            scope,
            id,
            attributes.hosted_zone_id,
            Some(zone_name),
        )
    }

    /// Import a zone resolved through the deployment context
    ///
    /// Requires the stack to have a concrete account and region. A cache miss
    /// is recorded on the stack and answered with a placeholder zone.
    pub fn from_lookup(
        stack: &mut Stack,
        scope: &ConstructPath,
        id: &str,
        query: HostedZoneQuery,
        context: &dyn ContextProvider,
    ) -> ConstructResult<ImportedHostedZone> {
        stack.ensure_available(&scope.child(id))?;
        let found = lookup::find_hosted_zone(stack, &query, context)?;
        let zone_name = ZoneName::new(found.zone_name.trim_end_matches('.'))?;
        ImportedHostedZone::register(stack, scope, id, found.hosted_zone_id, Some(zone_name))
    }

    pub fn path(&self) -> &ConstructPath {
        &self.path
    }

    /// The underlying `AWS::Route53::HostedZone` resource
    pub fn handle(&self) -> &ResourceHandle {
        &self.handle
    }

    pub fn vpcs(&self) -> &[Vpc] {
        &self.vpcs
    }

    /// Associate another VPC
    pub fn add_vpc(&mut self, stack: &mut Stack, vpc: Vpc) -> ConstructResult<()> {
        let mut vpcs = self.vpcs.clone();
        vpcs.push(vpc);
        let rendered = vpc_list(&vpcs)?.unwrap_or_else(|| PropertyValue::List(Vec::new()));
        stack.resource_mut(&self.handle)?.set("vpcs", rendered)?;
        self.vpcs = vpcs;
        Ok(())
    }
}

fn vpc_list(vpcs: &[Vpc]) -> ConstructResult<Option<PropertyValue>> {
    if vpcs.is_empty() {
        return Ok(None);
    }
    let items = vpcs
        .iter()
        .map(Vpc::to_property)
        .collect::<ConstructResult<Vec<_>>>()?;
    Ok(Some(PropertyValue::from(items)))
}

impl HostedZoneRef for HostedZone {
    fn hosted_zone_id(&self) -> AttrValue {
        self.handle.ref_token()
    }

    fn zone_name(&self) -> ConstructResult<&str> {
        Ok(self.zone_name.as_str())
    }

    fn name_servers(&self) -> Option<AttrValue> {
        if self.vpcs.is_empty() {
            self.handle.get_att("NameServers").ok()
        } else {
            None
        }
    }
}

/// Options for [`PublicHostedZone`]
#[derive(Debug, Clone, Default)]
pub struct PublicHostedZoneProps {
    pub zone_name: String,
    pub comment: Option<String>,
    pub query_logs_log_group_arn: Option<String>,
    /// Add a CAA record restricting certificate issuance to Amazon
    pub caa_amazon: bool,
}

/// Options for [`PublicHostedZone::add_delegation`]
#[derive(Debug, Clone, Default)]
pub struct ZoneDelegationOptions {
    pub comment: Option<String>,
    /// Defaults to two days
    pub ttl: Option<std::time::Duration>,
}

/// Internet-facing zone
#[derive(Debug, Clone)]
pub struct PublicHostedZone {
    zone: HostedZone,
}

impl PublicHostedZone {
    pub fn new(
        stack: &mut Stack,
        scope: &ConstructPath,
        id: &str,
        props: PublicHostedZoneProps,
    ) -> ConstructResult<Self> {
        let zone = HostedZone::new(
            stack,
            scope,
            id,
            HostedZoneProps {
                zone_name: props.zone_name,
                comment: props.comment,
                query_logs_log_group_arn: props.query_logs_log_group_arn,
                vpcs: Vec::new(),
            },
        )?;

        let public = Self { zone };
        if props.caa_amazon {
            kinds::caa_amazon_record(
                stack,
                public.path(),
                "CaaAmazon",
                &public,
                RecordSetOptions::default(),
            )?;
        }
        Ok(public)
    }

    pub fn path(&self) -> &ConstructPath {
        self.zone.path()
    }

    pub fn handle(&self) -> &ResourceHandle {
        self.zone.handle()
    }

    /// Delegate a child zone by adding an NS record for it in this zone
    pub fn add_delegation(
        &self,
        stack: &mut Stack,
        delegate: &dyn HostedZoneRef,
        options: ZoneDelegationOptions,
    ) -> ConstructResult<RecordSet> {
        let delegate_name = delegate.zone_name()?.to_string();
        let name_servers = delegate
            .name_servers()
            .ok_or_else(|| ConstructError::AttributeUnavailable {
                construct: delegate_name.clone(),
                attribute: "name_servers".to_string(),
                reason: "only public zones created in this stack expose name servers".to_string(),
            })?;

        let id = format!("{} -> {}", self.zone.zone_name, delegate_name);
        kinds::zone_delegation_record(
            stack,
            self.path(),
            &id,
            self,
            RecordTarget::from_attr_list(name_servers),
            RecordSetOptions {
                record_name: Some(delegate_name),
                comment: options.comment,
                ttl: options.ttl,
                ..Default::default()
            },
        )
    }
}

impl HostedZoneRef for PublicHostedZone {
    fn hosted_zone_id(&self) -> AttrValue {
        self.zone.hosted_zone_id()
    }

    fn zone_name(&self) -> ConstructResult<&str> {
        self.zone.zone_name()
    }

    fn name_servers(&self) -> Option<AttrValue> {
        self.zone.name_servers()
    }
}

/// Options for [`PrivateHostedZone`]
#[derive(Debug, Clone)]
pub struct PrivateHostedZoneProps {
    pub zone_name: String,
    pub comment: Option<String>,
    pub query_logs_log_group_arn: Option<String>,
    /// First VPC the zone is visible from
    pub vpc: Vpc,
}

/// Zone answering only inside associated VPCs
#[derive(Debug, Clone)]
pub struct PrivateHostedZone {
    zone: HostedZone,
}

impl PrivateHostedZone {
    pub fn new(
        stack: &mut Stack,
        scope: &ConstructPath,
        id: &str,
        props: PrivateHostedZoneProps,
    ) -> ConstructResult<Self> {
        let zone = HostedZone::new(
            stack,
            scope,
            id,
            HostedZoneProps {
                zone_name: props.zone_name,
                comment: props.comment,
                query_logs_log_group_arn: props.query_logs_log_group_arn,
                vpcs: vec![props.vpc],
            },
        )?;
        Ok(Self { zone })
    }

    pub fn path(&self) -> &ConstructPath {
        self.zone.path()
    }

    pub fn handle(&self) -> &ResourceHandle {
        self.zone.handle()
    }

    pub fn vpcs(&self) -> &[Vpc] {
        self.zone.vpcs()
    }

    pub fn add_vpc(&mut self, stack: &mut Stack, vpc: Vpc) -> ConstructResult<()> {
        self.zone.add_vpc(stack, vpc)
    }
}

impl HostedZoneRef for PrivateHostedZone {
    fn hosted_zone_id(&self) -> AttrValue {
        self.zone.hosted_zone_id()
    }

    fn zone_name(&self) -> ConstructResult<&str> {
        self.zone.zone_name()
    }
}

/// Identifying attributes of an existing zone
#[derive(Debug, Clone, Default)]
pub struct HostedZoneAttributes {
    pub hosted_zone_id: String,
    pub zone_name: String,
}

/// Read-only stand-in for a zone this stack does not own
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedHostedZone {
    path: ConstructPath,
    hosted_zone_id: String,
    zone_name: Option<ZoneName>,
}

impl ImportedHostedZone {
    fn register(
        stack: &mut Stack,
        scope: &ConstructPath,
        id: &str,
        hosted_zone_id: String,
        zone_name: Option<ZoneName>,
    ) -> ConstructResult<Self> {
        if hosted_zone_id.is_empty() {
            return Err(ConstructError::MissingRequiredField {
                kind: "HostedZoneAttributes".to_string(),
                field: "hosted_zone_id".to_string(),
            });
        }

        let path = scope.child(id);
        stack.define_construct(&path)?;
        debug!("Imported hosted zone {} at {}", hosted_zone_id, path);
        Ok(Self {
            path,
            hosted_zone_id,
            zone_name,
        })
    }

    pub fn path(&self) -> &ConstructPath {
        &self.path
    }
}

impl HostedZoneRef for ImportedHostedZone {
    fn hosted_zone_id(&self) -> AttrValue {
        AttrValue::from(&self.hosted_zone_id)
    }

    fn zone_name(&self) -> ConstructResult<&str> {
        self.zone_name
            .as_ref()
            .map(ZoneName::as_str)
            .ok_or_else(|| ConstructError::AttributeUnavailable {
                construct: self.path.to_string(),
                attribute: "zone_name".to_string(),
                reason: "a zone imported by id alone has no known name; \
                         import it with from_hosted_zone_attributes instead"
                    .to_string(),
            })
    }
}
