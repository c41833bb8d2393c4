//! Route53 resource model for the Composable Information Machine
//!
//! This crate models hosted zones, record sets, alias targets, health checks
//! and cross-account delegation as a construct tree, and synthesizes that
//! tree into a CloudFormation template.

pub mod delegation;
pub mod domain;
pub mod errors;
pub mod health_check;
pub mod lookup;
pub mod property;
pub mod record;
pub mod resource;
pub mod schema;
pub mod stack;
pub mod targets;
pub mod token;
pub mod zone;

// Re-export commonly used types
pub use delegation::{
    CrossAccountZoneDelegationRecord, CrossAccountZoneDelegationRecordProps, CustomResourceProvider,
};
pub use domain::{RecordType, ZoneName};
pub use errors::{ConstructError, ConstructResult};
pub use health_check::{HealthCheck, HealthCheckProps, HealthCheckType};
pub use lookup::{ContextCache, ContextProvider, HostedZoneQuery};
pub use property::{PropertyStruct, PropertyValue};
pub use record::{
    AliasRecordTarget, AliasTargetConfig, RecordSet, RecordSetOptions, RecordSetProps, RecordTarget,
};
pub use resource::{CfnResource, RemovalPolicy, ResourceHandle};
pub use stack::{ConstructPath, Environment, Stack, StackProps, Template};
pub use token::{AttrValue, Token};
pub use zone::{HostedZone, HostedZoneRef, ImportedHostedZone, PrivateHostedZone, PublicHostedZone};
