// Copyright (c) 2025 - Cowboy AI, Inc.
//! Route53 Schema Tables
//!
//! Property names follow the CloudFormation resource reference for the
//! `AWS::Route53::*` types exactly; a mismatch here deploys something other
//! than what the caller described.

use super::{AttributeSpec, FieldSpec as F, FieldType as T, ResourceSchema, StructSchema};

// ============================================================================
// Shared nested blocks
// ============================================================================

pub static TAG: StructSchema = StructSchema {
    name: "Tag",
    fields: &[
        F::required("key", "Key", T::String),
        F::required("value", "Value", T::String),
    ],
};

// ============================================================================
// AWS::Route53::HostedZone
// ============================================================================

pub static HOSTED_ZONE_CONFIG: StructSchema = StructSchema {
    name: "AWS::Route53::HostedZone.HostedZoneConfig",
    fields: &[F::optional("comment", "Comment", T::String)],
};

pub static QUERY_LOGGING_CONFIG: StructSchema = StructSchema {
    name: "AWS::Route53::HostedZone.QueryLoggingConfig",
    fields: &[F::required(
        "cloud_watch_logs_log_group_arn",
        "CloudWatchLogsLogGroupArn",
        T::String,
    )],
};

pub static VPC: StructSchema = StructSchema {
    name: "AWS::Route53::HostedZone.VPC",
    fields: &[
        F::required("vpc_id", "VPCId", T::String),
        F::required("vpc_region", "VPCRegion", T::String),
    ],
};

pub static HOSTED_ZONE_PROPERTIES: StructSchema = StructSchema {
    name: "AWS::Route53::HostedZone",
    fields: &[
        F::required("name", "Name", T::String),
        F::optional("hosted_zone_config", "HostedZoneConfig", T::Struct(&HOSTED_ZONE_CONFIG)),
        F::optional("hosted_zone_tags", "HostedZoneTags", T::StructList(&TAG)),
        F::optional("query_logging_config", "QueryLoggingConfig", T::Struct(&QUERY_LOGGING_CONFIG)),
        F::optional("vpcs", "VPCs", T::StructList(&VPC)),
    ],
};

pub static HOSTED_ZONE: ResourceSchema = ResourceSchema {
    type_name: "AWS::Route53::HostedZone",
    properties: &HOSTED_ZONE_PROPERTIES,
    attributes: &[
        AttributeSpec { name: "Id", list: false },
        AttributeSpec { name: "NameServers", list: true },
    ],
};

// ============================================================================
// AWS::Route53::RecordSet
// ============================================================================

pub static ALIAS_TARGET: StructSchema = StructSchema {
    name: "AWS::Route53::RecordSet.AliasTarget",
    fields: &[
        F::required("dns_name", "DNSName", T::String),
        F::required("hosted_zone_id", "HostedZoneId", T::String),
        F::optional("evaluate_target_health", "EvaluateTargetHealth", T::Boolean),
    ],
};

pub static GEO_LOCATION: StructSchema = StructSchema {
    name: "AWS::Route53::RecordSet.GeoLocation",
    fields: &[
        F::optional("continent_code", "ContinentCode", T::String),
        F::optional("country_code", "CountryCode", T::String),
        F::optional("subdivision_code", "SubdivisionCode", T::String),
    ],
};

pub static CIDR_ROUTING_CONFIG: StructSchema = StructSchema {
    name: "AWS::Route53::RecordSet.CidrRoutingConfig",
    fields: &[
        F::required("collection_id", "CollectionId", T::String),
        F::required("location_name", "LocationName", T::String),
    ],
};

pub static RECORD_SET_PROPERTIES: StructSchema = StructSchema {
    name: "AWS::Route53::RecordSet",
    fields: &RECORD_SET_FIELDS,
};

static RECORD_SET_FIELDS: [F; 16] = [
    F::required("name", "Name", T::String),
    F::required("record_type", "Type", T::String),
    F::optional("alias_target", "AliasTarget", T::Struct(&ALIAS_TARGET)),
    F::optional("cidr_routing_config", "CidrRoutingConfig", T::Struct(&CIDR_ROUTING_CONFIG)),
    F::optional("comment", "Comment", T::String),
    F::optional("failover", "Failover", T::String),
    F::optional("geo_location", "GeoLocation", T::Struct(&GEO_LOCATION)),
    F::optional("health_check_id", "HealthCheckId", T::String),
    F::optional("hosted_zone_id", "HostedZoneId", T::String),
    F::optional("hosted_zone_name", "HostedZoneName", T::String),
    F::optional("multi_value_answer", "MultiValueAnswer", T::Boolean),
    F::optional("region", "Region", T::String),
    F::optional("resource_records", "ResourceRecords", T::StringList),
    F::optional("set_identifier", "SetIdentifier", T::String),
    F::optional("ttl", "TTL", T::String),
    F::optional("weight", "Weight", T::Number),
];

pub static RECORD_SET: ResourceSchema = ResourceSchema {
    type_name: "AWS::Route53::RecordSet",
    properties: &RECORD_SET_PROPERTIES,
    attributes: &[],
};

// ============================================================================
// AWS::Route53::RecordSetGroup
// ============================================================================

/// A record set embedded in a group; same rows as the standalone resource
pub static RECORD_SET_GROUP_MEMBER: StructSchema = StructSchema {
    name: "AWS::Route53::RecordSetGroup.RecordSet",
    fields: &RECORD_SET_FIELDS,
};

pub static RECORD_SET_GROUP_PROPERTIES: StructSchema = StructSchema {
    name: "AWS::Route53::RecordSetGroup",
    fields: &[
        F::optional("comment", "Comment", T::String),
        F::optional("hosted_zone_id", "HostedZoneId", T::String),
        F::optional("hosted_zone_name", "HostedZoneName", T::String),
        F::optional("record_sets", "RecordSets", T::StructList(&RECORD_SET_GROUP_MEMBER)),
    ],
};

pub static RECORD_SET_GROUP: ResourceSchema = ResourceSchema {
    type_name: "AWS::Route53::RecordSetGroup",
    properties: &RECORD_SET_GROUP_PROPERTIES,
    attributes: &[],
};

// ============================================================================
// AWS::Route53::HealthCheck
// ============================================================================

pub static ALARM_IDENTIFIER: StructSchema = StructSchema {
    name: "AWS::Route53::HealthCheck.AlarmIdentifier",
    fields: &[
        F::required("name", "Name", T::String),
        F::required("region", "Region", T::String),
    ],
};

pub static HEALTH_CHECK_CONFIG: StructSchema = StructSchema {
    name: "AWS::Route53::HealthCheck.HealthCheckConfig",
    fields: &[
        F::required("check_type", "Type", T::String),
        F::optional("alarm_identifier", "AlarmIdentifier", T::Struct(&ALARM_IDENTIFIER)),
        F::optional("child_health_checks", "ChildHealthChecks", T::StringList),
        F::optional("enable_sni", "EnableSNI", T::Boolean),
        F::optional("failure_threshold", "FailureThreshold", T::Number),
        F::optional("fully_qualified_domain_name", "FullyQualifiedDomainName", T::String),
        F::optional("health_threshold", "HealthThreshold", T::Number),
        F::optional(
            "insufficient_data_health_status",
            "InsufficientDataHealthStatus",
            T::String,
        ),
        F::optional("inverted", "Inverted", T::Boolean),
        F::optional("ip_address", "IPAddress", T::String),
        F::optional("measure_latency", "MeasureLatency", T::Boolean),
        F::optional("port", "Port", T::Number),
        F::optional("regions", "Regions", T::StringList),
        F::optional("request_interval", "RequestInterval", T::Number),
        F::optional("resource_path", "ResourcePath", T::String),
        F::optional("routing_control_arn", "RoutingControlArn", T::String),
        F::optional("search_string", "SearchString", T::String),
    ],
};

pub static HEALTH_CHECK_PROPERTIES: StructSchema = StructSchema {
    name: "AWS::Route53::HealthCheck",
    fields: &[
        F::required("health_check_config", "HealthCheckConfig", T::Struct(&HEALTH_CHECK_CONFIG)),
        F::optional("health_check_tags", "HealthCheckTags", T::StructList(&TAG)),
    ],
};

pub static HEALTH_CHECK: ResourceSchema = ResourceSchema {
    type_name: "AWS::Route53::HealthCheck",
    properties: &HEALTH_CHECK_PROPERTIES,
    attributes: &[AttributeSpec {
        name: "HealthCheckId",
        list: false,
    }],
};

// ============================================================================
// DNSSEC
// ============================================================================

pub static DNSSEC_PROPERTIES: StructSchema = StructSchema {
    name: "AWS::Route53::DNSSEC",
    fields: &[F::required("hosted_zone_id", "HostedZoneId", T::String)],
};

pub static DNSSEC: ResourceSchema = ResourceSchema {
    type_name: "AWS::Route53::DNSSEC",
    properties: &DNSSEC_PROPERTIES,
    attributes: &[],
};

pub static KEY_SIGNING_KEY_PROPERTIES: StructSchema = StructSchema {
    name: "AWS::Route53::KeySigningKey",
    fields: &[
        F::required("hosted_zone_id", "HostedZoneId", T::String),
        F::required("key_management_service_arn", "KeyManagementServiceArn", T::String),
        F::required("name", "Name", T::String),
        F::required("status", "Status", T::String),
    ],
};

pub static KEY_SIGNING_KEY: ResourceSchema = ResourceSchema {
    type_name: "AWS::Route53::KeySigningKey",
    properties: &KEY_SIGNING_KEY_PROPERTIES,
    attributes: &[],
};

// ============================================================================
// AWS::Route53::CidrCollection
// ============================================================================

pub static CIDR_LOCATION: StructSchema = StructSchema {
    name: "AWS::Route53::CidrCollection.Location",
    fields: &[
        F::required("cidr_list", "CidrList", T::StringList),
        F::required("location_name", "LocationName", T::String),
    ],
};

pub static CIDR_COLLECTION_PROPERTIES: StructSchema = StructSchema {
    name: "AWS::Route53::CidrCollection",
    fields: &[
        F::required("name", "Name", T::String),
        F::optional("locations", "Locations", T::StructList(&CIDR_LOCATION)),
    ],
};

pub static CIDR_COLLECTION: ResourceSchema = ResourceSchema {
    type_name: "AWS::Route53::CidrCollection",
    properties: &CIDR_COLLECTION_PROPERTIES,
    attributes: &[
        AttributeSpec { name: "Arn", list: false },
        AttributeSpec { name: "Id", list: false },
    ],
};

// ============================================================================
// Custom::CrossAccountZoneDelegation
// ============================================================================

pub static CROSS_ACCOUNT_ZONE_DELEGATION_PROPERTIES: StructSchema = StructSchema {
    name: "Custom::CrossAccountZoneDelegation",
    fields: &[
        F::required("service_token", "ServiceToken", T::String),
        F::required("assume_role_arn", "AssumeRoleArn", T::String),
        F::optional("assume_role_region", "AssumeRoleRegion", T::String),
        F::optional("parent_zone_name", "ParentZoneName", T::String),
        F::optional("parent_zone_id", "ParentZoneId", T::String),
        F::required("delegated_zone_name", "DelegatedZoneName", T::String),
        F::required("delegated_zone_name_servers", "DelegatedZoneNameServers", T::StringList),
        F::required("ttl", "TTL", T::Number),
    ],
};

pub static CROSS_ACCOUNT_ZONE_DELEGATION: ResourceSchema = ResourceSchema {
    type_name: "Custom::CrossAccountZoneDelegation",
    properties: &CROSS_ACCOUNT_ZONE_DELEGATION_PROPERTIES,
    attributes: &[],
};

/// Every property table, for table-wide checks
pub static ALL_STRUCTS: &[&StructSchema] = &[
    &TAG,
    &HOSTED_ZONE_CONFIG,
    &QUERY_LOGGING_CONFIG,
    &VPC,
    &HOSTED_ZONE_PROPERTIES,
    &ALIAS_TARGET,
    &GEO_LOCATION,
    &CIDR_ROUTING_CONFIG,
    &RECORD_SET_PROPERTIES,
    &RECORD_SET_GROUP_MEMBER,
    &RECORD_SET_GROUP_PROPERTIES,
    &ALARM_IDENTIFIER,
    &HEALTH_CHECK_CONFIG,
    &HEALTH_CHECK_PROPERTIES,
    &DNSSEC_PROPERTIES,
    &KEY_SIGNING_KEY_PROPERTIES,
    &CIDR_LOCATION,
    &CIDR_COLLECTION_PROPERTIES,
    &CROSS_ACCOUNT_ZONE_DELEGATION_PROPERTIES,
];

/// Every resource table
pub static ALL_RESOURCES: &[&ResourceSchema] = &[
    &HOSTED_ZONE,
    &RECORD_SET,
    &RECORD_SET_GROUP,
    &HEALTH_CHECK,
    &DNSSEC,
    &KEY_SIGNING_KEY,
    &CIDR_COLLECTION,
    &CROSS_ACCOUNT_ZONE_DELEGATION,
];
