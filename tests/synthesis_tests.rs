// Copyright (c) 2025 - Cowboy AI, Inc.
//! Synthesis Tests
//!
//! End-to-end construction of zones, records, health checks and delegation,
//! checked against the rendered CloudFormation template.

mod fixtures;

use anyhow::Result;
use cim_route53::delegation::ParentZone;
use cim_route53::record::kinds;
use cim_route53::targets::{CloudFrontTarget, LoadBalancerTarget, Route53RecordTarget};
use cim_route53::zone::{HostedZoneAttributes, PublicHostedZoneProps, ZoneDelegationOptions};
use cim_route53::{
    AttrValue, ConstructError, ConstructPath, CrossAccountZoneDelegationRecord,
    CrossAccountZoneDelegationRecordProps, CustomResourceProvider, HealthCheck, HealthCheckProps,
    HealthCheckType, HostedZone, HostedZoneRef, PublicHostedZone, RecordSetOptions, RecordTarget,
    RemovalPolicy, Token,
};
use fixtures::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;

#[test]
fn test_a_record_with_default_ttl() -> Result<()> {
    let mut stack = agnostic_stack();
    let zone = public_zone(&mut stack, "Zone", ZONE_NAME);

    let record = kinds::a_record(
        &mut stack,
        zone.path(),
        "Www",
        &zone,
        RecordTarget::from_values(["1.2.3.4"]),
        RecordSetOptions {
            record_name: Some("www".to_string()),
            ..Default::default()
        },
    )?;

    let template = stack.synth();
    let records = template.resources_of_type("AWS::Route53::RecordSet");
    assert_eq!(records.len(), 1);
    let (logical_id, block) = records[0];
    assert_eq!(logical_id, record.handle().logical_id);
    assert_eq!(
        block["Properties"],
        json!({
            "HostedZoneId": {"Ref": zone.handle().logical_id},
            "Name": "www.example.com.",
            "ResourceRecords": ["1.2.3.4"],
            "TTL": "1800",
            "Type": "A"
        })
    );
    Ok(())
}

#[test]
fn test_ttl_out_of_range_is_rejected() -> Result<()> {
    let mut stack = agnostic_stack();
    let zone = public_zone(&mut stack, "Zone", ZONE_NAME);
    let huge = RecordSetOptions {
        ttl: Some(Duration::from_secs(u64::MAX)),
        ..Default::default()
    };

    let a_record = kinds::a_record(
        &mut stack,
        zone.path(),
        "Www",
        &zone,
        RecordTarget::from_values(["1.2.3.4"]),
        huge.clone(),
    );
    assert!(matches!(a_record, Err(ConstructError::Validation(_))));

    let delegation = kinds::zone_delegation_record(
        &mut stack,
        zone.path(),
        "Dev",
        &zone,
        RecordTarget::from_values(["ns-1.example.net"]),
        RecordSetOptions {
            record_name: Some("dev".to_string()),
            ..huge
        },
    );
    assert!(matches!(delegation, Err(ConstructError::Validation(_))));
    assert_eq!(stack.synth().resources.len(), 1);
    Ok(())
}

#[test]
fn test_weighted_records_share_name() -> Result<()> {
    let mut stack = agnostic_stack();
    let zone = public_zone(&mut stack, "Zone", ZONE_NAME);

    for (id, set_identifier, weight, address) in
        [("Blue", "blue", 80, "10.0.0.1"), ("Green", "green", 20, "10.0.0.2")]
    {
        kinds::a_record(
            &mut stack,
            zone.path(),
            id,
            &zone,
            RecordTarget::from_values([address]),
            RecordSetOptions {
                record_name: Some("api".to_string()),
                set_identifier: Some(set_identifier.to_string()),
                weight: Some(weight),
                ..Default::default()
            },
        )?;
    }

    let template = stack.synth();
    let records = template.resources_of_type("AWS::Route53::RecordSet");
    assert_eq!(records.len(), 2);

    let props: Vec<_> = records.iter().map(|(_, block)| &block["Properties"]).collect();
    for p in &props {
        assert_eq!(p["Name"], json!("api.example.com."));
        assert_eq!(p["Type"], json!("A"));
        assert_eq!(p["HostedZoneId"], json!({"Ref": zone.handle().logical_id}));
    }
    assert_ne!(props[0]["SetIdentifier"], props[1]["SetIdentifier"]);
    assert_ne!(props[0]["Weight"], props[1]["Weight"]);

    let mut weights: Vec<i64> = props.iter().filter_map(|p| p["Weight"].as_i64()).collect();
    weights.sort();
    assert_eq!(weights, vec![20, 80]);
    Ok(())
}

#[test]
fn test_cross_account_delegation_by_parent_name() -> Result<()> {
    let mut stack = env_stack();
    let child = public_zone(&mut stack, "DevZone", CHILD_ZONE_NAME);

    let delegation = CrossAccountZoneDelegationRecord::new(
        &mut stack,
        &ConstructPath::root(),
        "Delegate",
        CrossAccountZoneDelegationRecordProps {
            delegated_zone: &child,
            parent_hosted_zone_name: Some(ZONE_NAME.to_string()),
            parent_hosted_zone_id: None,
            delegation_role_arn: AttrValue::from(DELEGATION_ROLE_ARN),
            assume_role_region: None,
            provider: CustomResourceProvider::from_service_token(PROVIDER_SERVICE_TOKEN),
            ttl: None,
            removal_policy: None,
        },
    )?;

    let request = delegation.delegation_request();
    assert_eq!(request.parent_zone, ParentZone::Name(ZONE_NAME.to_string()));
    assert_eq!(request.ttl, Duration::from_secs(172_800));
    assert_eq!(request.removal_policy, RemovalPolicy::Destroy);

    let template = stack.synth();
    let block = template
        .resource(&delegation.handle().logical_id)
        .expect("delegation resource rendered");
    assert_eq!(
        block,
        &json!({
            "Type": "Custom::CrossAccountZoneDelegation",
            "Properties": {
                "AssumeRoleArn": DELEGATION_ROLE_ARN,
                "DelegatedZoneName": CHILD_ZONE_NAME,
                "DelegatedZoneNameServers": {
                    "Fn::GetAtt": [child.handle().logical_id, "NameServers"]
                },
                "ParentZoneName": ZONE_NAME,
                "ServiceToken": PROVIDER_SERVICE_TOKEN,
                "TTL": 172800
            },
            "DeletionPolicy": "Delete",
            "UpdateReplacePolicy": "Delete"
        })
    );
    Ok(())
}

#[test]
fn test_retained_delegation_by_parent_id() -> Result<()> {
    let mut stack = env_stack();
    let child = public_zone(&mut stack, "DevZone", CHILD_ZONE_NAME);

    let delegation = CrossAccountZoneDelegationRecord::new(
        &mut stack,
        &ConstructPath::root(),
        "Delegate",
        CrossAccountZoneDelegationRecordProps {
            delegated_zone: &child,
            parent_hosted_zone_name: None,
            parent_hosted_zone_id: Some(AttrValue::from("Z0PARENT")),
            delegation_role_arn: AttrValue::from(DELEGATION_ROLE_ARN),
            assume_role_region: Some("us-west-2".to_string()),
            provider: CustomResourceProvider::from_service_token(PROVIDER_SERVICE_TOKEN),
            ttl: Some(Duration::from_secs(3600)),
            removal_policy: Some(RemovalPolicy::Retain),
        },
    )?;

    let block = stack
        .synth()
        .resource(&delegation.handle().logical_id)
        .cloned()
        .expect("delegation resource rendered");
    assert_eq!(block["Properties"]["ParentZoneId"], json!("Z0PARENT"));
    assert!(block["Properties"].get("ParentZoneName").is_none());
    assert_eq!(block["Properties"]["AssumeRoleRegion"], json!("us-west-2"));
    assert_eq!(block["Properties"]["TTL"], json!(3600));
    assert_eq!(block["DeletionPolicy"], json!("Retain"));
    Ok(())
}

#[test]
fn test_render_twice_is_identical() -> Result<()> {
    let mut stack = env_stack();
    let zone = public_zone(&mut stack, "Zone", ZONE_NAME);
    kinds::txt_record(
        &mut stack,
        zone.path(),
        "Verify",
        &zone,
        &["google-site-verification=abc"],
        RecordSetOptions::default(),
    )?;

    let first = stack.synth();
    let second = stack.synth();
    assert_eq!(first.to_json()?, second.to_json()?);
    assert_eq!(first.to_yaml()?, second.to_yaml()?);
    Ok(())
}

#[test]
fn test_setter_round_trip_through_template() -> Result<()> {
    let mut stack = agnostic_stack();
    let zone = public_zone(&mut stack, "Zone", ZONE_NAME);
    let record = kinds::cname_record(
        &mut stack,
        zone.path(),
        "Docs",
        &zone,
        "docs.example.net",
        RecordSetOptions {
            record_name: Some("docs".to_string()),
            ..Default::default()
        },
    )?;

    let before = stack.synth().resource(&record.handle().logical_id).cloned();
    stack
        .resource_mut(record.handle())?
        .set("comment", "managed by cim-route53")?;
    let after = stack.synth().resource(&record.handle().logical_id).cloned();

    let mut expected = before.expect("record rendered");
    expected["Properties"]["Comment"] = json!("managed by cim-route53");
    assert_eq!(after, Some(expected));
    Ok(())
}

#[test]
fn test_imported_zone_name_only_fails_on_access() -> Result<()> {
    let mut stack = agnostic_stack();
    let by_id =
        HostedZone::from_hosted_zone_id(&mut stack, &ConstructPath::root(), "ById", "Z0001")?;

    assert_eq!(by_id.hosted_zone_id(), AttrValue::from("Z0001"));
    let _ = by_id.hosted_zone_arn();
    assert!(matches!(
        by_id.zone_name(),
        Err(ConstructError::AttributeUnavailable { .. })
    ));

    let result = kinds::a_record(
        &mut stack,
        by_id.path(),
        "Www",
        &by_id,
        RecordTarget::from_values(["1.2.3.4"]),
        RecordSetOptions::default(),
    );
    assert!(matches!(result, Err(ConstructError::AttributeUnavailable { .. })));

    let by_attributes = HostedZone::from_hosted_zone_attributes(
        &mut stack,
        &ConstructPath::root(),
        "ByAttributes",
        HostedZoneAttributes {
            hosted_zone_id: "Z0002".to_string(),
            zone_name: ZONE_NAME.to_string(),
        },
    )?;
    assert_eq!(by_attributes.zone_name()?, ZONE_NAME);
    kinds::a_record(
        &mut stack,
        by_attributes.path(),
        "Www",
        &by_attributes,
        RecordTarget::from_values(["1.2.3.4"]),
        RecordSetOptions::default(),
    )?;

    let template = stack.synth();
    assert!(template.resources_of_type("AWS::Route53::HostedZone").is_empty());
    assert_eq!(template.resources_of_type("AWS::Route53::RecordSet").len(), 1);
    Ok(())
}

#[test]
fn test_conflicting_record_target_rejected() {
    let both = RecordTarget::try_new(
        Some(vec![AttrValue::from("1.2.3.4")]),
        Some(Box::new(CloudFrontTarget::new("d1.cloudfront.net"))),
    );
    assert!(matches!(both, Err(ConstructError::ConflictingRecordTarget)));
}

#[test]
fn test_alias_records() -> Result<()> {
    let mut stack = agnostic_stack();
    let zone = public_zone(&mut stack, "Zone", ZONE_NAME);

    let apex = kinds::a_record(
        &mut stack,
        zone.path(),
        "Apex",
        &zone,
        RecordTarget::from_alias(
            LoadBalancerTarget::new(
                Token::get_att("Alb", "DNSName"),
                Token::get_att("Alb", "CanonicalHostedZoneID"),
            )
            .with_evaluate_target_health(true),
        ),
        RecordSetOptions::default(),
    )?;

    let www = kinds::a_record(
        &mut stack,
        zone.path(),
        "WwwAlias",
        &zone,
        RecordTarget::from_alias(Route53RecordTarget::new(&apex)),
        RecordSetOptions {
            record_name: Some("www".to_string()),
            ..Default::default()
        },
    )?;

    let template = stack.synth();
    let apex_props = &template.resource(&apex.handle().logical_id).expect("apex")["Properties"];
    assert_eq!(
        apex_props["AliasTarget"],
        json!({
            "DNSName": {"Fn::Join": ["", ["dualstack.", {"Fn::GetAtt": ["Alb", "DNSName"]}]]},
            "EvaluateTargetHealth": true,
            "HostedZoneId": {"Fn::GetAtt": ["Alb", "CanonicalHostedZoneID"]}
        })
    );
    assert!(apex_props.get("TTL").is_none());

    let www_props = &template.resource(&www.handle().logical_id).expect("www")["Properties"];
    assert_eq!(
        www_props["AliasTarget"],
        json!({
            "DNSName": {"Ref": apex.handle().logical_id},
            "HostedZoneId": {"Ref": zone.handle().logical_id}
        })
    );
    Ok(())
}

#[test]
fn test_caa_amazon_and_delegation_from_public_zone() -> Result<()> {
    let mut stack = agnostic_stack();
    let parent = PublicHostedZone::new(
        &mut stack,
        &ConstructPath::root(),
        "Parent",
        PublicHostedZoneProps {
            zone_name: ZONE_NAME.to_string(),
            caa_amazon: true,
            ..Default::default()
        },
    )?;
    let child = public_zone(&mut stack, "Child", CHILD_ZONE_NAME);

    let delegation = parent.add_delegation(&mut stack, &child, ZoneDelegationOptions::default())?;

    let template = stack.synth();
    let records = template.resources_of_type("AWS::Route53::RecordSet");
    assert_eq!(records.len(), 2);

    let caa = records
        .iter()
        .find(|(_, block)| block["Properties"]["Type"] == json!("CAA"))
        .expect("CAA record");
    assert_eq!(caa.1["Properties"]["ResourceRecords"], json!(["0 issue \"amazon.com\""]));

    let ns = &template.resource(&delegation.handle().logical_id).expect("NS")["Properties"];
    assert_eq!(ns["Name"], json!("dev.example.com."));
    assert_eq!(ns["TTL"], json!("172800"));
    assert_eq!(
        ns["ResourceRecords"],
        json!({"Fn::GetAtt": [child.handle().logical_id, "NameServers"]})
    );
    Ok(())
}

#[test]
fn test_health_check_gates_record() -> Result<()> {
    let mut stack = agnostic_stack();
    let zone = public_zone(&mut stack, "Zone", ZONE_NAME);
    let check = HealthCheck::new(
        &mut stack,
        &ConstructPath::root(),
        "ApiHealth",
        HealthCheckProps {
            fqdn: Some("api.example.com".to_string()),
            ..HealthCheckProps::new(HealthCheckType::Http)
        },
    )?;

    let record = kinds::a_record(
        &mut stack,
        zone.path(),
        "Api",
        &zone,
        RecordTarget::from_values(["192.0.2.1", "192.0.2.2"]),
        RecordSetOptions {
            record_name: Some("api".to_string()),
            multi_value_answer: Some(true),
            health_check_id: Some(check.health_check_id()),
            ..Default::default()
        },
    )?;

    let template = stack.synth();
    let props = &template.resource(&record.handle().logical_id).expect("record")["Properties"];
    assert_eq!(props["HealthCheckId"], json!({"Ref": check.handle().logical_id}));
    assert_eq!(props["MultiValueAnswer"], json!(true));
    assert!(props["SetIdentifier"].as_str().unwrap_or_default().starts_with("MVA_ID_"));
    Ok(())
}

#[test]
fn test_duplicate_record_id_rejected() -> Result<()> {
    let mut stack = agnostic_stack();
    let zone = public_zone(&mut stack, "Zone", ZONE_NAME);
    let options = RecordSetOptions::default();

    let first = RecordTarget::from_values(["1.1.1.1"]);
    kinds::a_record(&mut stack, zone.path(), "Www", &zone, first, options.clone())?;
    let second = RecordTarget::from_values(["2.2.2.2"]);
    let second = kinds::a_record(&mut stack, zone.path(), "Www", &zone, second, options);
    assert!(matches!(second, Err(ConstructError::DuplicateConstructId { .. })));
    Ok(())
}

#[test]
fn test_explicit_removal() -> Result<()> {
    let mut stack = agnostic_stack();
    let zone = public_zone(&mut stack, "Zone", ZONE_NAME);
    let record = kinds::a_record(
        &mut stack,
        zone.path(),
        "Www",
        &zone,
        RecordTarget::from_values(["1.1.1.1"]),
        RecordSetOptions::default(),
    )?;
    assert_eq!(stack.synth().resources.len(), 2);

    assert!(stack.remove(record.path())?);
    assert_eq!(stack.synth().resources.len(), 1);

    assert!(stack.remove(zone.path())?);
    assert!(stack.synth().resources.is_empty());
    Ok(())
}

#[test]
fn test_removal_refused_while_referenced() -> Result<()> {
    let mut stack = agnostic_stack();
    let zone = public_zone(&mut stack, "Zone", ZONE_NAME);
    let record = kinds::a_record(
        &mut stack,
        &ConstructPath::root(),
        "Www",
        &zone,
        RecordTarget::from_values(["1.1.1.1"]),
        RecordSetOptions::default(),
    )?;
    let before = stack.synth().to_json()?;

    let result = stack.remove(zone.path());
    assert_eq!(
        result,
        Err(ConstructError::StillReferenced {
            path: "Zone".to_string(),
            logical_id: zone.handle().logical_id.clone(),
            referenced_by: record.handle().logical_id.clone(),
        })
    );
    assert_eq!(stack.synth().to_json()?, before);
    assert!(stack.contains(zone.path()));

    assert!(stack.remove(record.path())?);
    assert!(stack.remove(zone.path())?);
    assert!(stack.synth().resources.is_empty());
    Ok(())
}

#[test]
fn test_template_document_shapes() -> Result<()> {
    let mut stack = env_stack();
    public_zone(&mut stack, "Zone", ZONE_NAME);
    let template = stack.synth();

    let document: serde_json::Value = serde_json::from_str(&template.to_json()?)?;
    assert_eq!(document["Description"], json!("DNS for example.com"));
    assert_eq!(document["Resources"].as_object().map(|r| r.len()), Some(1));

    let yaml = template.to_yaml()?;
    assert!(yaml.contains("Resources:"));
    assert!(yaml.contains("AWS::Route53::HostedZone"));
    assert!(yaml.contains("example.com."));
    Ok(())
}
