// Copyright (c) 2025 - Cowboy AI, Inc.
//! Synthesis Properties
//!
//! Templates are a pure function of the constructs defined: building the
//! same constructs twice, or rendering one template twice, yields the same
//! document.

use cim_route53::record::{determine_fully_qualified_domain_name, kinds};
use cim_route53::zone::PublicHostedZoneProps;
use cim_route53::{
    ConstructPath, PublicHostedZone, RecordSetOptions, RecordTarget, Stack, StackProps, Template,
};
use proptest::prelude::*;
use std::time::Duration;

// ============================================================================
// Strategies
// ============================================================================

#[derive(Debug, Clone)]
struct RecordSpec {
    name: String,
    addresses: Vec<String>,
    ttl: Option<u64>,
    comment: Option<String>,
}

fn label() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,9}"
}

fn address() -> impl Strategy<Value = String> {
    any::<[u8; 4]>().prop_map(|[a, b, c, d]| format!("{}.{}.{}.{}", a, b, c, d))
}

fn record_spec() -> impl Strategy<Value = RecordSpec> {
    (
        label(),
        prop::collection::vec(address(), 1..4),
        prop::option::of(60u64..86_400),
        prop::option::of("[A-Za-z ]{1,20}"),
    )
        .prop_map(|(name, addresses, ttl, comment)| RecordSpec {
            name,
            addresses,
            ttl,
            comment,
        })
}

fn zone_name() -> impl Strategy<Value = String> {
    prop::collection::vec(label(), 2..4).prop_map(|labels| labels.join("."))
}

// ============================================================================
// Helpers
// ============================================================================

fn build(zone_name: &str, records: &[RecordSpec]) -> Template {
    let mut stack = Stack::new("Property", StackProps::default());
    let zone = PublicHostedZone::new(
        &mut stack,
        &ConstructPath::root(),
        "Zone",
        PublicHostedZoneProps {
            zone_name: zone_name.to_string(),
            ..Default::default()
        },
    )
    .unwrap();

    for (index, spec) in records.iter().enumerate() {
        kinds::a_record(
            &mut stack,
            zone.path(),
            &format!("Record{}", index),
            &zone,
            RecordTarget::from_values(spec.addresses.iter().map(String::as_str)),
            RecordSetOptions {
                record_name: Some(spec.name.clone()),
                ttl: spec.ttl.map(Duration::from_secs),
                comment: spec.comment.clone(),
                ..Default::default()
            },
        )
        .unwrap();
    }

    stack.synth()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Identical construct trees synthesize identical templates
    #[test]
    fn prop_synthesis_is_deterministic(
        zone in zone_name(),
        records in prop::collection::vec(record_spec(), 0..6),
    ) {
        let first = build(&zone, &records).to_json().unwrap();
        let second = build(&zone, &records).to_json().unwrap();
        prop_assert_eq!(first, second, "Same constructs must render the same template");
    }

    /// Rendering one template repeatedly is byte-identical
    #[test]
    fn prop_render_is_idempotent(
        zone in zone_name(),
        records in prop::collection::vec(record_spec(), 0..6),
    ) {
        let template = build(&zone, &records);
        prop_assert_eq!(template.to_json().unwrap(), template.to_json().unwrap());
        prop_assert_eq!(template.to_yaml().unwrap(), template.to_yaml().unwrap());
    }

    /// One resource per construct, with one record set per record
    #[test]
    fn prop_every_record_is_rendered(
        zone in zone_name(),
        records in prop::collection::vec(record_spec(), 0..6),
    ) {
        let template = build(&zone, &records);
        prop_assert_eq!(template.resources_of_type("AWS::Route53::RecordSet").len(), records.len());
        prop_assert_eq!(template.resources_of_type("AWS::Route53::HostedZone").len(), 1);
    }

    /// Relative names are qualified under the zone with a trailing dot
    #[test]
    fn prop_relative_names_are_qualified(name in label(), zone in zone_name()) {
        let fqdn = determine_fully_qualified_domain_name(&name, &zone);
        prop_assert_eq!(fqdn, format!("{}.{}.", name, zone));
    }

    /// Names already inside the zone are only terminated
    #[test]
    fn prop_names_within_zone_are_kept(name in label(), zone in zone_name()) {
        let inside = format!("{}.{}", name, zone);
        prop_assert_eq!(
            determine_fully_qualified_domain_name(&inside, &zone),
            format!("{}.", inside)
        );
        prop_assert_eq!(
            determine_fully_qualified_domain_name(&zone, &zone),
            format!("{}.", zone)
        );
    }

    /// Absolute names pass through unchanged
    #[test]
    fn prop_absolute_names_pass_through(name in label(), zone in zone_name()) {
        let absolute = format!("{}.elsewhere.org.", name);
        prop_assert_eq!(determine_fully_qualified_domain_name(&absolute, &zone), absolute.clone());
    }
}
