// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-route53
//!
//! Provides deterministic stacks and zones for synthesis and lookup tests.
//! Account ids, regions and zone names are fixed constants so rendered
//! templates are reproducible.
#![allow(dead_code)]

use cim_route53::zone::{PublicHostedZone, PublicHostedZoneProps};
use cim_route53::{ConstructPath, Environment, Stack, StackProps};

pub const CHILD_ACCOUNT: &str = "111111111111";
pub const REGION: &str = "us-east-1";

pub const ZONE_NAME: &str = "example.com";
pub const CHILD_ZONE_NAME: &str = "dev.example.com";

pub const DELEGATION_ROLE_ARN: &str = "arn:aws:iam::222222222222:role/Route53Delegation";
pub const PROVIDER_SERVICE_TOKEN: &str =
    "arn:aws:lambda:us-east-1:111111111111:function:CrossAccountZoneDelegation";

/// Install a test-writer subscriber once; later calls are ignored
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Stack with no account or region
pub fn agnostic_stack() -> Stack {
    init_tracing();
    Stack::new("DnsStack", StackProps::default())
}

/// Stack deployed to the child account
pub fn env_stack() -> Stack {
    init_tracing();
    Stack::new(
        "DnsStack",
        StackProps {
            env: Environment::new(CHILD_ACCOUNT, REGION),
            description: Some("DNS for example.com".to_string()),
        },
    )
}

/// Public zone at the stack root
pub fn public_zone(stack: &mut Stack, id: &str, zone_name: &str) -> PublicHostedZone {
    PublicHostedZone::new(
        stack,
        &ConstructPath::root(),
        id,
        PublicHostedZoneProps {
            zone_name: zone_name.to_string(),
            ..Default::default()
        },
    )
    .expect("Invalid zone fixture")
}
