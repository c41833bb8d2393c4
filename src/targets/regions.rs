// Copyright (c) 2025 - Cowboy AI, Inc.
//! Per-region endpoint facts used by alias targets

/// Regions whose S3 website endpoint uses the legacy `s3-website-<region>` form
const LEGACY_S3_WEBSITE_REGIONS: [&str; 9] = [
    "us-east-1",
    "us-west-1",
    "us-west-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-northeast-1",
    "eu-west-1",
    "sa-east-1",
    "us-gov-west-1",
];

/// Route53 zone ids of the S3 website endpoints
const S3_WEBSITE_ZONE_IDS: [(&str, &str); 24] = [
    ("af-south-1", "Z83WF9RJE8B12"),
    ("ap-east-1", "ZNB98KWMFR0R6"),
    ("ap-northeast-1", "Z2M4EHUR26P7ZW"),
    ("ap-northeast-2", "Z3W03O7B5YMIYP"),
    ("ap-northeast-3", "Z2YQB5RD63NC85"),
    ("ap-south-1", "Z11RGJOFQNVJUP"),
    ("ap-southeast-1", "Z3O0J2DXBE1FTB"),
    ("ap-southeast-2", "Z1WCIGYICN2BYD"),
    ("ca-central-1", "Z1QDHH18159H29"),
    ("cn-northwest-1", "Z282HJ1KT0DH03"),
    ("eu-central-1", "Z21DNDUVLTQW6Q"),
    ("eu-north-1", "Z3BAZG2TWCNX0D"),
    ("eu-south-1", "Z30OZKI7KPW7MI"),
    ("eu-west-1", "Z1BKCTXD74EZPE"),
    ("eu-west-2", "Z3GKZC51ZF0DB4"),
    ("eu-west-3", "Z3R1K369G5AVDG"),
    ("me-south-1", "Z1MPMWCPA7YB62"),
    ("sa-east-1", "Z7KQH4QJS55SO"),
    ("us-east-1", "Z3AQBSTGFYJSTF"),
    ("us-east-2", "Z2O1EMRO9K5GLX"),
    ("us-gov-east-1", "Z2NIFVYYW2VKV1"),
    ("us-gov-west-1", "Z31GFT0UA1I2HV"),
    ("us-west-1", "Z2F56UZL2M1ACD"),
    ("us-west-2", "Z3BJ6K6RIION7M"),
];

/// Route53 zone ids of the Elastic Beanstalk environment endpoints
const ELASTIC_BEANSTALK_ZONE_IDS: [(&str, &str); 23] = [
    ("af-south-1", "Z1EI3BVKMKK4AM"),
    ("ap-east-1", "ZPWYUBWRU171A"),
    ("ap-northeast-1", "Z1R25G3KIG2GBW"),
    ("ap-northeast-2", "Z3JE5OI70TWKCP"),
    ("ap-northeast-3", "ZNE5GEY1TIAGY"),
    ("ap-south-1", "Z18NTBI3Y7N9TZ"),
    ("ap-southeast-1", "Z16FZ9L249IFLT"),
    ("ap-southeast-2", "Z2PCDNR3VC2G1N"),
    ("ca-central-1", "ZJFCZL7SSZB5I"),
    ("eu-central-1", "Z1FRNW7UH4DEZJ"),
    ("eu-north-1", "Z23GO28BZ5AETM"),
    ("eu-south-1", "Z10VDYYOA2JFKM"),
    ("eu-west-1", "Z2NYPWQ7DFZAZH"),
    ("eu-west-2", "Z1GKAAAUGATPF1"),
    ("eu-west-3", "Z5WN6GAYWG5OB"),
    ("me-south-1", "Z2BBTEKR2I36N2"),
    ("sa-east-1", "Z10X7K2B4QSOFV"),
    ("us-east-1", "Z117KPS5GTRQ2G"),
    ("us-east-2", "Z14LCN19Q5QHIC"),
    ("us-gov-east-1", "Z35TSARG0EJ4VU"),
    ("us-gov-west-1", "Z4KAURWC4UUUG"),
    ("us-west-1", "Z1LQECGX5PH1X"),
    ("us-west-2", "Z38NKT9BP95V3O"),
];

fn find(table: &[(&'static str, &'static str)], region: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(name, _)| *name == region)
        .map(|(_, zone_id)| *zone_id)
}

/// Domain suffix of a region's partition
fn domain_suffix(region: &str) -> &'static str {
    if region.starts_with("cn-") {
        "amazonaws.com.cn"
    } else {
        "amazonaws.com"
    }
}

/// S3 website endpoint host for a region
pub fn s3_website_endpoint(region: &str) -> Option<String> {
    find(&S3_WEBSITE_ZONE_IDS, region)?;
    let separator = if LEGACY_S3_WEBSITE_REGIONS.contains(&region) {
        '-'
    } else {
        '.'
    };
    Some(format!(
        "s3-website{}{}.{}",
        separator,
        region,
        domain_suffix(region)
    ))
}

/// Zone id of a region's S3 website endpoint
pub fn s3_website_hosted_zone_id(region: &str) -> Option<&'static str> {
    find(&S3_WEBSITE_ZONE_IDS, region)
}

/// Zone id of a region's Elastic Beanstalk environment endpoints
pub fn elastic_beanstalk_hosted_zone_id(region: &str) -> Option<&'static str> {
    find(&ELASTIC_BEANSTALK_ZONE_IDS, region)
}
