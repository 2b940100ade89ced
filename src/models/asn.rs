//! Autonomous System records

use serde::{Deserialize, Serialize};

/// Category of an Autonomous System
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsType {
    Business,
    Education,
    Government,
    Hosting,
    Inactive,
    Isp,
}

/// Regional Internet Registry an AS or prefix is registered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegionalInternetRegistry {
    Afrinic,
    Apnic,
    Arin,
    Jpnic,
    Krnic,
    Lacnic,
    RipeNcc,
    Twnic,
}

/// One prefix announced by an Autonomous System
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutonomousSystemPrefix {
    pub cidr: Option<String>,
    pub country_code: Option<String>,
    pub network_name: Option<String>,
    pub organization: Option<String>,
    pub prefix: Option<String>,
    pub registry: Option<RegionalInternetRegistry>,
    /// Number of addresses covered by the prefix
    pub size: Option<u128>,
    pub status: Option<String>,
}

/// Prefixes announced by an Autonomous System
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutonomousSystemPrefixes {
    pub ipv4_count: Option<u64>,
    pub ipv6_count: Option<u64>,
    pub ipv4: Option<Vec<AutonomousSystemPrefix>>,
    pub ipv6: Option<Vec<AutonomousSystemPrefix>>,
}

/// Peering relationships of an Autonomous System, as ASN lists
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutonomousSystemRelationships {
    pub downstreams: Option<Vec<u32>>,
    pub peers: Option<Vec<u32>>,
    pub upstreams: Option<Vec<u32>>,
}

/// Full record returned for one Autonomous System
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutonomousSystem {
    /// Allocation date, ISO 8601
    pub allocated: Option<String>,

    /// The AS number itself
    pub asn: Option<u32>,

    /// Country the AS is registered in, ISO 3166-1 alpha-2
    pub country_code: Option<String>,

    pub domain: Option<String>,

    pub name: Option<String>,

    pub prefixes: Option<AutonomousSystemPrefixes>,

    pub relationships: Option<AutonomousSystemRelationships>,

    pub registry: Option<RegionalInternetRegistry>,

    pub r#type: Option<AsType>,

    /// Date the registration was last updated, ISO 8601
    pub updated: Option<String>,
}
