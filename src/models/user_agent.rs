//! Parsed user-agent records

use serde::{Deserialize, Serialize};

/// Parsed `User-Agent` header
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserAgent {
    /// The raw header the record was parsed from
    pub header: Option<String>,

    /// Agent name, for example `Chrome`
    pub name: Option<String>,

    /// Agent category, for example `browser` or `crawler`
    pub r#type: Option<String>,

    pub version: Option<String>,

    pub version_major: Option<String>,

    pub device: Option<UserAgentDevice>,

    pub engine: Option<UserAgentEngine>,

    pub os: Option<UserAgentOperatingSystem>,
}

/// Device the agent runs on
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserAgentDevice {
    pub brand: Option<String>,
    pub name: Option<String>,
    /// Form factor, for example `desktop` or `smartphone`
    pub r#type: Option<String>,
}

/// Rendering engine of the agent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserAgentEngine {
    pub name: Option<String>,
    pub r#type: Option<String>,
    pub version: Option<String>,
    pub version_major: Option<String>,
}

/// Operating system the agent runs on
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserAgentOperatingSystem {
    pub name: Option<String>,
    pub r#type: Option<String>,
    pub version: Option<String>,
}
