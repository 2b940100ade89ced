//! Ipregistry API data models
//!
//! Domain types returned by the API, organized by lookup family, plus the
//! response envelope shared by every operation. All records are plain
//! data: every field optional, unknown fields ignored.

mod asn;
mod ip;
mod response;
mod user_agent;

// Re-export all models for convenient access
pub use asn::{
    AsType, AutonomousSystem, AutonomousSystemPrefix, AutonomousSystemPrefixes,
    AutonomousSystemRelationships, RegionalInternetRegistry,
};
pub use ip::{
    Carrier, Company, Connection, Continent, Country, Currency, CurrencyAffixes, CurrencyFormat,
    Flag, IpInfo, Language, Location, Region, RequesterIpInfo, Security, TimeZone,
};
pub use response::{
    ApiResponse, ApiResponseCredits, ApiResponseThrottling, LookupError, LookupResult,
};
pub use user_agent::{UserAgent, UserAgentDevice, UserAgentEngine, UserAgentOperatingSystem};
