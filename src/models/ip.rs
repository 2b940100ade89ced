//! IP address records
//!
//! The full geolocation and threat record returned for an IP lookup.
//! Every field is optional: the server omits whatever the plan or the
//! `fields` option excludes, and unknown fields are ignored so new API
//! attributes never break decoding.

use serde::{Deserialize, Serialize};

use super::user_agent::UserAgent;

/// Full record returned for one IP address
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IpInfo {
    /// The looked-up address
    pub ip: Option<String>,

    /// Address family, `IPv4` or `IPv6`
    pub r#type: Option<String>,

    /// Reverse-resolved hostname, only with the `hostname` option
    pub hostname: Option<String>,

    /// Mobile carrier operating the address
    pub carrier: Option<Carrier>,

    /// Organization the address is registered to
    pub company: Option<Company>,

    /// Autonomous system and routing details
    pub connection: Option<Connection>,

    /// Currency in use where the address is located
    pub currency: Option<Currency>,

    /// Geographic location
    pub location: Option<Location>,

    /// Threat intelligence flags
    pub security: Option<Security>,

    /// Time zone at the location
    pub time_zone: Option<TimeZone>,
}

/// Record returned for an origin lookup: the caller's own address,
/// extended with its parsed `User-Agent` header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequesterIpInfo {
    pub ip: Option<String>,
    pub r#type: Option<String>,
    pub hostname: Option<String>,
    pub carrier: Option<Carrier>,
    pub company: Option<Company>,
    pub connection: Option<Connection>,
    pub currency: Option<Currency>,
    pub location: Option<Location>,
    pub security: Option<Security>,
    pub time_zone: Option<TimeZone>,

    /// Parsed `User-Agent` header of the requester
    pub user_agent: Option<UserAgent>,
}

/// Mobile carrier details
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Carrier {
    pub name: Option<String>,
    /// Mobile country code
    pub mcc: Option<String>,
    /// Mobile network code
    pub mnc: Option<String>,
}

/// Organization an address is registered to
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Company {
    pub domain: Option<String>,
    pub name: Option<String>,
    /// Category such as `business`, `education`, `hosting`, or `isp`
    pub r#type: Option<String>,
}

/// Autonomous system and routing details for an address
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Connection {
    pub asn: Option<u32>,
    pub domain: Option<String>,
    pub organization: Option<String>,
    /// Announced route covering the address
    pub route: Option<String>,
    pub r#type: Option<String>,
}

/// Prefix and suffix applied when formatting a monetary amount
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrencyAffixes {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

/// How negative and positive amounts are written
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub negative: Option<CurrencyAffixes>,
    pub positive: Option<CurrencyAffixes>,
}

/// Currency in use at a location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 code, for example `EUR`
    pub code: Option<String>,
    pub name: Option<String>,
    pub name_native: Option<String>,
    pub plural: Option<String>,
    pub plural_native: Option<String>,
    pub symbol: Option<String>,
    pub symbol_native: Option<String>,
    pub format: Option<CurrencyFormat>,
}

/// Continent of a location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Continent {
    pub code: Option<String>,
    pub name: Option<String>,
}

/// Country flag in various art styles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Flag {
    pub emoji: Option<String>,
    pub emoji_unicode: Option<String>,
    pub emojitwo: Option<String>,
    pub noto: Option<String>,
    pub twemoji: Option<String>,
    pub wikimedia: Option<String>,
}

/// Spoken language
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Language {
    pub code: Option<String>,
    pub name: Option<String>,
    pub native: Option<String>,
}

/// Country of a location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Country {
    /// Surface area in square kilometers
    pub area: Option<u64>,
    /// Country codes of bordering countries
    pub borders: Option<Vec<String>>,
    pub calling_code: Option<String>,
    pub capital: Option<String>,
    /// ISO 3166-1 alpha-2 code
    pub code: Option<String>,
    pub name: Option<String>,
    pub population: Option<u64>,
    /// Inhabitants per square kilometer
    pub population_density: Option<f64>,
    pub flag: Option<Flag>,
    pub languages: Option<Vec<Language>>,
    /// Top-level domain, for example `.fr`
    pub tld: Option<String>,
}

/// Administrative region of a location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Region {
    pub code: Option<String>,
    pub name: Option<String>,
}

/// Geographic location of an address
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    pub continent: Option<Continent>,
    pub country: Option<Country>,
    pub region: Option<Region>,
    pub city: Option<String>,
    pub postal: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Main language spoken at the location
    pub language: Option<Language>,
    /// Whether the location is in the European Union
    pub in_eu: Option<bool>,
}

/// Threat intelligence flags for an address
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Security {
    /// Reported for abusive behavior (spam, scraping, brute force)
    pub is_abuser: Option<bool>,
    /// Hides the real requester behind any anonymizing service
    pub is_anonymous: Option<bool>,
    /// Source of known attacks
    pub is_attacker: Option<bool>,
    /// Address that should never appear in public routing
    pub is_bogon: Option<bool>,
    pub is_cloud_provider: Option<bool>,
    pub is_proxy: Option<bool>,
    /// Part of a relay service such as iCloud Private Relay
    pub is_relay: Option<bool>,
    pub is_threat: Option<bool>,
    pub is_tor: Option<bool>,
    pub is_tor_exit: Option<bool>,
    pub is_vpn: Option<bool>,
}

/// Time zone at a location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeZone {
    /// IANA identifier, for example `Europe/Paris`
    pub id: Option<String>,
    pub abbreviation: Option<String>,
    /// Local time at the moment of the lookup, ISO 8601
    pub current_time: Option<String>,
    pub name: Option<String>,
    /// Offset from UTC in seconds
    pub offset: Option<i32>,
    pub in_daylight_saving: Option<bool>,
}
