//! Rust client for the [Ipregistry](https://ipregistry.co) API.
//!
//! Looks up IP geolocation and threat data, Autonomous System details,
//! and parsed user agents, with optional client-side caching so repeated
//! lookups stop consuming credits.
//!
//! # Quick start
//! ```no_run
//! use ipregistry::{InMemoryCache, IpregistryClient, LookupOptions};
//!
//! #[tokio::main]
//! async fn main() -> ipregistry::Result<()> {
//!     let client = IpregistryClient::new("tryout")?.with_cache(InMemoryCache::default());
//!
//!     let response = client.lookup_ip("8.8.8.8", None).await?;
//!     println!("location: {:?}", response.data.location);
//!     println!("credits consumed: {:?}", response.credits.consumed);
//!
//!     let options = LookupOptions::new().set("fields", "location");
//!     let batch = client
//!         .batch_lookup_ips(&["1.1.1.1", "8.8.8.8"], Some(&options))
//!         .await?;
//!     println!("{} results", batch.data.len());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod options;
pub mod user_agents;

pub use cache::{CachedRecord, InMemoryCache, IpregistryCache, NoCache, cache_key};
pub use client::{DefaultRequestHandler, IpregistryClient, RequestHandler};
pub use config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, EU_BASE_URL, IpregistryConfig};
pub use error::{ApiError, ClientError, Error, Result};
pub use models::{
    ApiResponse, ApiResponseCredits, ApiResponseThrottling, AutonomousSystem, IpInfo, LookupError,
    LookupResult, RequesterIpInfo, UserAgent,
};
pub use options::{LookupOptions, OptionValue};
