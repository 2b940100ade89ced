//! Ipregistry API client

pub mod handler;
#[cfg(test)]
pub mod mock;

#[cfg(test)]
#[allow(unused_imports)]
pub use mock::MockRequestHandler;

pub use handler::{DefaultRequestHandler, RequestHandler};

use crate::cache::{IpregistryCache, LookupRecord, NoCache, cache_key};
use crate::config::IpregistryConfig;
use crate::error::{ClientError, Result};
use crate::models::{
    ApiResponse, AutonomousSystem, IpInfo, LookupResult, RequesterIpInfo, UserAgent,
};
use crate::options::LookupOptions;

/// Caching client for the Ipregistry API.
///
/// Every lookup first consults the configured cache and only targets the
/// cache cannot answer reach the network. Batch lookups make at most one
/// call for all their misses combined, and a fully cached batch makes
/// none. Answers served from the cache report zero consumed credits.
///
/// The default cache is [`NoCache`]; opt into memoization with
/// [`with_cache`](Self::with_cache).
///
/// # Example
/// ```no_run
/// use ipregistry::{InMemoryCache, IpregistryClient};
///
/// # async fn run() -> ipregistry::Result<()> {
/// let client = IpregistryClient::new("tryout")?.with_cache(InMemoryCache::default());
/// let response = client.lookup_ip("8.8.8.8", None).await?;
/// println!("{:?}", response.data.location);
/// # Ok(())
/// # }
/// ```
pub struct IpregistryClient {
    handler: Box<dyn RequestHandler>,
    cache: Box<dyn IpregistryCache>,
}

impl IpregistryClient {
    /// Client with default configuration for the given API key, no caching.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_config(IpregistryConfig::new(api_key))
    }

    /// Client with explicit configuration, no caching.
    pub fn with_config(config: IpregistryConfig) -> Result<Self> {
        Ok(Self {
            handler: Box::new(DefaultRequestHandler::new(config)?),
            cache: Box::new(NoCache),
        })
    }

    /// Replace the cache lookups run against.
    pub fn with_cache(mut self, cache: impl IpregistryCache + 'static) -> Self {
        self.cache = Box::new(cache);
        self
    }

    /// Replace the transport. Useful for tests and custom wire setups.
    pub fn with_request_handler(mut self, handler: impl RequestHandler + 'static) -> Self {
        self.handler = Box::new(handler);
        self
    }

    /// The cache in use, for direct probing or invalidation.
    pub fn cache(&self) -> &dyn IpregistryCache {
        self.cache.as_ref()
    }

    /// Look up geolocation and threat data for one IP address.
    pub async fn lookup_ip(
        &self,
        ip: &str,
        options: Option<&LookupOptions>,
    ) -> Result<ApiResponse<IpInfo>> {
        let options = options.cloned().unwrap_or_default();
        let key = cache_key(ip, &options);

        if let Some(record) = self.probe::<IpInfo>(&key).await {
            log::debug!("Cache hit: {key}");
            return Ok(ApiResponse::cached(record));
        }

        let response = self.handler.lookup_ip(ip, &options).await?;
        self.store(&key, &response.data).await;
        Ok(response)
    }

    /// Look up the address this request originates from. The record also
    /// carries the parsed `User-Agent` header of the request.
    pub async fn origin_lookup_ip(
        &self,
        options: Option<&LookupOptions>,
    ) -> Result<ApiResponse<RequesterIpInfo>> {
        let options = options.cloned().unwrap_or_default();
        let key = cache_key("", &options);

        if let Some(record) = self.probe::<RequesterIpInfo>(&key).await {
            log::debug!("Cache hit: origin lookup");
            return Ok(ApiResponse::cached(record));
        }

        let response = self.handler.origin_lookup_ip(&options).await?;
        self.store(&key, &response.data).await;
        Ok(response)
    }

    /// Look up several IP addresses in one call.
    ///
    /// Results come back in input order. A target the service rejects
    /// occupies its slot as a [`LookupResult::Error`] without failing the
    /// others.
    pub async fn batch_lookup_ips<S: AsRef<str>>(
        &self,
        ips: &[S],
        options: Option<&LookupOptions>,
    ) -> Result<ApiResponse<Vec<LookupResult<IpInfo>>>> {
        let options = options.cloned().unwrap_or_default();
        let targets: Vec<String> = ips.iter().map(|ip| ip.as_ref().to_string()).collect();

        let plan = self.plan_batch::<IpInfo>(&targets, &options).await;
        if plan.misses.is_empty() {
            return Ok(ApiResponse::cached(plan.into_cached_results()));
        }

        let fresh = self.handler.batch_lookup_ips(&plan.misses, &options).await?;
        self.merge_batch(plan, fresh).await
    }

    /// Look up one Autonomous System by number.
    pub async fn lookup_asn(
        &self,
        asn: u32,
        options: Option<&LookupOptions>,
    ) -> Result<ApiResponse<AutonomousSystem>> {
        let options = options.cloned().unwrap_or_default();
        let target = format!("AS{asn}");
        let key = cache_key(&target, &options);

        if let Some(record) = self.probe::<AutonomousSystem>(&key).await {
            log::debug!("Cache hit: {key}");
            return Ok(ApiResponse::cached(record));
        }

        let response = self.handler.lookup_asn(&target, &options).await?;
        self.store(&key, &response.data).await;
        Ok(response)
    }

    /// Look up the Autonomous System announcing the requester's address.
    pub async fn origin_lookup_asn(
        &self,
        options: Option<&LookupOptions>,
    ) -> Result<ApiResponse<AutonomousSystem>> {
        let options = options.cloned().unwrap_or_default();
        let key = cache_key("AS", &options);

        if let Some(record) = self.probe::<AutonomousSystem>(&key).await {
            log::debug!("Cache hit: origin AS lookup");
            return Ok(ApiResponse::cached(record));
        }

        let response = self.handler.origin_lookup_asn(&options).await?;
        self.store(&key, &response.data).await;
        Ok(response)
    }

    /// Look up several Autonomous Systems in one call.
    pub async fn batch_lookup_asns(
        &self,
        asns: &[u32],
        options: Option<&LookupOptions>,
    ) -> Result<ApiResponse<Vec<LookupResult<AutonomousSystem>>>> {
        let options = options.cloned().unwrap_or_default();
        let targets: Vec<String> = asns.iter().map(|asn| format!("AS{asn}")).collect();

        let plan = self.plan_batch::<AutonomousSystem>(&targets, &options).await;
        if plan.misses.is_empty() {
            return Ok(ApiResponse::cached(plan.into_cached_results()));
        }

        let fresh = self
            .handler
            .batch_lookup_asns(&plan.misses, &options)
            .await?;
        self.merge_batch(plan, fresh).await
    }

    /// Parse one `User-Agent` header value.
    pub async fn parse_user_agent(
        &self,
        user_agent: &str,
        options: Option<&LookupOptions>,
    ) -> Result<ApiResponse<UserAgent>> {
        let options = options.cloned().unwrap_or_default();
        let key = cache_key(user_agent, &options);

        if let Some(record) = self.probe::<UserAgent>(&key).await {
            log::debug!("Cache hit: {key}");
            return Ok(ApiResponse::cached(record));
        }

        let response = self.handler.parse_user_agent(user_agent, &options).await?;
        self.store(&key, &response.data).await;
        Ok(response)
    }

    /// Parse the `User-Agent` header this request is sent with.
    pub async fn origin_parse_user_agent(
        &self,
        options: Option<&LookupOptions>,
    ) -> Result<ApiResponse<UserAgent>> {
        let options = options.cloned().unwrap_or_default();
        let key = cache_key("", &options);

        if let Some(record) = self.probe::<UserAgent>(&key).await {
            log::debug!("Cache hit: origin user-agent parse");
            return Ok(ApiResponse::cached(record));
        }

        let response = self.handler.origin_parse_user_agent(&options).await?;
        self.store(&key, &response.data).await;
        Ok(response)
    }

    /// Parse several `User-Agent` header values in one call.
    pub async fn batch_parse_user_agents<S: AsRef<str>>(
        &self,
        user_agents: &[S],
        options: Option<&LookupOptions>,
    ) -> Result<ApiResponse<Vec<LookupResult<UserAgent>>>> {
        let options = options.cloned().unwrap_or_default();
        let targets: Vec<String> = user_agents
            .iter()
            .map(|agent| agent.as_ref().to_string())
            .collect();

        let plan = self.plan_batch::<UserAgent>(&targets, &options).await;
        if plan.misses.is_empty() {
            return Ok(ApiResponse::cached(plan.into_cached_results()));
        }

        let fresh = self
            .handler
            .batch_parse_user_agents(&plan.misses, &options)
            .await?;
        self.merge_batch(plan, fresh).await
    }

    /// Cache probe for one key. An entry holding a record of another
    /// lookup family counts as a miss.
    async fn probe<T: LookupRecord>(&self, key: &str) -> Option<T> {
        let cached = self.cache.get(key).await?;
        T::from_cached(cached)
    }

    async fn store<T: LookupRecord>(&self, key: &str, record: &T) {
        self.cache.put(key, record.clone().into_cached()).await;
    }

    /// Split a batch into cached records and targets needing the network.
    async fn plan_batch<T: LookupRecord>(
        &self,
        targets: &[String],
        options: &LookupOptions,
    ) -> BatchPlan<T> {
        let mut slots = Vec::with_capacity(targets.len());
        let mut misses = Vec::new();
        let mut miss_keys = Vec::new();

        for target in targets {
            let key = cache_key(target, options);
            match self.probe::<T>(&key).await {
                Some(record) => slots.push(Some(record)),
                None => {
                    slots.push(None);
                    misses.push(target.clone());
                    miss_keys.push(key);
                }
            }
        }

        log::debug!(
            "Batch of {}: {} cached, {} to fetch",
            targets.len(),
            targets.len() - misses.len(),
            misses.len()
        );
        BatchPlan {
            slots,
            misses,
            miss_keys,
        }
    }

    /// Fill the plan's empty slots from a fresh batch response, keeping
    /// the caller's order. Fresh records are cached under the keys the
    /// plan computed; error elements are not. Credit and throttling
    /// metadata pass through from the fresh envelope untouched.
    async fn merge_batch<T: LookupRecord>(
        &self,
        plan: BatchPlan<T>,
        fresh: ApiResponse<Vec<LookupResult<T>>>,
    ) -> Result<ApiResponse<Vec<LookupResult<T>>>> {
        let BatchPlan {
            slots, miss_keys, ..
        } = plan;
        let ApiResponse {
            credits,
            throttling,
            data,
        } = fresh;

        let mut fresh_results = data.into_iter();
        let mut keys = miss_keys.into_iter();
        let mut merged = Vec::with_capacity(slots.len());

        for slot in slots {
            match slot {
                Some(record) => merged.push(LookupResult::Record(record)),
                None => {
                    let (Some(result), Some(key)) = (fresh_results.next(), keys.next()) else {
                        return Err(ClientError::InvalidResponse(
                            "batch response did not cover every requested target".to_string(),
                        )
                        .into());
                    };
                    if let LookupResult::Record(record) = &result {
                        self.cache.put(&key, record.clone().into_cached()).await;
                    }
                    merged.push(result);
                }
            }
        }

        Ok(ApiResponse {
            credits,
            throttling,
            data: merged,
        })
    }
}

/// Outcome of probing the cache for a whole batch.
struct BatchPlan<T> {
    /// Cached records at their input index, `None` where a fetch is needed
    slots: Vec<Option<T>>,
    /// Targets needing the network, in input order
    misses: Vec<String>,
    /// Cache key per miss, aligned with `misses`
    miss_keys: Vec<String>,
}

impl<T> BatchPlan<T> {
    /// Results for a plan with no misses.
    fn into_cached_results(self) -> Vec<LookupResult<T>> {
        self.slots
            .into_iter()
            .flatten()
            .map(LookupResult::Record)
            .collect()
    }
}
