//! HTTP transport for the Ipregistry API

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client as HttpClient, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::IpregistryConfig;
use crate::error::{ApiError, ClientError, Error, Result};
use crate::models::{
    ApiResponse, ApiResponseCredits, ApiResponseThrottling, AutonomousSystem, IpInfo, LookupResult,
    RequesterIpInfo, UserAgent,
};
use crate::options::LookupOptions;

/// `User-Agent` header sent with every request
const USER_AGENT: &str = concat!("Ipregistry/Rust/", env!("CARGO_PKG_VERSION"));

/// Path of the user-agent parsing endpoint
const USER_AGENT_PATH: &str = "user_agent";

// Response headers carrying envelope metadata
const CREDITS_CONSUMED_HEADER: &str = "ipregistry-credits-consumed";
const CREDITS_REMAINING_HEADER: &str = "ipregistry-credits-remaining";
const THROTTLING_LIMIT_HEADER: &str = "x-rate-limit-limit";
const THROTTLING_REMAINING_HEADER: &str = "x-rate-limit-remaining";
const THROTTLING_RESET_HEADER: &str = "x-rate-limit-reset";

/// One transport entry point per logical API operation.
///
/// Implementations take already-normalized targets, perform exactly one
/// HTTP call, and decode the result into an envelope. No retries: a
/// failed call fails the operation.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// Fetch the record for one IP address.
    async fn lookup_ip(&self, ip: &str, options: &LookupOptions) -> Result<ApiResponse<IpInfo>>;

    /// Fetch the record for the address this request originates from.
    async fn origin_lookup_ip(
        &self,
        options: &LookupOptions,
    ) -> Result<ApiResponse<RequesterIpInfo>>;

    /// Fetch records for several IP addresses in one call.
    async fn batch_lookup_ips(
        &self,
        ips: &[String],
        options: &LookupOptions,
    ) -> Result<ApiResponse<Vec<LookupResult<IpInfo>>>>;

    /// Fetch the record for one Autonomous System (`"AS"`-prefixed target).
    async fn lookup_asn(
        &self,
        asn: &str,
        options: &LookupOptions,
    ) -> Result<ApiResponse<AutonomousSystem>>;

    /// Fetch the record for the AS announcing the requester's address.
    async fn origin_lookup_asn(
        &self,
        options: &LookupOptions,
    ) -> Result<ApiResponse<AutonomousSystem>>;

    /// Fetch records for several Autonomous Systems in one call.
    async fn batch_lookup_asns(
        &self,
        asns: &[String],
        options: &LookupOptions,
    ) -> Result<ApiResponse<Vec<LookupResult<AutonomousSystem>>>>;

    /// Parse one `User-Agent` header value.
    async fn parse_user_agent(
        &self,
        user_agent: &str,
        options: &LookupOptions,
    ) -> Result<ApiResponse<UserAgent>>;

    /// Parse the `User-Agent` header this request is sent with.
    async fn origin_parse_user_agent(
        &self,
        options: &LookupOptions,
    ) -> Result<ApiResponse<UserAgent>>;

    /// Parse several `User-Agent` header values in one call.
    async fn batch_parse_user_agents(
        &self,
        user_agents: &[String],
        options: &LookupOptions,
    ) -> Result<ApiResponse<Vec<LookupResult<UserAgent>>>>;
}

/// Transport over HTTPS against the configured endpoint
pub struct DefaultRequestHandler {
    http: HttpClient,
    config: IpregistryConfig,
}

impl DefaultRequestHandler {
    /// Build the transport, applying the config's timeout to every request.
    pub fn new(config: IpregistryConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self { http, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    /// GET one record from `{base}/{target}`.
    async fn single_call<T: DeserializeOwned>(
        &self,
        target: &str,
        options: &LookupOptions,
    ) -> Result<ApiResponse<T>> {
        let response = self
            .http
            .get(self.endpoint(target))
            .query(&[("key", self.config.api_key.as_str())])
            .query(&options.to_query_params())
            .send()
            .await
            .map_err(ClientError::Network)?;

        read_envelope(response).await
    }

    /// POST a JSON array of targets to `{base}/{path}`.
    async fn batch_call<T: DeserializeOwned>(
        &self,
        path: &str,
        targets: &[String],
        options: &LookupOptions,
    ) -> Result<ApiResponse<Vec<LookupResult<T>>>> {
        #[derive(Deserialize)]
        struct BatchResults<U> {
            results: Vec<LookupResult<U>>,
        }

        let response = self
            .http
            .post(self.endpoint(path))
            .query(&[("key", self.config.api_key.as_str())])
            .query(&options.to_query_params())
            .json(targets)
            .send()
            .await
            .map_err(ClientError::Network)?;

        let envelope: ApiResponse<BatchResults<T>> = read_envelope(response).await?;
        Ok(ApiResponse {
            credits: envelope.credits,
            throttling: envelope.throttling,
            data: envelope.data.results,
        })
    }
}

#[async_trait]
impl RequestHandler for DefaultRequestHandler {
    async fn lookup_ip(&self, ip: &str, options: &LookupOptions) -> Result<ApiResponse<IpInfo>> {
        self.single_call(ip, options).await
    }

    async fn origin_lookup_ip(
        &self,
        options: &LookupOptions,
    ) -> Result<ApiResponse<RequesterIpInfo>> {
        self.single_call("", options).await
    }

    async fn batch_lookup_ips(
        &self,
        ips: &[String],
        options: &LookupOptions,
    ) -> Result<ApiResponse<Vec<LookupResult<IpInfo>>>> {
        self.batch_call("", ips, options).await
    }

    async fn lookup_asn(
        &self,
        asn: &str,
        options: &LookupOptions,
    ) -> Result<ApiResponse<AutonomousSystem>> {
        self.single_call(asn, options).await
    }

    async fn origin_lookup_asn(
        &self,
        options: &LookupOptions,
    ) -> Result<ApiResponse<AutonomousSystem>> {
        self.single_call("AS", options).await
    }

    async fn batch_lookup_asns(
        &self,
        asns: &[String],
        options: &LookupOptions,
    ) -> Result<ApiResponse<Vec<LookupResult<AutonomousSystem>>>> {
        self.batch_call("", asns, options).await
    }

    async fn parse_user_agent(
        &self,
        user_agent: &str,
        options: &LookupOptions,
    ) -> Result<ApiResponse<UserAgent>> {
        // The service parses arbitrary headers only through the batch
        // endpoint; send a one-element body and unwrap its only result.
        let targets = [user_agent.to_string()];
        let response = self
            .batch_call::<UserAgent>(USER_AGENT_PATH, &targets, options)
            .await?;

        let ApiResponse {
            credits,
            throttling,
            data,
        } = response;
        match data.into_iter().next() {
            Some(LookupResult::Record(agent)) => Ok(ApiResponse {
                credits,
                throttling,
                data: agent,
            }),
            Some(LookupResult::Error(err)) => Err(Error::Api(err.into())),
            None => Err(ClientError::InvalidResponse("empty batch results".to_string()).into()),
        }
    }

    async fn origin_parse_user_agent(
        &self,
        options: &LookupOptions,
    ) -> Result<ApiResponse<UserAgent>> {
        self.single_call(USER_AGENT_PATH, options).await
    }

    async fn batch_parse_user_agents(
        &self,
        user_agents: &[String],
        options: &LookupOptions,
    ) -> Result<ApiResponse<Vec<LookupResult<UserAgent>>>> {
        self.batch_call(USER_AGENT_PATH, user_agents, options).await
    }
}

/// Decode status, metadata headers, and body into an envelope.
///
/// Non-success statuses must carry a structured error body; anything else
/// about the response that cannot be understood is a client-side failure.
async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<ApiResponse<T>> {
    let status = response.status();
    let credits = response_credits(response.headers());
    let throttling = response_throttling(response.headers());

    let body = response.text().await.map_err(ClientError::Network)?;

    if !status.is_success() {
        let error: ApiError = serde_json::from_str(&body).map_err(ClientError::Decode)?;
        return Err(error.into());
    }

    let data = serde_json::from_str(&body).map_err(ClientError::Decode)?;
    Ok(ApiResponse {
        credits,
        throttling,
        data,
    })
}

/// Parse a numeric metadata header; absent or unparseable values are
/// `None`, never zero.
fn header_count(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
}

fn response_credits(headers: &HeaderMap) -> ApiResponseCredits {
    ApiResponseCredits {
        consumed: header_count(headers, CREDITS_CONSUMED_HEADER),
        remaining: header_count(headers, CREDITS_REMAINING_HEADER),
    }
}

fn response_throttling(headers: &HeaderMap) -> Option<ApiResponseThrottling> {
    let throttling = ApiResponseThrottling {
        limit: header_count(headers, THROTTLING_LIMIT_HEADER),
        remaining: header_count(headers, THROTTLING_REMAINING_HEADER),
        reset: header_count(headers, THROTTLING_RESET_HEADER),
    };

    if throttling.limit.is_none() && throttling.remaining.is_none() && throttling.reset.is_none() {
        None
    } else {
        Some(throttling)
    }
}
