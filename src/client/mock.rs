//! Mock request handler for testing
//!
//! Provides a scripted implementation of [`RequestHandler`] for unit
//! testing without making real API calls.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::handler::RequestHandler;
use crate::error::{ApiError, Error, Result};
use crate::models::{
    ApiResponse, ApiResponseCredits, AutonomousSystem, IpInfo, LookupError, LookupResult,
    RequesterIpInfo, UserAgent,
};
use crate::options::LookupOptions;

/// Mock request handler for testing.
///
/// Fabricates a deterministic record for every target it is asked about,
/// so callers can verify partitioning and merging without a server.
/// Configure failures via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockRequestHandler::new()
///     .with_invalid_target("not-an-ip")
///     .await;
///
/// let response = mock.lookup_ip("1.1.1.1", &LookupOptions::new()).await?;
/// assert_eq!(response.data.ip.as_deref(), Some("1.1.1.1"));
/// ```
///
/// Clones share state: a clone handed to a client can still be inspected
/// through the original handle.
#[derive(Clone)]
pub struct MockRequestHandler {
    /// Targets that fail with a per-target error instead of a record
    invalid: Arc<Mutex<HashSet<String>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Cap on batch result length (simulates a short server response)
    batch_limit: Arc<Mutex<Option<usize>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl Default for MockRequestHandler {
    fn default() -> Self {
        Self {
            invalid: Arc::new(Mutex::new(HashSet::new())),
            error: Arc::new(Mutex::new(None)),
            batch_limit: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Tracks transport call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub lookup_ip: usize,
    pub origin_lookup_ip: usize,
    pub batch_lookup_ips: usize,
    pub lookup_asn: usize,
    pub origin_lookup_asn: usize,
    pub batch_lookup_asns: usize,
    pub parse_user_agent: usize,
    pub origin_parse_user_agent: usize,
    pub batch_parse_user_agents: usize,
}

impl CallCounts {
    /// Get total number of transport calls made.
    pub fn total(&self) -> usize {
        self.lookup_ip
            + self.origin_lookup_ip
            + self.batch_lookup_ips
            + self.lookup_asn
            + self.origin_lookup_asn
            + self.batch_lookup_asns
            + self.parse_user_agent
            + self.origin_parse_user_agent
            + self.batch_parse_user_agents
    }
}

/// A captured transport call for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// The transport method called (e.g., "lookup_ip", "batch_lookup_asns")
    pub method: String,
    /// Targets passed to the call, in order; empty for origin calls
    pub targets: Vec<String>,
}

impl MockRequestHandler {
    /// Create a new mock handler that answers every target with a record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a target to fail: batches answer it with a per-target
    /// error element, single lookups fail the whole call.
    pub async fn with_invalid_target(self, target: &str) -> Self {
        self.invalid.lock().await.insert(target.to_string());
        self
    }

    /// Configure an error to return on the next transport call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Configure batch responses to carry at most `limit` results,
    /// regardless of how many targets were requested.
    pub async fn with_batch_truncated_to(self, limit: usize) -> Self {
        *self.batch_limit.lock().await = Some(limit);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }

    /// Record a captured request for test assertions.
    async fn capture_request(&self, method: &str, targets: &[String]) {
        let mut requests = self.captured_requests.lock().await;
        requests.push(CapturedRequest {
            method: method.to_string(),
            targets: targets.to_vec(),
        });
    }

    async fn is_invalid(&self, target: &str) -> bool {
        self.invalid.lock().await.contains(target)
    }
}

/// Wrap fabricated data in an envelope charging one credit per target.
fn envelope<T>(data: T, consumed: u64) -> ApiResponse<T> {
    ApiResponse {
        credits: ApiResponseCredits {
            consumed: Some(consumed),
            remaining: None,
        },
        throttling: None,
        data,
    }
}

fn rejected(code: &str, target: &str) -> LookupError {
    LookupError {
        code: code.to_string(),
        message: format!("The value '{target}' was rejected."),
        resolution: String::new(),
    }
}

fn ip_record(ip: &str) -> IpInfo {
    IpInfo {
        ip: Some(ip.to_string()),
        r#type: Some("IPv4".to_string()),
        ..Default::default()
    }
}

fn origin_ip_record() -> RequesterIpInfo {
    RequesterIpInfo {
        ip: Some("203.0.113.10".to_string()),
        r#type: Some("IPv4".to_string()),
        ..Default::default()
    }
}

fn asn_record(target: &str) -> AutonomousSystem {
    AutonomousSystem {
        asn: target.strip_prefix("AS").and_then(|digits| digits.parse().ok()),
        name: Some(format!("Network {target}")),
        ..Default::default()
    }
}

fn origin_asn_record() -> AutonomousSystem {
    AutonomousSystem {
        asn: Some(64496),
        name: Some("Origin network".to_string()),
        ..Default::default()
    }
}

fn user_agent_record(header: &str) -> UserAgent {
    UserAgent {
        header: Some(header.to_string()),
        name: Some("Mock Browser".to_string()),
        ..Default::default()
    }
}

fn origin_user_agent_record() -> UserAgent {
    UserAgent {
        header: Some("Mock/1.0".to_string()),
        name: Some("Mock Browser".to_string()),
        ..Default::default()
    }
}

// ============================================================================
// RequestHandler Implementation
// ============================================================================

#[async_trait]
impl RequestHandler for MockRequestHandler {
    async fn lookup_ip(&self, ip: &str, _options: &LookupOptions) -> Result<ApiResponse<IpInfo>> {
        self.capture_request("lookup_ip", &[ip.to_string()]).await;
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.lookup_ip += 1;
        drop(counts);

        if self.is_invalid(ip).await {
            return Err(Error::Api(rejected("INVALID_IP_ADDRESS", ip).into()));
        }
        Ok(envelope(ip_record(ip), 1))
    }

    async fn origin_lookup_ip(
        &self,
        _options: &LookupOptions,
    ) -> Result<ApiResponse<RequesterIpInfo>> {
        self.capture_request("origin_lookup_ip", &[]).await;
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.origin_lookup_ip += 1;
        drop(counts);

        Ok(envelope(origin_ip_record(), 1))
    }

    async fn batch_lookup_ips(
        &self,
        ips: &[String],
        _options: &LookupOptions,
    ) -> Result<ApiResponse<Vec<LookupResult<IpInfo>>>> {
        self.capture_request("batch_lookup_ips", ips).await;
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.batch_lookup_ips += 1;
        drop(counts);

        let invalid = self.invalid.lock().await;
        let mut results: Vec<LookupResult<IpInfo>> = ips
            .iter()
            .map(|ip| {
                if invalid.contains(ip) {
                    LookupResult::Error(rejected("INVALID_IP_ADDRESS", ip))
                } else {
                    LookupResult::Record(ip_record(ip))
                }
            })
            .collect();
        drop(invalid);

        if let Some(limit) = *self.batch_limit.lock().await {
            results.truncate(limit);
        }
        Ok(envelope(results, ips.len() as u64))
    }

    async fn lookup_asn(
        &self,
        asn: &str,
        _options: &LookupOptions,
    ) -> Result<ApiResponse<AutonomousSystem>> {
        self.capture_request("lookup_asn", &[asn.to_string()]).await;
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.lookup_asn += 1;
        drop(counts);

        if self.is_invalid(asn).await {
            return Err(Error::Api(rejected("INVALID_ASN", asn).into()));
        }
        Ok(envelope(asn_record(asn), 1))
    }

    async fn origin_lookup_asn(
        &self,
        _options: &LookupOptions,
    ) -> Result<ApiResponse<AutonomousSystem>> {
        self.capture_request("origin_lookup_asn", &[]).await;
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.origin_lookup_asn += 1;
        drop(counts);

        Ok(envelope(origin_asn_record(), 1))
    }

    async fn batch_lookup_asns(
        &self,
        asns: &[String],
        _options: &LookupOptions,
    ) -> Result<ApiResponse<Vec<LookupResult<AutonomousSystem>>>> {
        self.capture_request("batch_lookup_asns", asns).await;
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.batch_lookup_asns += 1;
        drop(counts);

        let invalid = self.invalid.lock().await;
        let mut results: Vec<LookupResult<AutonomousSystem>> = asns
            .iter()
            .map(|asn| {
                if invalid.contains(asn) {
                    LookupResult::Error(rejected("INVALID_ASN", asn))
                } else {
                    LookupResult::Record(asn_record(asn))
                }
            })
            .collect();
        drop(invalid);

        if let Some(limit) = *self.batch_limit.lock().await {
            results.truncate(limit);
        }
        Ok(envelope(results, asns.len() as u64))
    }

    async fn parse_user_agent(
        &self,
        user_agent: &str,
        _options: &LookupOptions,
    ) -> Result<ApiResponse<UserAgent>> {
        self.capture_request("parse_user_agent", &[user_agent.to_string()])
            .await;
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.parse_user_agent += 1;
        drop(counts);

        if self.is_invalid(user_agent).await {
            return Err(Error::Api(rejected("INVALID_USER_AGENT", user_agent).into()));
        }
        Ok(envelope(user_agent_record(user_agent), 1))
    }

    async fn origin_parse_user_agent(
        &self,
        _options: &LookupOptions,
    ) -> Result<ApiResponse<UserAgent>> {
        self.capture_request("origin_parse_user_agent", &[]).await;
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.origin_parse_user_agent += 1;
        drop(counts);

        Ok(envelope(origin_user_agent_record(), 1))
    }

    async fn batch_parse_user_agents(
        &self,
        user_agents: &[String],
        _options: &LookupOptions,
    ) -> Result<ApiResponse<Vec<LookupResult<UserAgent>>>> {
        self.capture_request("batch_parse_user_agents", user_agents)
            .await;
        self.check_error().await?;

        let mut counts = self.call_count.lock().await;
        counts.batch_parse_user_agents += 1;
        drop(counts);

        let invalid = self.invalid.lock().await;
        let mut results: Vec<LookupResult<UserAgent>> = user_agents
            .iter()
            .map(|agent| {
                if invalid.contains(agent) {
                    LookupResult::Error(rejected("INVALID_USER_AGENT", agent))
                } else {
                    LookupResult::Record(user_agent_record(agent))
                }
            })
            .collect();
        drop(invalid);

        if let Some(limit) = *self.batch_limit.lock().await {
            results.truncate(limit);
        }
        Ok(envelope(results, user_agents.len() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_fabricates_ip_records() {
        let mock = MockRequestHandler::new();

        let response = mock
            .lookup_ip("1.1.1.1", &LookupOptions::new())
            .await
            .unwrap();
        assert_eq!(response.data.ip.as_deref(), Some("1.1.1.1"));
        assert_eq!(response.credits.consumed, Some(1));
    }

    #[tokio::test]
    async fn test_mock_batch_answers_every_target_in_order() {
        let mock = MockRequestHandler::new();
        let targets = vec!["8.8.8.8".to_string(), "1.1.1.1".to_string()];

        let response = mock
            .batch_lookup_ips(&targets, &LookupOptions::new())
            .await
            .unwrap();
        assert_eq!(response.data.len(), 2);
        assert_eq!(
            response.data[0].record().unwrap().ip.as_deref(),
            Some("8.8.8.8")
        );
        assert_eq!(
            response.data[1].record().unwrap().ip.as_deref(),
            Some("1.1.1.1")
        );
        assert_eq!(response.credits.consumed, Some(2));
    }

    #[tokio::test]
    async fn test_mock_invalid_target_becomes_batch_error_element() {
        let mock = MockRequestHandler::new().with_invalid_target("bogus").await;
        let targets = vec!["8.8.8.8".to_string(), "bogus".to_string()];

        let response = mock
            .batch_lookup_ips(&targets, &LookupOptions::new())
            .await
            .unwrap();
        assert!(response.data[0].is_record());
        assert_eq!(response.data[1].error().unwrap().code, "INVALID_IP_ADDRESS");
    }

    #[tokio::test]
    async fn test_mock_invalid_target_fails_single_lookup() {
        let mock = MockRequestHandler::new().with_invalid_target("bogus").await;

        let result = mock.lookup_ip("bogus", &LookupOptions::new()).await;
        match result {
            Err(Error::Api(err)) => assert_eq!(err.code, "INVALID_IP_ADDRESS"),
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_mock_error_is_consumed_after_one_use() {
        let mock = MockRequestHandler::new()
            .with_error(ApiError {
                code: "FORBIDDEN_IP".to_string(),
                message: "Denied.".to_string(),
                resolution: String::new(),
            })
            .await;

        let result = mock.lookup_ip("1.1.1.1", &LookupOptions::new()).await;
        assert!(result.is_err());

        // Error is consumed, next call succeeds
        let result = mock.lookup_ip("1.1.1.1", &LookupOptions::new()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_mock_call_counts() {
        let mock = MockRequestHandler::new();
        let options = LookupOptions::new();

        mock.lookup_ip("1.1.1.1", &options).await.unwrap();
        mock.lookup_ip("8.8.8.8", &options).await.unwrap();
        mock.batch_lookup_asns(&["AS13335".to_string()], &options)
            .await
            .unwrap();

        let counts = mock.call_counts().await;
        assert_eq!(counts.lookup_ip, 2);
        assert_eq!(counts.batch_lookup_asns, 1);
        assert_eq!(counts.origin_lookup_ip, 0);
        assert_eq!(counts.total(), 3);
    }

    #[tokio::test]
    async fn test_mock_captures_targets_in_call_order() {
        let mock = MockRequestHandler::new();
        let options = LookupOptions::new();

        mock.lookup_asn("AS33", &options).await.unwrap();
        mock.origin_lookup_asn(&options).await.unwrap();

        let captured = mock.captured_requests().await;
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].method, "lookup_asn");
        assert_eq!(captured[0].targets, vec!["AS33".to_string()]);
        assert_eq!(captured[1].method, "origin_lookup_asn");
        assert!(captured[1].targets.is_empty());
    }

    #[tokio::test]
    async fn test_mock_clone_shares_state() {
        let mock = MockRequestHandler::new();
        let clone = mock.clone();

        clone
            .lookup_ip("1.1.1.1", &LookupOptions::new())
            .await
            .unwrap();

        let counts = mock.call_counts().await;
        assert_eq!(counts.lookup_ip, 1);
    }

    #[tokio::test]
    async fn test_mock_truncated_batch_drops_trailing_results() {
        let mock = MockRequestHandler::new().with_batch_truncated_to(1).await;
        let targets = vec!["8.8.8.8".to_string(), "1.1.1.1".to_string()];

        let response = mock
            .batch_lookup_ips(&targets, &LookupOptions::new())
            .await
            .unwrap();
        assert_eq!(response.data.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_asn_record_carries_parsed_number() {
        let mock = MockRequestHandler::new();

        let response = mock
            .lookup_asn("AS13335", &LookupOptions::new())
            .await
            .unwrap();
        assert_eq!(response.data.asn, Some(13335));
        assert_eq!(response.data.name.as_deref(), Some("Network AS13335"));
    }
}
