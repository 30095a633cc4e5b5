use super::{AllocationClient, NetworkError};
use crate::model::{AllocationResult, OrderPayload};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// POSTs orders as JSON to the allocation endpoint.
#[derive(Debug, Clone)]
pub struct HttpAllocationClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpAllocationClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AllocationClient for HttpAllocationClient {
    #[instrument(skip(self, payload), fields(endpoint = %self.endpoint))]
    async fn submit(&self, payload: &OrderPayload) -> Result<AllocationResult, NetworkError> {
        debug!(?payload, "Posting order");
        let response = self
            .http
            .post(&self.endpoint)
            .json(payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Allocation request failed");
                NetworkError::from(e)
            })?;

        let status = response.status();
        // Error statuses still carry a decodable body with the reason
        let text = response.text().await.map_err(NetworkError::from)?;
        let mut result: AllocationResult = serde_json::from_str(&text).map_err(|e| {
            warn!(status = status.as_u16(), error = %e, "Undecodable allocation response");
            NetworkError::Malformed(e.to_string())
        })?;

        if !status.is_success() && result.success {
            result.success = false;
            if result.error.is_none() {
                result.error = Some(format!("server responded with status {}", status.as_u16()));
            }
        }

        info!(
            status = status.as_u16(),
            success = result.success,
            "Allocation response"
        );
        Ok(result)
    }
}
