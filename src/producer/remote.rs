use super::{ProducerError, ProducerRequest, TaskProducer, parse_task_payload};
use crate::config::ProducerConfig;
use crate::task::RawTask;
use std::time::Duration;

/// Posts the request as JSON to an HTTP endpoint and reads a task list back.
#[derive(Debug, Clone)]
pub struct RemoteProducer {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RemoteProducer {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProducerError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("task-planner/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    /// `None` when no endpoint is configured.
    pub fn from_config(config: &ProducerConfig) -> Result<Option<Self>, ProducerError> {
        let Some(endpoint) = config.endpoint.as_deref().filter(|e| !e.trim().is_empty()) else {
            return Ok(None);
        };
        Self::new(
            endpoint,
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
        .map(Some)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TaskProducer for RemoteProducer {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn produce(&self, request: &ProducerRequest) -> Result<Vec<RawTask>, ProducerError> {
        let mut builder = self.http.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ProducerError::Api {
                status: status.as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }

        let body = resp.text().await?;
        let tasks = parse_task_payload(&body)?;
        tracing::debug!(
            endpoint = %self.endpoint,
            tasks = tasks.len(),
            "remote producer responded"
        );
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_endpoint_means_no_remote() {
        let config = ProducerConfig::default();
        assert!(RemoteProducer::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn blank_api_key_is_ignored() {
        let producer = RemoteProducer::new(
            "http://localhost:1/plan",
            Some("  ".into()),
            Duration::from_secs(1),
        )
        .unwrap();
        assert!(producer.api_key.is_none());
        assert_eq!(producer.endpoint(), "http://localhost:1/plan");
    }
}
