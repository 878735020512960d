use crate::core::{ConfigProvider, Plan, PlanSource};
use crate::utils::error::{PlanError, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Fetches `plans.json` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPlanSource {
    client: Client,
    url: Url,
}

impl HttpPlanSource {
    pub fn new(url: Url) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url: config.plans_url()?,
        })
    }
}

#[async_trait]
impl PlanSource for HttpPlanSource {
    async fn fetch_plans(&self) -> Result<Vec<Plan>> {
        tracing::debug!("Making API request to: {}", self.url);
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            tracing::error!("Failed to fetch plans ({}).", status.as_u16());
            return Err(PlanError::FetchStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let plans: Vec<Plan> = serde_json::from_slice(&body)?;
        tracing::debug!("Parsed {} plans ({} bytes)", plans.len(), body.len());
        Ok(plans)
    }
}
