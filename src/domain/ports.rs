use crate::domain::model::Plan;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// Where a plan list comes from.
#[async_trait]
pub trait PlanSource: Send + Sync {
    async fn fetch_plans(&self) -> Result<Vec<Plan>>;
}

pub trait ConfigProvider: Send + Sync {
    /// Absolute URL of the plan list resource.
    fn plans_url(&self) -> Result<Url>;
    /// Artificial wait before each fetch. Zero disables it.
    fn load_delay(&self) -> Duration;
    fn request_timeout(&self) -> Option<Duration>;
}
