pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::http::HttpPlanSource;
pub use config::{theme::ThemeConfig, toml_config::TomlConfig, LoaderConfig};
pub use crate::core::plan_list::{LoadOutcome, LoadState, PlanListStore};
pub use crate::core::store::{Readable, Subscription, Writable};
pub use domain::model::Plan;
pub use utils::collection::add_if_not_present;
pub use utils::error::{PlanError, Result};

use crate::core::ConfigProvider;

/// Builds a store that fetches over HTTP using `config`.
pub fn http_plan_store<C: ConfigProvider>(config: &C) -> Result<PlanListStore<HttpPlanSource>> {
    let source = HttpPlanSource::from_config(config)?;
    Ok(PlanListStore::with_delay(source, config.load_delay()))
}
