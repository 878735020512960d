pub mod plan_list;
pub mod store;

pub use crate::domain::model::Plan;
pub use crate::domain::ports::{ConfigProvider, PlanSource};
pub use crate::utils::error::Result;
