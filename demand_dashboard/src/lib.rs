//! # Demand Dashboard
//!
//! Terminal presentation of the `demand_forecast` pipeline: configuration,
//! text panels (overview, historical sales chart, model performance,
//! tomorrow forecast) and an interactive selection loop.

pub mod chart;
pub mod config;
pub mod render;
pub mod session;

pub use crate::config::{resolve_config, DashboardConfig};
pub use crate::render::{render_view, Panel};
pub use crate::session::run_session;
