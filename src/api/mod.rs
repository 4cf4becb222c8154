use tracing::debug;

use crate::error::VizResult;

mod chart_model;
mod engine_config;
mod graph_model;
mod json_contract;
mod validation;

pub use chart_model::ChartModel;
pub use engine_config::VizEngineConfig;
pub use graph_model::GraphModel;
pub use json_contract::{
    CHART_MODEL_JSON_SCHEMA_V1, ChartModelJsonContractV1, GRAPH_MODEL_JSON_SCHEMA_V1,
    GraphModelJsonContractV1,
};

/// Entry point for both visualization families.
///
/// The engine only holds validated configuration. Every call builds its
/// output from scratch, so two invocations never observe each other.
#[derive(Debug, Clone)]
pub struct VizEngine {
    config: VizEngineConfig,
}

impl VizEngine {
    pub fn new(config: VizEngineConfig) -> VizResult<Self> {
        config.validate()?;
        debug!(
            width = config.width,
            height = config.height,
            group_by = config.grouping_property().unwrap_or("-"),
            iterations = config.iterations,
            "engine configured"
        );
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &VizEngineConfig {
        &self.config
    }
}
