use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};

use super::{ChartModel, GraphModel};

pub const CHART_MODEL_JSON_SCHEMA_V1: u32 = 1;
pub const GRAPH_MODEL_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartModelJsonContractV1 {
    pub schema_version: u32,
    pub chart: ChartModel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphModelJsonContractV1 {
    pub schema_version: u32,
    pub graph: GraphModel,
}

impl ChartModel {
    pub fn to_json_pretty(&self) -> VizResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VizError::InvalidData(format!("failed to serialize chart model: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> VizResult<String> {
        let payload = ChartModelJsonContractV1 {
            schema_version: CHART_MODEL_JSON_SCHEMA_V1,
            chart: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            VizError::InvalidData(format!("failed to serialize chart contract v1: {e}"))
        })
    }

    /// Accepts either a bare model or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> VizResult<Self> {
        if let Ok(model) = serde_json::from_str::<ChartModel>(input) {
            return Ok(model);
        }
        let payload: ChartModelJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            VizError::InvalidData(format!("failed to parse chart json payload: {e}"))
        })?;
        if payload.schema_version != CHART_MODEL_JSON_SCHEMA_V1 {
            return Err(VizError::InvalidData(format!(
                "unsupported chart schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.chart)
    }
}

impl GraphModel {
    pub fn to_json_pretty(&self) -> VizResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VizError::InvalidData(format!("failed to serialize graph model: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> VizResult<String> {
        let payload = GraphModelJsonContractV1 {
            schema_version: GRAPH_MODEL_JSON_SCHEMA_V1,
            graph: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            VizError::InvalidData(format!("failed to serialize graph contract v1: {e}"))
        })
    }

    /// Accepts either a bare model or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> VizResult<Self> {
        if let Ok(model) = serde_json::from_str::<GraphModel>(input) {
            return Ok(model);
        }
        let payload: GraphModelJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            VizError::InvalidData(format!("failed to parse graph json payload: {e}"))
        })?;
        if payload.schema_version != GRAPH_MODEL_JSON_SCHEMA_V1 {
            return Err(VizError::InvalidData(format!(
                "unsupported graph schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.graph)
    }
}
