use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ChartType, DataInput, Point, ValueSummary, classify, normalize};

use super::VizEngine;

/// Render-ready chart payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartModel {
    pub points: Vec<Point>,
    pub chart_type: ChartType,
    #[serde(default)]
    pub summary: Option<ValueSummary>,
}

impl ChartModel {
    /// Classifies already-normalized points.
    #[must_use]
    pub fn from_points(points: Vec<Point>) -> Self {
        let chart_type = classify(&points);
        let summary = ValueSummary::from_points(&points);
        Self {
            points,
            chart_type,
            summary,
        }
    }

    /// `true` when the input held nothing chartable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl VizEngine {
    /// Chart path: normalize, then classify.
    #[must_use]
    pub fn prepare_chart(&self, input: &DataInput) -> ChartModel {
        let model = ChartModel::from_points(normalize(input));
        debug!(
            shape = input.kind(),
            points = model.points.len(),
            chart_type = %model.chart_type,
            "prepared chart model"
        );
        model
    }
}
