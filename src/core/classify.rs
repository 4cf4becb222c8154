use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::types::Point;

const HISTOGRAM_MIN_POINTS: usize = 21;
const HISTOGRAM_MIN_RANGE: f64 = 10.0;
const PIE_MAX_POINTS: usize = 10;
const LINE_MIN_POINTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Pie,
    Line,
    Scatter,
    Histogram,
}

impl ChartType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Line => "line",
            Self::Scatter => "scatter",
            Self::Histogram => "histogram",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks a chart archetype for normalized points.
///
/// Rules are evaluated in order and the first match wins:
/// 1. scatter: any point carries both `x` and `y`
/// 2. histogram: all values finite, value range > 10 and more than 20 points
/// 3. pie: at most 10 points, all strictly positive
/// 4. line: more than 3 points with strictly increasing labels
/// 5. bar otherwise (also for empty input)
///
/// The line rule compares labels as raw strings. ISO dates sort correctly,
/// but month names and unpadded numbers do not, so this misclassifies some
/// genuine time series.
#[must_use]
pub fn classify(points: &[Point]) -> ChartType {
    if points.is_empty() {
        return ChartType::Bar;
    }
    if points.iter().any(Point::has_xy) {
        return ChartType::Scatter;
    }
    if is_histogram(points) {
        return ChartType::Histogram;
    }
    if points.len() <= PIE_MAX_POINTS && points.iter().all(|point| point.value > 0.0) {
        return ChartType::Pie;
    }
    if points.len() >= LINE_MIN_POINTS
        && points
            .windows(2)
            .all(|pair| pair[1].label.as_str() > pair[0].label.as_str())
    {
        return ChartType::Line;
    }
    ChartType::Bar
}

fn is_histogram(points: &[Point]) -> bool {
    if points.len() < HISTOGRAM_MIN_POINTS || !points.iter().all(|p| p.value.is_finite()) {
        return false;
    }
    ValueSummary::from_points(points)
        .is_some_and(|summary| summary.max - summary.min > HISTOGRAM_MIN_RANGE)
}

/// Aggregate over the finite point values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub total: f64,
}

impl ValueSummary {
    /// Returns `None` when no point has a finite value.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let values = || {
            points
                .iter()
                .map(|point| point.value)
                .filter(|value| value.is_finite())
        };
        let min = values().map(OrderedFloat).min()?.into_inner();
        let max = values().map(OrderedFloat).max()?.into_inner();
        Some(Self {
            count: values().count(),
            min,
            max,
            total: values().sum(),
        })
    }

    /// Share of `value` in the total, or `0` when the total is zero.
    #[must_use]
    pub fn share_of(self, value: f64) -> f64 {
        if self.total == 0.0 {
            0.0
        } else {
            value / self.total
        }
    }
}
