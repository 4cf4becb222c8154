use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::value::{PropertyMap, PropertyValue};

/// Label used whenever an entity or relation carries no usable label/type.
pub const UNKNOWN_LABEL: &str = "Unknown";

const MIN_MARGIN_PX: f64 = 30.0;
const MAX_MARGIN_PX: f64 = 60.0;
const MARGIN_RATIO: f64 = 0.06;

/// Drawing area the layout is bounded to, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Inset kept free on every side of the canvas.
    ///
    /// Scales with the smaller dimension within `[30, 60]` and never exceeds a
    /// quarter of it, so `[margin, dimension - margin]` is never empty.
    #[must_use]
    pub fn margin(self) -> f64 {
        let min_dim = f64::from(self.width.min(self.height));
        (min_dim * MARGIN_RATIO)
            .clamp(MIN_MARGIN_PX, MAX_MARGIN_PX)
            .min(min_dim / 4.0)
    }

    #[must_use]
    pub fn center(self) -> Position {
        Position::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Clamps a position into the margin-inset box.
    #[must_use]
    pub fn clamp(self, position: Position) -> Position {
        let margin = self.margin();
        Position::new(
            position.x.clamp(margin, f64::from(self.width) - margin),
            position.y.clamp(margin, f64::from(self.height) - margin),
        )
    }

    /// Moves the center of a `width` x `height` box so the whole box lies on
    /// the canvas while the center stays in the margin-inset box.
    ///
    /// An axis too short for the box centers it on that axis.
    #[must_use]
    pub fn fit_box(self, center: Position, width: f64, height: f64) -> Position {
        let margin = self.margin();
        let fit = |value: f64, extent: f64, dimension: u32| {
            let dimension = f64::from(dimension);
            let low = margin.max(extent / 2.0);
            let high = (dimension - margin).min(dimension - extent / 2.0);
            if low <= high {
                value.clamp(low, high)
            } else {
                dimension / 2.0
            }
        };
        Position::new(
            fit(center.x, width, self.width),
            fit(center.y, height, self.height),
        )
    }

    #[must_use]
    pub fn contains_within_margin(self, position: Position) -> bool {
        let margin = self.margin();
        position.x >= margin
            && position.x <= f64::from(self.width) - margin
            && position.y >= margin
            && position.y <= f64::from(self.height) - margin
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Classifier input unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl Point {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            x: None,
            y: None,
        }
    }

    #[must_use]
    pub fn with_xy(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    #[must_use]
    pub fn has_xy(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }
}

/// Graph node as delivered by a query result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    #[serde(default)]
    pub labels: SmallVec<[String; 2]>,
    #[serde(default)]
    pub properties: PropertyMap,
}

impl Entity {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            labels: SmallVec::new(),
            properties: PropertyMap::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    #[must_use]
    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// First label, or [`UNKNOWN_LABEL`] when the entity has none.
    #[must_use]
    pub fn primary_label(&self) -> &str {
        self.labels
            .first()
            .map(String::as_str)
            .filter(|label| !label.is_empty())
            .unwrap_or(UNKNOWN_LABEL)
    }
}

/// Directed, typed edge between two entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub id: String,
    #[serde(rename = "type", default)]
    pub relation_type: String,
    pub start_id: String,
    pub end_id: String,
    #[serde(default)]
    pub properties: PropertyMap,
}

impl Relation {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        relation_type: impl Into<String>,
        start_id: impl Into<String>,
        end_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            relation_type: relation_type.into(),
            start_id: start_id.into(),
            end_id: end_id.into(),
            properties: PropertyMap::new(),
        }
    }

    /// Relation type, or [`UNKNOWN_LABEL`] when empty.
    #[must_use]
    pub fn type_label(&self) -> &str {
        if self.relation_type.is_empty() {
            UNKNOWN_LABEL
        } else {
            &self.relation_type
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Entity,
    Group,
}

/// Render-ready node placement.
///
/// Nodes with `parent_id` carry coordinates relative to the top-left corner
/// of their container; every other node is in absolute canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Relation whose both endpoints exist in the invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    #[serde(rename = "type")]
    pub relation_type: String,
    pub source: String,
    pub target: String,
}
