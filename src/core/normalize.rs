use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{Entity, Point, Relation, UNKNOWN_LABEL};
use crate::core::value::{PropertyMap, PropertyValue};
use crate::error::{VizError, VizResult};

const RECORD_LABEL_KEYS: [&str; 3] = ["name", "title", "id"];
const ITEM_LABEL_KEYS: [&str; 3] = ["name", "label", "title"];

/// Every input shape the normalizer understands.
///
/// JSON payloads carry the shape explicitly:
/// `{"kind": "records", "data": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum DataInput {
    Records(Vec<PropertyMap>),
    Nodes(Vec<Entity>),
    Relationships(Vec<Relation>),
    Array(Vec<PropertyValue>),
    Object(PropertyMap),
}

impl DataInput {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Records(_) => "records",
            Self::Nodes(_) => "nodes",
            Self::Relationships(_) => "relationships",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    pub fn from_json_str(input: &str) -> VizResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| VizError::InvalidData(format!("failed to parse data input: {e}")))
    }
}

/// Converts any supported input shape into classifier points.
///
/// Never fails: an input with nothing extractable yields an empty list, which
/// callers render as a "no data" state.
#[must_use]
pub fn normalize(input: &DataInput) -> Vec<Point> {
    let points = match input {
        DataInput::Records(records) => {
            let indexed: Vec<(usize, &PropertyMap)> = records.iter().enumerate().collect();
            normalize_records(&indexed, &RECORD_LABEL_KEYS, "Record")
        }
        DataInput::Nodes(nodes) => {
            count_frequencies(nodes.iter().map(|node| node.primary_label().to_owned()))
        }
        DataInput::Relationships(relations) => {
            count_frequencies(relations.iter().map(|rel| rel.type_label().to_owned()))
        }
        DataInput::Array(items) => normalize_array(items),
        DataInput::Object(map) => map
            .iter()
            .filter_map(|(key, value)| value.as_number().map(|n| Point::new(key.clone(), n)))
            .collect(),
    };

    debug!(shape = input.kind(), points = points.len(), "normalized input");
    points
}

fn normalize_array(items: &[PropertyValue]) -> Vec<Point> {
    if items.first().is_some_and(PropertyValue::is_map) {
        let indexed: Vec<(usize, &PropertyMap)> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| item.as_map().map(|map| (index, map)))
            .collect();
        return normalize_records(&indexed, &ITEM_LABEL_KEYS, "Item");
    }

    count_frequencies(items.iter().map(PropertyValue::display_string))
}

/// Numeric-field extraction with a frequency-count fallback.
///
/// The value field is the first key of the first record holding a number.
fn normalize_records(
    records: &[(usize, &PropertyMap)],
    label_keys: &[&str],
    fallback_prefix: &str,
) -> Vec<Point> {
    let Some((_, first)) = records.first() else {
        return Vec::new();
    };

    let value_field = first
        .iter()
        .find(|(_, value)| value.as_number().is_some())
        .map(|(key, _)| key.as_str());

    match value_field {
        Some(field) => records
            .iter()
            .filter_map(|(index, record)| {
                let value = record.get(field)?.coerce_number()?;
                let label = record_label(record, label_keys)
                    .unwrap_or_else(|| format!("{fallback_prefix} {}", index + 1));
                let point = Point::new(label, value);
                Some(match (numeric_field(record, "x"), numeric_field(record, "y")) {
                    (Some(x), Some(y)) => point.with_xy(x, y),
                    _ => point,
                })
            })
            .collect(),
        None => {
            let Some(key) = first.keys().next() else {
                return Vec::new();
            };
            count_frequencies(records.iter().map(|(_, record)| {
                record
                    .get(key)
                    .and_then(PropertyValue::as_label)
                    .unwrap_or_else(|| UNKNOWN_LABEL.to_owned())
            }))
        }
    }
}

fn record_label(record: &PropertyMap, label_keys: &[&str]) -> Option<String> {
    label_keys
        .iter()
        .find_map(|key| record.get(*key).and_then(PropertyValue::as_label))
}

fn numeric_field(record: &PropertyMap, key: &str) -> Option<f64> {
    record.get(key).and_then(PropertyValue::as_number)
}

/// One point per distinct key, in order of first appearance.
fn count_frequencies(keys: impl Iterator<Item = String>) -> Vec<Point> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(label, count)| Point::new(label, count as f64))
        .collect()
}
