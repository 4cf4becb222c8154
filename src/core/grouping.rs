use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{Entity, Position};
use crate::core::value::PropertyValue;

pub const GROUP_ID_PREFIX: &str = "group-";
pub const CONTAINER_WIDTH_PX: f64 = 300.0;
pub const CONTAINER_MIN_HEIGHT_PX: f64 = 100.0;
pub const CHILD_INSET_X_PX: f64 = 20.0;
pub const DEFAULT_NODE_SPACING_PX: f64 = 60.0;
pub const DEFAULT_RANK_SPACING_PX: f64 = 40.0;

/// Synthetic container for entities sharing a grouping value.
///
/// `width` and `height` are the container box; its top-left corner is the
/// origin of the children's relative offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub value: String,
    pub child_ids: Vec<String>,
    pub size: usize,
    pub width: f64,
    pub height: f64,
}

impl Group {
    /// Recomputes the container box for the given spacing.
    pub fn fit(&mut self, node_spacing: f64, rank_spacing: f64) {
        let box_size = container_size(self.size, node_spacing, rank_spacing);
        self.width = box_size.width;
        self.height = box_size.height;
    }

    #[must_use]
    pub fn container_size(&self) -> ContainerSize {
        ContainerSize {
            width: self.width,
            height: self.height,
        }
    }
}

/// Output of [`group_entities`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grouping {
    pub groups: Vec<Group>,
    pub ungrouped: Vec<Entity>,
    /// Maps every grouped child id to its group id.
    pub child_of: IndexMap<String, String>,
    /// Grouped entities in group order, children in original relative order.
    pub children: Vec<Entity>,
}

impl Grouping {
    #[must_use]
    pub fn parent_of(&self, entity_id: &str) -> Option<&str> {
        self.child_of.get(entity_id).map(String::as_str)
    }

    /// Total number of entities across groups and the ungrouped list.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.ungrouped.len() + self.children.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

/// Layout hint for a container holding `member_count` children.
#[must_use]
pub fn container_size(member_count: usize, node_spacing: f64, rank_spacing: f64) -> ContainerSize {
    ContainerSize {
        width: CONTAINER_WIDTH_PX,
        height: (member_count as f64 * node_spacing + rank_spacing).max(CONTAINER_MIN_HEIGHT_PX),
    }
}

/// Position of the `index`-th child relative to its container's top-left corner.
#[must_use]
pub fn child_offset(index: usize, node_spacing: f64, rank_spacing: f64) -> Position {
    Position::new(CHILD_INSET_X_PX, rank_spacing + index as f64 * node_spacing)
}

/// Partitions entities by the stringified value of `group_property`.
///
/// Entities without the property (or with a null value) stay ungrouped, and
/// so does the sole holder of a value: only values shared by two or more
/// entities produce a [`Group`].
///
/// Group ids are `group-<value>`, suffixed with `-2`, `-3`, ... when that id is
/// already taken by an entity or an earlier group. Containers are sized with
/// the default spacing; see [`Group::fit`].
#[must_use]
pub fn group_entities(nodes: Vec<Entity>, group_property: &str) -> Grouping {
    let mut taken: HashSet<String> = nodes.iter().map(|node| node.id.clone()).collect();
    let keys: Vec<Option<String>> = nodes
        .iter()
        .map(|node| {
            node.properties
                .get(group_property)
                .and_then(PropertyValue::as_label)
        })
        .collect();

    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for key in keys.iter().flatten() {
        *counts.entry(key.as_str()).or_default() += 1;
    }

    let mut members: IndexMap<String, Vec<Entity>> = counts
        .iter()
        .filter(|(_, count)| **count >= 2)
        .map(|(key, count)| ((*key).to_owned(), Vec::with_capacity(*count)))
        .collect();

    let mut ungrouped = Vec::new();
    for (node, key) in nodes.into_iter().zip(keys.iter()) {
        match key.as_ref().and_then(|key| members.get_mut(key)) {
            Some(bucket) => bucket.push(node),
            None => ungrouped.push(node),
        }
    }

    let mut grouping = Grouping {
        ungrouped,
        ..Grouping::default()
    };
    for (value, children) in members {
        let id = unique_group_id(&value, &mut taken);
        let child_ids: Vec<String> = children.iter().map(|child| child.id.clone()).collect();
        for child_id in &child_ids {
            grouping.child_of.insert(child_id.clone(), id.clone());
        }
        let box_size = container_size(
            child_ids.len(),
            DEFAULT_NODE_SPACING_PX,
            DEFAULT_RANK_SPACING_PX,
        );
        grouping.groups.push(Group {
            id,
            value,
            size: child_ids.len(),
            child_ids,
            width: box_size.width,
            height: box_size.height,
        });
        grouping.children.extend(children);
    }

    debug!(
        property = group_property,
        groups = grouping.groups.len(),
        grouped = grouping.children.len(),
        ungrouped = grouping.ungrouped.len(),
        "grouped entities"
    );
    grouping
}

fn unique_group_id(value: &str, taken: &mut HashSet<String>) -> String {
    let base = format!("{GROUP_ID_PREFIX}{value}");
    let mut id = base.clone();
    let mut suffix = 2_usize;
    while taken.contains(&id) {
        id = format!("{base}-{suffix}");
        suffix += 1;
    }
    taken.insert(id.clone());
    id
}
