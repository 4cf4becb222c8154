use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    ContainerSize, Entity, GraphEdge, Group, Grouping, LayoutEdge, NodeKind, Position,
    PositionedNode, Relation, child_offset, container_size, force_layout, group_entities,
};
use crate::error::VizResult;

use super::VizEngine;

/// Render-ready graph payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphModel {
    pub nodes: Vec<PositionedNode>,
    pub groups: Vec<Group>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

impl GraphModel {
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Children placed inside the given group container, in stacking order.
    pub fn children_of<'a>(
        &'a self,
        group_id: &'a str,
    ) -> impl Iterator<Item = &'a PositionedNode> {
        self.nodes
            .iter()
            .filter(move |node| node.parent_id.as_deref() == Some(group_id))
    }

    #[must_use]
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == id)
    }

    /// Top-left corner of a group container in canvas coordinates.
    #[must_use]
    pub fn container_origin(&self, group_id: &str) -> Option<Position> {
        let node = self
            .nodes
            .iter()
            .find(|node| node.id == group_id && node.kind == NodeKind::Group)?;
        let group = self.group(group_id)?;
        Some(Position::new(
            node.x - group.width / 2.0,
            node.y - group.height / 2.0,
        ))
    }

    /// Canvas coordinates of a node, resolving container-relative children.
    #[must_use]
    pub fn absolute_position(&self, id: &str) -> Option<Position> {
        let node = self.node(id)?;
        match node.parent_id.as_deref() {
            Some(group_id) => {
                let origin = self.container_origin(group_id)?;
                Some(Position::new(origin.x + node.x, origin.y + node.y))
            }
            None => Some(Position::new(node.x, node.y)),
        }
    }
}

impl VizEngine {
    /// Graph path: group (when configured), lay out, then assemble positioned nodes.
    ///
    /// Containers and ungrouped entities are placed by the force layout in
    /// absolute canvas coordinates. Relations touching a grouped entity pull on
    /// its container instead, and relations inside one container are ignored
    /// by the layout. Container centers are then pulled in so the whole box
    /// stays on the canvas. Children are stacked inside their container at
    /// offsets relative to its top-left corner.
    pub fn prepare_graph(
        &self,
        entities: Vec<Entity>,
        relations: &[Relation],
    ) -> VizResult<GraphModel> {
        let config = self.config();
        let mut grouping = match config.grouping_property() {
            Some(property) => group_entities(entities, property),
            None => Grouping {
                ungrouped: entities,
                ..Grouping::default()
            },
        };

        for group in &mut grouping.groups {
            group.fit(config.node_spacing, config.rank_spacing);
        }

        let known: HashSet<&str> = grouping
            .ungrouped
            .iter()
            .chain(&grouping.children)
            .map(|entity| entity.id.as_str())
            .collect();
        let connected: Vec<&Relation> = relations
            .iter()
            .filter(|rel| {
                known.contains(rel.start_id.as_str()) && known.contains(rel.end_id.as_str())
            })
            .collect();

        let layout_ids: Vec<&str> = grouping
            .ungrouped
            .iter()
            .map(|entity| entity.id.as_str())
            .chain(grouping.groups.iter().map(|group| group.id.as_str()))
            .collect();
        let layout_edges: Vec<LayoutEdge> = connected
            .iter()
            .filter_map(|rel| {
                let source = grouping.parent_of(&rel.start_id).unwrap_or(rel.start_id.as_str());
                let target = grouping.parent_of(&rel.end_id).unwrap_or(rel.end_id.as_str());
                (source != target).then(|| LayoutEdge::new(source, target))
            })
            .collect();

        let positions = force_layout(&layout_ids, &layout_edges, &config.layout_config())?;
        let canvas = config.canvas();
        // Every layout id has a position; the center fallback is never taken.
        let placed = |id: &str| {
            let position = positions.get(id).copied();
            debug_assert!(position.is_some(), "layout dropped node {id}");
            position.unwrap_or_else(|| canvas.center())
        };

        let mut nodes = Vec::with_capacity(grouping.entity_count() + grouping.groups.len());
        for entity in &grouping.ungrouped {
            let position = placed(entity.id.as_str());
            nodes.push(PositionedNode {
                id: entity.id.clone(),
                label: entity.primary_label().to_owned(),
                kind: NodeKind::Entity,
                x: position.x,
                y: position.y,
                parent_id: None,
            });
        }

        let mut children = grouping.children.iter();
        for group in &grouping.groups {
            let center = placed(group.id.as_str());
            let position = canvas.fit_box(center, group.width, group.height);
            nodes.push(PositionedNode {
                id: group.id.clone(),
                label: group.value.clone(),
                kind: NodeKind::Group,
                x: position.x,
                y: position.y,
                parent_id: None,
            });
            for (index, child) in children.by_ref().take(group.size).enumerate() {
                let offset = child_offset(index, config.node_spacing, config.rank_spacing);
                nodes.push(PositionedNode {
                    id: child.id.clone(),
                    label: child.primary_label().to_owned(),
                    kind: NodeKind::Entity,
                    x: offset.x,
                    y: offset.y,
                    parent_id: Some(group.id.clone()),
                });
            }
        }

        let edges: Vec<GraphEdge> = connected
            .iter()
            .map(|rel| GraphEdge {
                id: rel.id.clone(),
                relation_type: rel.type_label().to_owned(),
                source: rel.start_id.clone(),
                target: rel.end_id.clone(),
            })
            .collect();

        debug!(
            nodes = nodes.len(),
            groups = grouping.groups.len(),
            edges = edges.len(),
            dangling_edges = relations.len() - edges.len(),
            "prepared graph model"
        );

        Ok(GraphModel {
            nodes,
            groups: grouping.groups,
            edges,
        })
    }

    /// Container size hint for a group, using the engine's spacing.
    #[must_use]
    pub fn container_size_for(&self, group: &Group) -> ContainerSize {
        let config = self.config();
        container_size(group.size, config.node_spacing, config.rank_spacing)
    }
}
