pub mod classify;
pub mod force_layout;
pub mod grouping;
pub mod normalize;
pub mod types;
pub mod value;

pub use classify::{ChartType, ValueSummary, classify};
pub use force_layout::{ForceLayoutConfig, LayoutEdge, LayoutPositions, force_layout};
pub use grouping::{ContainerSize, Group, Grouping, child_offset, container_size, group_entities};
pub use normalize::{DataInput, normalize};
pub use types::{
    Canvas, Entity, GraphEdge, NodeKind, Point, Position, PositionedNode, Relation, UNKNOWN_LABEL,
};
pub use value::{PropertyMap, PropertyValue};
