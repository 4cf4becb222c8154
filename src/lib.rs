//! vizprep: visualization data preparation engine.
//!
//! Turns query results into render-ready models. The chart path normalizes
//! records, nodes, relationships or raw values into points and classifies
//! them into a chart archetype. The graph path folds entities into group
//! containers and places them with a force-directed layout. Rendering is left
//! to the caller.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{ChartModel, GraphModel, VizEngine, VizEngineConfig};
pub use error::{VizError, VizResult};
