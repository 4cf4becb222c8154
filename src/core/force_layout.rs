use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[cfg(feature = "parallel-layout")]
use rayon::prelude::*;

use crate::core::types::{Canvas, Position};
use crate::error::{VizError, VizResult};

pub const DEFAULT_ITERATIONS: usize = 100;
pub const MAX_ITERATIONS: usize = 10_000;
pub const DEFAULT_REPULSION: f64 = 200_000.0;
pub const DEFAULT_ATTRACTION: f64 = 0.05;
pub const DEFAULT_ALPHA_MIN: f64 = 0.05;

const MIN_DISTANCE_PX: f64 = 1.0;
const STEP_CAP_RATIO: f64 = 0.1;

/// Final coordinates keyed by node id, in first-occurrence order of the input ids.
pub type LayoutPositions = IndexMap<String, Position>;

type Force = (f64, f64);

/// Directed edge between two layout node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub source: String,
    pub target: String,
}

impl LayoutEdge {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Force-simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceLayoutConfig {
    pub canvas: Canvas,
    pub iterations: usize,
    /// Inverse-square repulsion constant applied to every node pair.
    pub repulsion: f64,
    /// Linear attraction constant applied along every edge.
    pub attraction: f64,
    /// Floor of the linearly decaying damping factor.
    pub alpha_min: f64,
    /// Seed for the initial placement; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for ForceLayoutConfig {
    fn default() -> Self {
        Self::new(Canvas::default())
    }
}

impl ForceLayoutConfig {
    #[must_use]
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            iterations: DEFAULT_ITERATIONS,
            repulsion: DEFAULT_REPULSION,
            attraction: DEFAULT_ATTRACTION,
            alpha_min: DEFAULT_ALPHA_MIN,
            seed: None,
        }
    }

    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    #[must_use]
    pub fn with_repulsion(mut self, repulsion: f64) -> Self {
        self.repulsion = repulsion;
        self
    }

    #[must_use]
    pub fn with_attraction(mut self, attraction: f64) -> Self {
        self.attraction = attraction;
        self
    }

    #[must_use]
    pub fn with_alpha_min(mut self, alpha_min: f64) -> Self {
        self.alpha_min = alpha_min;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> VizResult<()> {
        if !self.canvas.is_valid() {
            return Err(VizError::InvalidCanvas {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }
        if self.iterations > MAX_ITERATIONS {
            return Err(VizError::InvalidConfig(format!(
                "iteration count {} exceeds maximum of {MAX_ITERATIONS}",
                self.iterations
            )));
        }
        if !self.repulsion.is_finite() || self.repulsion < 0.0 {
            return Err(VizError::InvalidConfig(
                "repulsion strength must be finite and >= 0".to_owned(),
            ));
        }
        if !self.attraction.is_finite() || self.attraction < 0.0 {
            return Err(VizError::InvalidConfig(
                "attraction strength must be finite and >= 0".to_owned(),
            ));
        }
        if !self.alpha_min.is_finite() || self.alpha_min <= 0.0 || self.alpha_min > 1.0 {
            return Err(VizError::InvalidConfig(
                "alpha floor must be within (0, 1]".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Places nodes on the canvas with a force-directed simulation.
///
/// One node sits at the canvas center and two nodes sit on the horizontal
/// thirds; larger graphs start from a uniform random placement and run
/// `iterations` rounds of all-pairs repulsion plus edge attraction, damped by
/// a linearly decaying `alpha`. Every coordinate of the result lies within
/// `[margin, dimension - margin]`.
///
/// Edges naming unknown ids are skipped. Duplicate ids collapse onto their
/// first occurrence. Cost is `O(iterations * n^2)`; a grid or Barnes-Hut
/// partition would be needed well beyond a few hundred nodes.
pub fn force_layout<S: AsRef<str>>(
    node_ids: &[S],
    edges: &[LayoutEdge],
    config: &ForceLayoutConfig,
) -> VizResult<LayoutPositions> {
    config.validate()?;

    let mut index: IndexMap<&str, usize> = IndexMap::with_capacity(node_ids.len());
    for id in node_ids {
        let next = index.len();
        index.entry(id.as_ref()).or_insert(next);
    }

    let canvas = config.canvas;
    let positions = match index.len() {
        0 => Vec::new(),
        1 => vec![canvas.clamp(canvas.center())],
        2 => {
            let width = f64::from(canvas.width);
            let mid_y = f64::from(canvas.height) / 2.0;
            vec![
                canvas.clamp(Position::new(width / 3.0, mid_y)),
                canvas.clamp(Position::new(width * 2.0 / 3.0, mid_y)),
            ]
        }
        count => {
            let springs = resolve_edges(&index, edges);
            debug!(
                nodes = count,
                edges = springs.len(),
                skipped_edges = edges.len() - springs.len(),
                iterations = config.iterations,
                "running force layout"
            );
            simulate(initial_positions(count, config), &springs, config)
        }
    };

    Ok(index
        .into_keys()
        .zip(positions)
        .map(|(id, position)| (id.to_owned(), position))
        .collect())
}

/// Maps edges to index pairs, dropping dangling references and self-loops.
fn resolve_edges(index: &IndexMap<&str, usize>, edges: &[LayoutEdge]) -> Vec<(usize, usize)> {
    edges
        .iter()
        .filter_map(|edge| {
            let source = *index.get(edge.source.as_str())?;
            let target = *index.get(edge.target.as_str())?;
            (source != target).then_some((source, target))
        })
        .collect()
}

fn initial_positions(count: usize, config: &ForceLayoutConfig) -> Vec<Position> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let canvas = config.canvas;
    let margin = canvas.margin();
    let max_x = f64::from(canvas.width) - margin;
    let max_y = f64::from(canvas.height) - margin;

    (0..count)
        .map(|_| Position::new(rng.gen_range(margin..=max_x), rng.gen_range(margin..=max_y)))
        .collect()
}

fn simulate(
    mut positions: Vec<Position>,
    springs: &[(usize, usize)],
    config: &ForceLayoutConfig,
) -> Vec<Position> {
    let canvas = config.canvas;
    let step_cap = f64::from(canvas.width.max(canvas.height)) * STEP_CAP_RATIO;

    for iteration in 0..config.iterations {
        let alpha = (1.0 - iteration as f64 / config.iterations as f64).max(config.alpha_min);

        // All forces for this round are accumulated before any node moves.
        let mut forces = repulsion_forces(&positions, config.repulsion * alpha);
        accumulate_attraction(&mut forces, &positions, springs, config.attraction * alpha);

        let max_step = step_cap * alpha;
        for (position, (fx, fy)) in positions.iter_mut().zip(forces) {
            let magnitude = fx.hypot(fy);
            let scale = if magnitude > max_step {
                max_step / magnitude
            } else {
                1.0
            };
            *position = canvas.clamp(Position::new(
                position.x + fx * scale,
                position.y + fy * scale,
            ));
        }
        trace!(iteration, alpha, "force layout step");
    }

    positions
}

/// Repulsive push on `a` away from `b`.
///
/// Coincident nodes have no direction, so they are split along the x axis;
/// `a_first` decides which side `a` lands on and keeps the pair symmetric.
fn pair_repulsion(a: Position, b: Position, strength: f64, a_first: bool) -> Force {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let raw = dx.hypot(dy);
    let distance = raw.max(MIN_DISTANCE_PX);
    let magnitude = strength / (distance * distance);
    if raw > 0.0 {
        (dx / raw * magnitude, dy / raw * magnitude)
    } else if a_first {
        (-magnitude, 0.0)
    } else {
        (magnitude, 0.0)
    }
}

#[cfg(not(feature = "parallel-layout"))]
fn repulsion_forces(positions: &[Position], strength: f64) -> Vec<Force> {
    let mut forces = vec![(0.0, 0.0); positions.len()];
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let (fx, fy) = pair_repulsion(positions[i], positions[j], strength, true);
            forces[i].0 += fx;
            forces[i].1 += fy;
            forces[j].0 -= fx;
            forces[j].1 -= fy;
        }
    }
    forces
}

#[cfg(feature = "parallel-layout")]
fn repulsion_forces(positions: &[Position], strength: f64) -> Vec<Force> {
    (0..positions.len())
        .into_par_iter()
        .map(|i| {
            positions
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .fold((0.0, 0.0), |(ax, ay), (j, other)| {
                    let (fx, fy) = pair_repulsion(positions[i], *other, strength, i < j);
                    (ax + fx, ay + fy)
                })
        })
        .collect()
}

fn accumulate_attraction(
    forces: &mut [Force],
    positions: &[Position],
    springs: &[(usize, usize)],
    strength: f64,
) {
    for &(source, target) in springs {
        let dx = positions[target].x - positions[source].x;
        let dy = positions[target].y - positions[source].y;
        let distance = dx.hypot(dy);
        if distance <= 0.0 {
            continue;
        }
        // Unit direction times `distance * strength` reduces to the raw delta.
        let (fx, fy) = (dx * strength, dy * strength);
        forces[source].0 += fx;
        forces[source].1 += fy;
        forces[target].0 -= fx;
        forces[target].1 -= fy;
    }
}
