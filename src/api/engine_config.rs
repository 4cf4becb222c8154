use serde::{Deserialize, Serialize};

use crate::core::force_layout::DEFAULT_ITERATIONS;
use crate::core::{Canvas, ForceLayoutConfig};
use crate::error::{VizError, VizResult};

use super::validation::validate_engine_config;

/// Public engine configuration.
///
/// Keys serialize in camelCase so request payloads can be deserialized
/// directly; every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VizEngineConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Vertical pitch between children stacked inside a group container.
    #[serde(default = "default_node_spacing")]
    pub node_spacing: f64,
    /// Offset of the first child below the top edge of its container.
    #[serde(default = "default_rank_spacing")]
    pub rank_spacing: f64,
    #[serde(default)]
    pub group_by_property: Option<String>,
    #[serde(default = "default_show_hierarchy")]
    pub show_hierarchy: bool,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for VizEngineConfig {
    fn default() -> Self {
        Self::new(default_width(), default_height())
    }
}

impl VizEngineConfig {
    /// Creates a config for the given canvas with every other option defaulted.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            node_spacing: default_node_spacing(),
            rank_spacing: default_rank_spacing(),
            group_by_property: None,
            show_hierarchy: default_show_hierarchy(),
            iterations: default_iterations(),
            seed: None,
        }
    }

    #[must_use]
    pub fn with_node_spacing(mut self, node_spacing: f64) -> Self {
        self.node_spacing = node_spacing;
        self
    }

    #[must_use]
    pub fn with_rank_spacing(mut self, rank_spacing: f64) -> Self {
        self.rank_spacing = rank_spacing;
        self
    }

    /// Sets the entity property used to fold nodes into group containers.
    #[must_use]
    pub fn with_group_by_property(mut self, property: impl Into<String>) -> Self {
        self.group_by_property = Some(property.into());
        self
    }

    #[must_use]
    pub fn with_show_hierarchy(mut self, show_hierarchy: bool) -> Self {
        self.show_hierarchy = show_hierarchy;
        self
    }

    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Fixes the random initial placement so layouts are reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Grouping property in effect, if hierarchy display is enabled.
    #[must_use]
    pub fn grouping_property(&self) -> Option<&str> {
        if self.show_hierarchy {
            self.group_by_property.as_deref()
        } else {
            None
        }
    }

    #[must_use]
    pub fn layout_config(&self) -> ForceLayoutConfig {
        let config = ForceLayoutConfig::new(self.canvas()).with_iterations(self.iterations);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    pub fn validate(&self) -> VizResult<()> {
        validate_engine_config(self)
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> VizResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VizError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> VizResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| VizError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_node_spacing() -> f64 {
    60.0
}

fn default_rank_spacing() -> f64 {
    40.0
}

fn default_show_hierarchy() -> bool {
    true
}

fn default_iterations() -> usize {
    DEFAULT_ITERATIONS
}
