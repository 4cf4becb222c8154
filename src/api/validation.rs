use crate::error::{VizError, VizResult};

use super::VizEngineConfig;

pub(super) fn validate_engine_config(config: &VizEngineConfig) -> VizResult<()> {
    validate_spacing(config.node_spacing, "node spacing")?;
    validate_spacing(config.rank_spacing, "rank spacing")?;
    if let Some(property) = &config.group_by_property {
        if property.trim().is_empty() {
            return Err(VizError::InvalidConfig(
                "group-by property must not be empty".to_owned(),
            ));
        }
    }
    config.layout_config().validate()
}

fn validate_spacing(value: f64, name: &str) -> VizResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(VizError::InvalidConfig(format!(
            "{name} must be finite and > 0"
        )));
    }
    Ok(())
}
