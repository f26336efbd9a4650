use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::app::{RelationConfig, ViewportConfig};
use crate::content::WordId;
use crate::layout::GridConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct UniverseConfig {
    pub content_path: PathBuf,
    pub grid: GridConfig,
    pub viewport: ViewportConfig,
    pub relations: RelationConfig,
    /// Target of the home button.
    pub home_word_id: WordId,
    pub layout_seed: u64,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            content_path: PathBuf::from("content/data.json"),
            grid: GridConfig::default(),
            viewport: ViewportConfig::default(),
            relations: RelationConfig::default(),
            home_word_id: 17,
            layout_seed: 0,
        }
    }
}

impl UniverseConfig {
    pub fn validate(&self) -> Result<()> {
        let grid = &self.grid;
        if grid.step <= 0 {
            bail!("grid step must be positive, got {}", grid.step);
        }
        if grid.candidate_min > grid.candidate_max {
            bail!(
                "candidate range {}..={} is empty",
                grid.candidate_min,
                grid.candidate_max
            );
        }
        if !(0..=100).contains(&grid.candidate_min) || !(0..=100).contains(&grid.candidate_max) {
            bail!("candidate range must lie inside 0..=100");
        }
        if grid.valid_min > grid.valid_max {
            bail!(
                "placement range {}..={} is empty",
                grid.valid_min,
                grid.valid_max
            );
        }
        if grid.max_ring_radius < 0 {
            bail!("maximum ring radius must not be negative");
        }

        let viewport = &self.viewport;
        if !viewport.scale_threshold.is_finite() || viewport.scale_threshold < 1.0 {
            bail!(
                "scale threshold must be at least 1, got {}",
                viewport.scale_threshold
            );
        }
        if !positive(viewport.zoom_step) {
            bail!("zoom step must be positive, got {}", viewport.zoom_step);
        }
        if !positive(viewport.grid_columns) || viewport.grid_columns < 1.0 {
            bail!("grid column count must be at least 1");
        }
        if !positive(viewport.capture_divisor) {
            bail!("capture radius divisor must be positive");
        }
        if viewport.level_breaks.windows(2).any(|pair| pair[0] > pair[1]) {
            bail!("zoom level breaks must be ascending");
        }
        if viewport.level_breaks[0] < 1.0 || viewport.level_breaks[2] > viewport.scale_threshold {
            bail!("zoom level breaks must lie between 1 and the scale threshold");
        }

        if !positive(self.relations.segment_length) {
            bail!("wave segment length must be positive");
        }
        if self.relations.straight_line_distance < 0.0 {
            bail!("straight line distance must not be negative");
        }

        Ok(())
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = UniverseConfig::default();
        config.validate().expect("defaults validate");
        assert_eq!(config.viewport.scale_threshold, 11.0);
        assert_eq!(config.home_word_id, 17);
    }

    #[test]
    fn rejects_threshold_below_one() {
        let mut config = UniverseConfig::default();
        config.viewport.scale_threshold = 0.5;
        let error = config.validate().expect_err("threshold rejected");
        assert!(error.to_string().contains("scale threshold"));
    }

    #[test]
    fn rejects_empty_candidate_range() {
        let mut config = UniverseConfig::default();
        config.grid.candidate_min = 60;
        config.grid.candidate_max = 40;
        assert!(config.validate().is_err());

        let mut config = UniverseConfig::default();
        config.grid.step = 0;
        assert!(config.validate().is_err());
    }
}
