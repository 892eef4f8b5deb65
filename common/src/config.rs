use anyhow::{Context, Result};
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    constants::*,
    gallery::{GalleryItem, PortfolioGallery, default_gallery_items},
    proximity::{ProximityTrigger, ProximityZone},
};

// ============================================================================
// Experience Configuration
// ============================================================================

/// Room layout and content. Every field has a default matching the shipped
/// room, so a config file only needs the values it changes.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperienceConfig {
    pub exit_zone: ProximityZone,
    pub sit_zone: ProximityZone,
    pub gallery: Vec<GalleryItem>,
    // Where walking out of the door leads
    pub exit_link: String,
    // Rate for cutscene clips and the looping screen textures
    pub clip_fps: f32,
    pub play_intro: bool,
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        Self {
            exit_zone: ProximityZone::new(EXIT_ZONE_X, EXIT_ZONE_Z, ZONE_TOLERANCE),
            sit_zone: ProximityZone::new(SIT_ZONE_X, SIT_ZONE_Z, ZONE_TOLERANCE),
            gallery: default_gallery_items(),
            exit_link: "https://nihaalnazeer.com/".to_string(),
            clip_fps: CLIP_FRAMES_PER_SECOND,
            play_intro: true,
        }
    }
}

impl ExperienceConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse experience config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid experience config in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.gallery.is_empty(), "gallery must contain at least one item");
        anyhow::ensure!(self.clip_fps > 0.0, "clip_fps must be positive, got {}", self.clip_fps);
        for zone in [&self.exit_zone, &self.sit_zone] {
            anyhow::ensure!(zone.tolerance >= 0.0, "zone tolerance must not be negative");
        }
        Ok(())
    }

    pub fn build_gallery(&self) -> Result<PortfolioGallery> {
        PortfolioGallery::new(self.gallery.clone())
    }

    #[must_use]
    pub const fn proximity(&self) -> ProximityTrigger {
        ProximityTrigger::new(self.exit_zone, self.sit_zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = ExperienceConfig::from_json("{}").expect("defaults are valid");
        assert_eq!(config, ExperienceConfig::default());
        assert_eq!(config.gallery.len(), 20);
    }

    #[test]
    fn partial_override() {
        let json = r#"{
            "sit_zone": { "x": 1.0, "z": 2.0, "tolerance": 0.5 },
            "clip_fps": 24,
            "play_intro": false
        }"#;
        let config = ExperienceConfig::from_json(json).expect("valid config");
        assert_eq!(config.sit_zone, ProximityZone::new(1.0, 2.0, 0.5));
        assert_eq!(config.exit_zone.x, EXIT_ZONE_X);
        assert_eq!(config.clip_fps, 24.0);
        assert!(!config.play_intro);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(ExperienceConfig::from_json(r#"{ "gallery": [] }"#).is_err());
        assert!(ExperienceConfig::from_json(r#"{ "clip_fps": 0 }"#).is_err());
        assert!(ExperienceConfig::from_json(r#"{ "clip_frames": { "sit": 42 } }"#).is_err());
        assert!(ExperienceConfig::from_json(r#"{ "unknown": 1 }"#).is_err());
        assert!(ExperienceConfig::from_json("not json").is_err());
    }

    #[test]
    fn gallery_and_zones_come_from_config() {
        let json = r#"{ "gallery": [ { "image": "a.png", "link": "https://a" } ] }"#;
        let config = ExperienceConfig::from_json(json).expect("valid config");
        let gallery = config.build_gallery().expect("one item");
        assert_eq!(gallery.len(), 1);
        assert_eq!(config.proximity().sit, config.sit_zone);
    }
}
