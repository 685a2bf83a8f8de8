use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// How edges are drawn by the rendering backend.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EdgeCurve {
    #[default]
    Curve,
    Straight,
}

impl EdgeCurve {
    pub fn label(self) -> &'static str {
        match self {
            Self::Curve => "curve",
            Self::Straight => "straight",
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Palette {
    pub node_size: f32,
    pub muted_color: String,
    pub project_color: String,
    pub dimmed_color: String,
    pub edge_size: f32,
    pub edge_color: String,
    pub hover_edge_color: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            node_size: 10.0,
            muted_color: "rgba(73, 94, 152, 0.7)".to_owned(),
            project_color: "rgba(194, 160, 190, 0.7)".to_owned(),
            dimmed_color: "rgba(246, 246, 246, 0.35)".to_owned(),
            edge_size: 1.0,
            edge_color: "rgba(123, 155, 212, 0.7)".to_owned(),
            hover_edge_color: "rgba(194, 160, 190, 0.9)".to_owned(),
        }
    }
}

/// Label culling thresholds, in screen pixels.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LabelSettings {
    pub density: f32,
    pub grid_cell_size: f32,
    pub rendered_size_threshold: f32,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            density: 0.07,
            grid_cell_size: 60.0,
            rendered_size_threshold: 15.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub palette: Palette,
    pub labels: LabelSettings,
    pub edge_curve: EdgeCurve,
    pub image_root: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            labels: LabelSettings::default(),
            edge_curve: EdgeCurve::default(),
            image_root: "./images".to_owned(),
        }
    }
}

impl EngineConfig {
    pub fn image_path(&self, image: &str) -> String {
        format!("{}/{image}", self.image_root.trim_end_matches('/'))
    }
}

pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid settings JSON in {}", path.display()))
}
