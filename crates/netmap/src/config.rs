use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::layout::session::SessionOptions;
use crate::layout::{LayoutAlgorithm, NodeSize};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "netmap";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_engine: Option<LayoutEngineConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<LayoutAlgorithm>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_ports: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutEngineConfig {
    /// URL of an ELK layout service. Without one, nodes are scattered offline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_height: Option<f64>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `netmap config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# netmap configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.algorithm" => {
                let algorithm = value.parse::<LayoutAlgorithm>().map_err(anyhow::Error::msg)?;
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .algorithm = Some(algorithm);
            }
            "defaults.show_ports" => {
                let show_ports = match value {
                    "true" | "yes" | "on" => true,
                    "false" | "no" | "off" => false,
                    _ => anyhow::bail!("Invalid show_ports: {value}. Must be 'true' or 'false'."),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .show_ports = Some(show_ports);
            }
            "layout_engine.endpoint" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    anyhow::bail!("Invalid endpoint: {value}. Must be an http:// or https:// URL.");
                }
                self.layout_engine
                    .get_or_insert_with(LayoutEngineConfig::default)
                    .endpoint = Some(value.to_string());
            }
            "layout_engine.node_width" | "layout_engine.node_height" => {
                let size = parse_dimension(key, value)?;
                let engine = self
                    .layout_engine
                    .get_or_insert_with(LayoutEngineConfig::default);
                if key.ends_with("width") {
                    engine.node_width = Some(size);
                } else {
                    engine.node_height = Some(size);
                }
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.algorithm, defaults.show_ports, layout_engine.endpoint, layout_engine.node_width, layout_engine.node_height"
            ),
        }
        Ok(())
    }

    pub fn algorithm(&self) -> LayoutAlgorithm {
        self.defaults
            .as_ref()
            .and_then(|d| d.algorithm)
            .unwrap_or_default()
    }

    pub fn show_ports(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.show_ports)
            .unwrap_or(true)
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.layout_engine
            .as_ref()
            .and_then(|e| e.endpoint.as_deref())
    }

    pub fn node_size(&self) -> NodeSize {
        let default = NodeSize::default();
        let engine = self.layout_engine.as_ref();
        NodeSize {
            width: engine.and_then(|e| e.node_width).unwrap_or(default.width),
            height: engine.and_then(|e| e.node_height).unwrap_or(default.height),
        }
    }

    /// Session options as configured, before command-line overrides.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            show_ports: self.show_ports(),
            algorithm: self.algorithm(),
            node_size: self.node_size(),
        }
    }
}

fn parse_dimension(key: &str, value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => anyhow::bail!("Invalid {key}: {value}. Must be a positive number."),
    }
}
