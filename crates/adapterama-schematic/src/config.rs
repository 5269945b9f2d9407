//! `adapterama.toml` project configuration.
//!
//! ```toml
//! [project]
//! name = "adapterama"
//! title = "Adapterama - JTAG Converter Pack"
//!
//! [layout]
//! char_width_factor = 0.6
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::Path;

use adapterama_symbol::LayoutConfig;
use serde::Deserialize;

use crate::error::{Result, SchematicError};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub project: ProjectConfig,
    pub layout: LayoutConfig,
}

/// Title block and project naming.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project name used in each instance's `(instances (project ..))` binding.
    pub name: String,
    pub title: String,
    pub revision: String,
    pub paper: String,
    /// Title block comment lines, numbered from 1.
    pub comments: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "adapterama".to_string(),
            title: "Adapterama - JTAG Converter Pack".to_string(),
            revision: "1.0".to_string(),
            paper: "A3".to_string(),
            comments: vec![
                "Multi-format JTAG/SWD adapter - Female output connectors".to_string(),
                "ARM 20-pin, TI CTI-20, Cortex 10-pin outputs".to_string(),
                "Passive adapter - wire per WIRING_GUIDE.md".to_string(),
            ],
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        log::debug!("Loading config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| SchematicError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(
            GeneratorConfig::from_toml_str("").unwrap(),
            GeneratorConfig::default()
        );
    }

    #[test]
    fn test_partial_config() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            [project]
            name = "bench"
            paper = "A4"

            [layout]
            row_spacing = 2.54
            "#,
        )
        .unwrap();
        assert_eq!(config.project.name, "bench");
        assert_eq!(config.project.paper, "A4");
        assert_eq!(config.project.revision, "1.0");
        assert_eq!(config.layout.row_spacing, 2.54);
        assert_eq!(config.layout.grid, 0.254);
    }

    #[test]
    fn test_invalid_config() {
        let err = GeneratorConfig::from_toml_str("[layout]\ngrid = \"fine\"").unwrap_err();
        assert!(matches!(err, SchematicError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = GeneratorConfig::from_file(Path::new("/nonexistent/adapterama.toml")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config file /nonexistent/adapterama.toml"));
    }
}
