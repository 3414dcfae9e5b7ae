use crate::{catalog::Fixture, error::FixtureError};
use anyhow::Context;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Settings for writing fixtures to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub output_dir: PathBuf,
    pub seed: Option<u64>,
    /// Fixture names to render. Empty means every fixture.
    pub fixtures: Vec<String>,
    pub manifest: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("fixtures"),
            seed: None,
            fixtures: Vec::new(),
            manifest: true,
        }
    }
}

impl RenderConfig {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self, FixtureError> {
        let config_path = config_path.as_ref();
        let json = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
        Self::from_json(&json).with_context(|| format!("Invalid config file: {:?}", config_path))
    }

    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        let config: RenderConfig = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Resolves the configured names, in catalog order when none are given.
    ///
    /// Repeated names resolve once, at their first position.
    pub fn selected(&self) -> Result<Vec<Fixture>, FixtureError> {
        if self.fixtures.is_empty() {
            return Ok(Fixture::ALL.to_vec());
        }
        let fixtures: Vec<Fixture> = self
            .fixtures
            .iter()
            .map(|name| name.parse())
            .collect::<Result<_, _>>()?;
        Ok(fixtures.into_iter().unique().collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = RenderConfig::from_json(r#"{ "seed": 42 }"#).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.output_dir, PathBuf::from("fixtures"));
        assert!(config.manifest);
        assert_eq!(config.selected().unwrap(), Fixture::ALL.to_vec());
    }

    #[test]
    fn test_selected_keeps_given_order() {
        let config = RenderConfig {
            fixtures: vec!["rotated_image".to_string(), "binary_image".to_string()],
            ..Default::default()
        };
        assert_eq!(
            config.selected().unwrap(),
            vec![Fixture::RotatedImage, Fixture::BinaryImage]
        );
    }

    #[test]
    fn test_selected_drops_repeats() {
        let config = RenderConfig {
            fixtures: ["noisy_image", "empty_image", "noisy_image", "noisy_image", "empty_image"]
                .map(String::from)
                .to_vec(),
            ..Default::default()
        };
        assert_eq!(
            config.selected().unwrap(),
            vec![Fixture::NoisyImage, Fixture::EmptyImage]
        );
    }

    #[test]
    fn test_selected_rejects_unknown_name() {
        let config = RenderConfig {
            fixtures: vec!["sample_image".to_string(), "nope".to_string()],
            ..Default::default()
        };
        assert!(config.selected().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "output_dir": "out", "fixtures": ["empty_image"], "manifest": false }}"#
        )
        .unwrap();

        let config = RenderConfig::load(file.path()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.selected().unwrap(), vec![Fixture::EmptyImage]);
        assert!(!config.manifest);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(RenderConfig::load("/nonexistent/tablefix.json").is_err());
    }
}
