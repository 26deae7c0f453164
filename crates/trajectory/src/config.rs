use crate::{
    constants::{
        DEFAULT_HEIGHT_PX, DEFAULT_LEGEND_WIDTH_PX, DEFAULT_WIDTH_PX, MAX_IMAGE_PX, MIN_IMAGE_PX,
    },
    error::{Result, TrajError},
    render::RenderOptions,
};
use serde::{Deserialize, Serialize};
use std::{
    env,
    path::{Path, PathBuf},
};

pub const ENV_OUTPUT_DIR: &str = "PLAY_VIZ_OUTPUT_DIR";

/// Main settings
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DataConfig {
    /// tracking CSV file or directory of CSV files
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RenderConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_width")]
    pub width_px: u32,
    #[serde(default = "default_height")]
    pub height_px: u32,
    #[serde(default = "default_legend_width")]
    pub legend_width_px: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            width_px: default_width(),
            height_px: default_height(),
            legend_width_px: default_legend_width(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("figs")
}

fn default_width() -> u32 {
    DEFAULT_WIDTH_PX
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT_PX
}

fn default_legend_width() -> u32 {
    DEFAULT_LEGEND_WIDTH_PX
}

impl Config {
    /// Loads and validates a TOML config file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TrajError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_toml_str(&content)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `PLAY_VIZ_OUTPUT_DIR` when set to a non-blank value
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(output_dir) = env::var(ENV_OUTPUT_DIR)
            && !output_dir.trim().is_empty()
        {
            let path = PathBuf::from(output_dir.trim());
            if path.exists() && !path.is_dir() {
                return Err(TrajError::Config(format!(
                    "Output path is not a directory: {}",
                    path.display()
                )));
            }
            self.render.output_dir = path;
        }
        Ok(())
    }

    /// 設定の検証
    pub fn validate(&self) -> Result<()> {
        let r = &self.render;
        for (name, value) in [("width_px", r.width_px), ("height_px", r.height_px)] {
            if !(MIN_IMAGE_PX..=MAX_IMAGE_PX).contains(&value) {
                return Err(TrajError::Config(format!(
                    "{} must be between {} and {}, got {}",
                    name, MIN_IMAGE_PX, MAX_IMAGE_PX, value
                )));
            }
        }

        if r.legend_width_px + MIN_IMAGE_PX / 2 > r.width_px {
            return Err(TrajError::Config(format!(
                "legend_width_px ({}) leaves no room for the field in width_px ({})",
                r.legend_width_px, r.width_px
            )));
        }

        if r.output_dir.as_os_str().is_empty() {
            return Err(TrajError::Config("output_dir cannot be empty".to_string()));
        }

        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            width_px: self.render.width_px,
            height_px: self.render.height_px,
            legend_width_px: self.render.legend_width_px,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.render_options(), RenderOptions::default());
        assert_eq!(config.data.path, PathBuf::from("data"));
        assert_eq!(config.render.output_dir, PathBuf::from("figs"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            [render]
            width_px = 1600
            "#,
        )
        .unwrap();
        assert_eq!(config.render.width_px, 1600);
        assert_eq!(config.render.height_px, DEFAULT_HEIGHT_PX);
        assert_eq!(config.data, DataConfig::default());
    }

    #[test]
    fn test_empty_toml() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_size_rejected() {
        let err = Config::from_toml_str("[render]\nheight_px = 10\n").unwrap_err();
        assert!(matches!(err, TrajError::Config(_)));
    }

    #[test]
    fn test_legend_too_wide_rejected() {
        let err =
            Config::from_toml_str("[render]\nwidth_px = 400\nlegend_width_px = 390\n").unwrap_err();
        assert!(matches!(err, TrajError::Config(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = Config::from_toml_str("[render\nwidth_px = ").unwrap_err();
        assert!(matches!(err, TrajError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[data]\npath = \"week1.csv\"\n[render]\noutput_dir = \"out\"\n",
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.data.path, PathBuf::from("week1.csv"));
        assert_eq!(config.render.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load_from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, TrajError::Config(_)));
    }

    // env var tests share process state, so they run as one test
    #[test]
    fn test_apply_env() {
        let orig = env::var(ENV_OUTPUT_DIR).ok();
        let temp_dir = TempDir::new().unwrap();

        unsafe {
            env::set_var(ENV_OUTPUT_DIR, temp_dir.path());
        }
        let mut config = Config::default();
        config.apply_env().unwrap();
        assert_eq!(config.render.output_dir, temp_dir.path());

        unsafe {
            env::set_var(ENV_OUTPUT_DIR, "   ");
        }
        let mut config = Config::default();
        config.apply_env().unwrap();
        assert_eq!(config.render.output_dir, PathBuf::from("figs"));

        let file = temp_dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        unsafe {
            env::set_var(ENV_OUTPUT_DIR, &file);
        }
        let mut config = Config::default();
        assert!(config.apply_env().is_err());

        unsafe {
            env::remove_var(ENV_OUTPUT_DIR);
            if let Some(value) = orig {
                env::set_var(ENV_OUTPUT_DIR, value);
            }
        }
    }
}
