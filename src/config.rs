//! User config: built-in defaults + optional TOML file.
//!
//! - `BlochConfig::default()` → camera at azimuth 60° / elevation 30°, mouse on
//! - `BlochConfig::from_toml_file(path)` → load a user file
//! - `BlochConfig::load(&cli_path)` → `--config FILE` or ~/.blochlab/config.toml
//!
//! ```toml
//! [view]
//! azimuth = 60.0
//! elevation = 30.0
//!
//! [ui]
//! mouse = true
//! notice_seconds = 4
//!
//! [log]
//! filter = "blochlab=debug"
//! file = "/tmp/blochlab.log"
//! ```
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::bloch::Camera;
use crate::core::error::{BlochError, BlochResult};

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct BlochConfig {
    pub view: ViewConfig,
    pub ui: UiConfig,
    pub log: LogConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    /// Degrees around the z axis.
    pub azimuth: f64,
    /// Degrees above the equator.
    pub elevation: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        let cam = Camera::default();
        Self { azimuth: cam.azimuth, elevation: cam.elevation }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub mouse: bool,
    pub notice_seconds: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { mouse: true, notice_seconds: 4 }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { filter: "warn".into(), file: None }
    }
}

impl BlochConfig {
    pub fn from_toml_str(txt: &str, origin: &Path) -> BlochResult<Self> {
        toml::from_str(txt).map_err(|source| BlochError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_file(path: &Path) -> BlochResult<Self> {
        let txt = fs::read_to_string(path).map_err(|source| BlochError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&txt, path)
    }

    /// Use ~/.blochlab/config.toml if present and valid; otherwise built-in.
    pub fn from_user_default_or_builtin() -> Self {
        if let Some(p) = default_config_path() {
            if p.exists() {
                match Self::from_toml_file(&p) {
                    Ok(cfg) => return cfg,
                    Err(e) => eprintln!("(warn) {e}; using built-in config"),
                }
            }
        }
        Self::default()
    }

    /// An explicit `--config` must load; the implicit user file may fall back.
    pub fn load(cli_path: &Option<PathBuf>) -> Result<Self> {
        match cli_path {
            Some(p) => Self::from_toml_file(p)
                .with_context(|| format!("loading config {}", p.display())),
            None => Ok(Self::from_user_default_or_builtin()),
        }
    }

    pub fn camera(&self) -> Camera {
        Camera::new(self.view.azimuth, self.view.elevation)
    }
}

/// ~/.blochlab/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::home_dir().map(|h| h.join(".blochlab").join("config.toml"))
}

pub fn resolve_config_path(cli_path: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_path {
        return Some(p.clone());
    }
    default_config_path()
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_means_defaults() {
        let cfg = BlochConfig::from_toml_str("", Path::new("x.toml")).unwrap();
        assert_eq!(cfg, BlochConfig::default());
        assert_eq!(cfg.camera(), Camera::new(60.0, 30.0));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = BlochConfig::from_toml_str(
            "[view]\nelevation = 10.0\n[ui]\nmouse = false\n",
            Path::new("x.toml"),
        )
        .unwrap();
        assert_eq!(cfg.view.azimuth, 60.0);
        assert_eq!(cfg.view.elevation, 10.0);
        assert!(!cfg.ui.mouse);
        assert_eq!(cfg.ui.notice_seconds, 4);
        assert_eq!(cfg.log.filter, "warn");
    }

    #[test]
    fn bad_toml_reports_path() {
        let err = BlochConfig::from_toml_str("[view\n", Path::new("bad.toml")).unwrap_err();
        assert!(err.to_string().starts_with("Config parse failed for bad.toml"));
    }

    #[test]
    fn cli_path_wins() {
        let p = Some(PathBuf::from("custom.toml"));
        assert_eq!(resolve_config_path(&p), p);
    }
}
