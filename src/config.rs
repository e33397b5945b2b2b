use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::tui::theme::ThemeKind;

pub const DATA_ENV: &str = "SAT_PLANNER_DATA";
pub const DEFAULT_DATA_FILE: &str = "sat_study_data.json";
pub const DEFAULT_SETTINGS_FILE: &str = "sat-planner.toml";

pub const DEFAULT_RATING_STEP: f64 = 0.5;

/// `--file`, then `$SAT_PLANNER_DATA`, then `sat_study_data.json` in the
/// working directory.
pub fn data_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    match std::env::var_os(DATA_ENV) {
        Some(p) if !p.is_empty() => PathBuf::from(p),
        _ => PathBuf::from(DEFAULT_DATA_FILE),
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemeKind,
    pub rating_step: f64,
    /// Single character → action name; see `tui::keymap`.
    pub keys: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeKind::Dark,
            rating_step: DEFAULT_RATING_STEP,
            keys: HashMap::new(),
        }
    }
}

impl Settings {
    pub fn parse(content: &str) -> Result<Self> {
        let mut s: Settings = toml::from_str(content).context("failed to parse settings")?;
        s.rating_step = if s.rating_step.is_finite() {
            s.rating_step.clamp(0.1, 9.0)
        } else {
            DEFAULT_RATING_STEP
        };
        Ok(s)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Never fails: a missing file gives defaults, a broken one is logged
    /// and also gives defaults.
    pub fn load(explicit: Option<&Path>) -> Self {
        let path = explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
        if !path.exists() {
            if explicit.is_some() {
                tracing::warn!(path = %path.display(), "settings file not found, using defaults");
            }
            return Self::default();
        }
        Self::read(&path).unwrap_or_else(|e| {
            tracing::warn!(error = %format_args!("{e:#}"), "using default settings");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_data_path_wins() {
        let p = data_path(Some(Path::new("/tmp/x.json")));
        assert_eq!(p, PathBuf::from("/tmp/x.json"));
    }

    #[test]
    fn settings_parse_with_partial_table() {
        let s = Settings::parse(
            r#"
            theme = "light"
            [keys]
            "p" = "rating_up"
            "#,
        )
        .unwrap();
        assert_eq!(s.theme, ThemeKind::Light);
        assert_eq!(s.rating_step, DEFAULT_RATING_STEP);
        assert_eq!(s.keys.get("p").map(String::as_str), Some("rating_up"));
    }

    #[test]
    fn rating_step_is_clamped() {
        let s = Settings::parse("rating_step = 0.0").unwrap();
        assert_eq!(s.rating_step, 0.1);
        let s = Settings::parse("rating_step = 50").unwrap();
        assert_eq!(s.rating_step, 9.0);
    }

    #[test]
    fn malformed_settings_is_an_error() {
        assert!(Settings::parse("theme = 3").is_err());
    }

    #[test]
    fn load_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "theme = [").unwrap();
        let s = Settings::load(Some(&bad));
        assert_eq!(s.theme, ThemeKind::Dark);
        let missing = Settings::load(Some(&dir.path().join("none.toml")));
        assert!(missing.keys.is_empty());
    }
}
