use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How strictly bin edges must ascend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeOrdering {
    /// Non-decreasing: equal adjacent edges are accepted as zero-width bins.
    #[default]
    Permissive,
    /// Strictly increasing.
    Strict,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BinningConfig {
    #[serde(default)]
    pub edge_ordering: EdgeOrdering,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillConfig {
    #[serde(default = "default_parallel_fill_threshold")]
    pub parallel_fill_threshold: usize,
}

fn default_parallel_fill_threshold() -> usize {
    65536
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            parallel_fill_threshold: default_parallel_fill_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub binning: BinningConfig,
    #[serde(default)]
    pub fill: FillConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("simplehist")
            .join("config.toml")
    }

    /// `$SIMPLEHIST_CONFIG` if set, otherwise [`Config::config_path`].
    pub fn resolved_path() -> PathBuf {
        match std::env::var_os("SIMPLEHIST_CONFIG") {
            Some(env_path) => PathBuf::from(env_path),
            None => Self::config_path(),
        }
    }

    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::resolved_path())
    }

    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let cfg: Self =
            toml::from_str(&content).map_err(|e| crate::SimpleHistError::Config(e.to_string()))?;
        Ok(cfg)
    }

    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::resolved_path())
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::SimpleHistError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.binning.edge_ordering, EdgeOrdering::Permissive);
        assert_eq!(cfg.fill.parallel_fill_threshold, 65536);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[binning]\nedge_ordering = \"strict\"\n").unwrap();
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.binning.edge_ordering, EdgeOrdering::Strict);
        assert_eq!(cfg.fill.parallel_fill_threshold, 65536);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[fill]\nparallel_fill_threshold = \"lots\"\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, crate::SimpleHistError::Config(_)));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.fill.parallel_fill_threshold = 10;
        cfg.save_to(&path).unwrap();
        let back = Config::load_from(&path).unwrap();
        assert_eq!(back.fill.parallel_fill_threshold, 10);
    }

    // only test that touches $SIMPLEHIST_CONFIG
    #[test]
    fn env_override_then_default_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("from_env.toml");
        std::env::set_var("SIMPLEHIST_CONFIG", &path);
        assert_eq!(Config::resolved_path(), path);

        let missing = Config::load().unwrap();
        assert_eq!(missing.binning.edge_ordering, EdgeOrdering::Permissive);

        let mut cfg = Config::default();
        cfg.binning.edge_ordering = EdgeOrdering::Strict;
        cfg.fill.parallel_fill_threshold = 7;
        cfg.save().unwrap();
        assert!(path.exists());
        let loaded = Config::load().unwrap();
        assert_eq!(loaded.binning.edge_ordering, EdgeOrdering::Strict);
        assert_eq!(loaded.fill.parallel_fill_threshold, 7);

        std::env::remove_var("SIMPLEHIST_CONFIG");
        let fallback = Config::resolved_path();
        assert_eq!(fallback, Config::config_path());
        assert!(fallback.ends_with(Path::new("simplehist").join("config.toml")));
    }
}
