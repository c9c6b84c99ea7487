//! Conversion configuration management.
//!
//! Configuration is loaded from an optional YAML file and handed to the
//! batch layer explicitly; nothing here is process-global.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Canonical list of candidate config file names we search for on disk.
const CONFIG_FILENAMES: &[&str] = &["negpos.yml", "negpos.yaml"];

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "NEGPOS_CONFIG";

/// Settings for a batch conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Directory scanned for negatives
    pub input_dir: PathBuf,

    /// Directory that receives the converted positives
    pub output_dir: PathBuf,

    /// Number of worker threads (None = one per logical CPU)
    pub threads: Option<usize>,

    /// Descend into subdirectories of `input_dir`
    pub recursive: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            threads: None,
            recursive: false,
        }
    }
}

impl ConvertConfig {
    /// Clamp values that would make the run meaningless.
    pub fn sanitize(mut self) -> Self {
        if self.threads == Some(0) {
            self.threads = None;
        }
        self
    }
}

/// Loaded configuration together with where it came from.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    pub config: ConvertConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl ConfigHandle {
    fn with_config(config: ConvertConfig, source: Option<PathBuf>, warnings: Vec<String>) -> Self {
        Self {
            config,
            source,
            warnings,
        }
    }

    /// Log config source and any warnings collected while searching.
    pub fn log_usage(&self) {
        match &self.source {
            Some(source) => info!("Loaded config from {}", source.display()),
            None => info!("Using built-in defaults"),
        }
        for warning in &self.warnings {
            warn!("Config warning: {}", warning);
        }
    }
}

/// Load configuration from disk, optionally forcing a specific path.
///
/// Candidates are tried in order; the first one that parses wins. Files that
/// exist but cannot be read or parsed are recorded as warnings and skipped.
pub fn load_config(custom_path: Option<&Path>) -> ConfigHandle {
    let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    load_from_candidates(get_config_candidates(custom_path, env_path))
}

fn load_from_candidates(candidates: Vec<PathBuf>) -> ConfigHandle {
    let mut warnings = Vec::new();

    for candidate in candidates {
        if !candidate.is_file() {
            continue;
        }

        match fs::read_to_string(&candidate) {
            Ok(contents) => match serde_yaml::from_str::<ConvertConfig>(&contents) {
                Ok(config) => {
                    let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                    return ConfigHandle::with_config(config.sanitize(), Some(source), warnings);
                }
                Err(err) => warnings.push(format!(
                    "Failed to parse config {}: {}",
                    candidate.display(),
                    err
                )),
            },
            Err(err) => warnings.push(format!(
                "Failed to read config {}: {}",
                candidate.display(),
                err
            )),
        }
    }

    warnings.push("No config file found; using built-in defaults.".to_string());
    ConfigHandle::with_config(ConvertConfig::default(), None, warnings)
}

/// Get list of config file candidates to try
fn get_config_candidates(custom_path: Option<&Path>, env_path: Option<PathBuf>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom_path {
        candidates.push(path.to_path_buf());
    }

    if let Some(path) = env_path {
        candidates.push(path);
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(home_dir) = dirs::home_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(home_dir.join("negpos").join(name));
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = ConvertConfig::default();
        assert_eq!(config.input_dir, PathBuf::from("input"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.threads, None);
        assert!(!config.recursive);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: ConvertConfig = serde_yaml::from_str("output_dir: /tmp/positives\n").unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/positives"));
        assert_eq!(config.input_dir, PathBuf::from("input"));
    }

    #[test]
    fn test_sanitize_zero_threads() {
        let config = ConvertConfig {
            threads: Some(0),
            ..ConvertConfig::default()
        }
        .sanitize();
        assert_eq!(config.threads, None);

        let config = ConvertConfig {
            threads: Some(4),
            ..ConvertConfig::default()
        }
        .sanitize();
        assert_eq!(config.threads, Some(4));
    }

    #[test]
    fn test_first_parsable_candidate_wins() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("broken.yml");
        let good = dir.path().join("good.yml");
        let ignored = dir.path().join("ignored.yml");
        fs::write(&broken, "threads: [not, a, number]\n").unwrap();
        fs::write(&good, "input_dir: scans\nthreads: 0\nrecursive: true\n").unwrap();
        fs::write(&ignored, "input_dir: elsewhere\n").unwrap();

        let handle = load_from_candidates(vec![
            dir.path().join("missing.yml"),
            broken.clone(),
            good.clone(),
            ignored,
        ]);

        assert_eq!(handle.config.input_dir, PathBuf::from("scans"));
        assert_eq!(handle.config.threads, None);
        assert!(handle.config.recursive);
        assert_eq!(handle.source, Some(fs::canonicalize(&good).unwrap()));
        assert_eq!(handle.warnings.len(), 1);
        assert!(handle.warnings[0].contains("broken.yml"));
    }

    #[test]
    fn test_no_candidates_uses_defaults() {
        let dir = tempdir().unwrap();
        let handle = load_from_candidates(vec![dir.path().join("nope.yml")]);

        assert_eq!(handle.config, ConvertConfig::default());
        assert!(handle.source.is_none());
        assert!(handle
            .warnings
            .iter()
            .any(|w| w.contains("using built-in defaults")));
    }

    #[test]
    fn test_candidate_order() {
        let custom = PathBuf::from("/custom/negpos.yml");
        let env = PathBuf::from("/env/negpos.yml");
        let candidates = get_config_candidates(Some(&custom), Some(env.clone()));

        assert_eq!(candidates[0], custom);
        assert_eq!(candidates[1], env);
        assert!(candidates
            .iter()
            .skip(2)
            .all(|c| c.file_name().is_some_and(|n| CONFIG_FILENAMES.contains(&n.to_str().unwrap()))));
    }
}
