//! mlq-sim configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::Ticks;
use crate::scheduler::{DEFAULT_QUANTUM, Placement};

const LOCAL_CONFIG: &str = ".mlq-sim.yml";

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Time quantum used when neither the CLI nor the workload sets one
    pub quantum: Ticks,

    /// Where unfinished processes are re-admitted
    pub placement: Placement,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub log_level: Option<String>,

    /// Trace output options
    pub trace: TraceConfig,

    /// Random workload defaults
    pub random: RandomConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            placement: Placement::default(),
            log_level: None,
            trace: TraceConfig::default(),
            random: RandomConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        match resolve_path(config_path) {
            Some(path) => Self::load_from_file(&path)
                .context(format!("Failed to load config from {}", path.display())),
            None => {
                tracing::info!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Read only the log level, before logging is set up. Any failure here is
    /// ignored; the full load later reports it.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        log_level_from(&resolve_path(config_path)?)
    }
}

/// The config file to use: the explicit path, else `./.mlq-sim.yml`, else
/// `<config_dir>/mlq-sim/mlq-sim.yml`, whichever exists first.
pub fn resolve_path(explicit: Option<&PathBuf>) -> Option<PathBuf> {
    resolve_path_in(explicit, Path::new(LOCAL_CONFIG), dirs::config_dir())
}

fn resolve_path_in(
    explicit: Option<&PathBuf>,
    local: &Path,
    config_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.clone());
    }
    if local.exists() {
        return Some(local.to_path_buf());
    }
    config_dir
        .map(|dir| dir.join("mlq-sim").join("mlq-sim.yml"))
        .filter(|path| path.exists())
}

fn log_level_from(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    let config: Config = serde_yaml::from_str(&content).ok()?;
    config.log_level
}

/// Trace output options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TraceConfig {
    /// Print every queue's contents after each pass
    pub show_queues: bool,
}

/// Random workload defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RandomConfig {
    pub min_burst: Ticks,
    pub max_burst: Ticks,
    pub seed: u64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            min_burst: 1,
            max_burst: 10,
            seed: 0,
        }
    }
}
