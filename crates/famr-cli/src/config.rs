//! CLI configuration: an optional TOML file with command-line flags on top.
//!
//! ```toml
//! [famr]
//! i_min = 0.0
//! i_max = 10.0
//! rho_init_a = 0.9
//!
//! [famr.log]
//! enabled = true
//! path = "famr.log"
//! ```

use std::path::{Path, PathBuf};

use clap::Args;
use famr_adapter::FamrOptions;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Contents of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub famr: FamrOptions,
}

impl CliConfig {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// Hyperparameter and log flags shared by the training commands.
#[derive(Debug, Clone, Default, Args)]
pub struct HyperParams {
    /// Lower bound of the raw input range
    #[arg(long)]
    pub i_min: Option<f64>,

    /// Upper bound of the raw input range
    #[arg(long)]
    pub i_max: Option<f64>,

    /// Baseline vigilance
    #[arg(long)]
    pub rho_a: Option<f64>,

    /// Learning rate; only 1 (fast learning) is accepted
    #[arg(long)]
    pub beta_a: Option<f64>,

    /// Map-field vigilance
    #[arg(long)]
    pub rho_ab: Option<f64>,

    /// Passes over the training set
    #[arg(long)]
    pub epochs: Option<usize>,

    /// Write the diagnostic log
    #[arg(long)]
    pub enable_log: bool,

    /// Diagnostic log file
    #[arg(long)]
    pub log_path: Option<PathBuf>,

    /// Raw host option list, e.g. "-a 0.9 -r 0.2"; applied before the flags above
    #[arg(long, allow_hyphen_values = true)]
    pub options: Option<String>,
}

impl HyperParams {
    /// Overlay these flags on `options`.
    pub fn apply(&self, options: &mut FamrOptions) -> CliResult<()> {
        if let Some(raw) = &self.options {
            let args: Vec<&str> = raw.split_whitespace().collect();
            options.apply(&args[..])?;
        }
        if let Some(v) = self.i_min {
            options.i_min = v;
        }
        if let Some(v) = self.i_max {
            options.i_max = v;
        }
        if let Some(v) = self.rho_a {
            options.rho_init_a = v;
        }
        if let Some(v) = self.beta_a {
            options.beta_a = v;
        }
        if let Some(v) = self.rho_ab {
            options.rho_ab = v;
        }
        if let Some(v) = self.epochs {
            options.iterations = v;
        }
        if self.enable_log {
            options.log.enabled = true;
        }
        if let Some(path) = &self.log_path {
            options.log.path = path.clone();
        }
        Ok(())
    }
}

/// Effective options: file values, then flags.
pub fn effective_options(config: &CliConfig, params: &HyperParams) -> CliResult<FamrOptions> {
    let mut options = config.famr.clone();
    params.apply(&mut options)?;
    Ok(options)
}
