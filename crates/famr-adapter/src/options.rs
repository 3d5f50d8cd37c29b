//! Flat `-name value` option lists, as a classifier host passes them.
//!
//! Recognized: `-iMin -iMax -a -c -r -i -logPath -enableLog`.

use std::path::PathBuf;

use famr_core::{
    FamrConfig, DEFAULT_BETA_A, DEFAULT_EPOCHS, DEFAULT_I_MAX, DEFAULT_I_MIN, DEFAULT_RHO_AB,
    DEFAULT_RHO_INIT_A,
};
use serde::{Deserialize, Serialize};

use crate::diagnostics::DiagnosticLogConfig;
use crate::error::{AdapterError, AdapterResult};

/// Description of one option, for help output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub synopsis: &'static str,
    pub description: &'static str,
}

const OPTION_SPECS: &[OptionSpec] = &[
    OptionSpec {
        name: "iMin",
        synopsis: "-iMin <double>",
        description: "lower bound of the raw input range",
    },
    OptionSpec {
        name: "iMax",
        synopsis: "-iMax <double>",
        description: "upper bound of the raw input range",
    },
    OptionSpec {
        name: "a",
        synopsis: "-a <double>",
        description: "baseline vigilance (rho_a)",
    },
    OptionSpec {
        name: "c",
        synopsis: "-c <double>",
        description: "learning rate (beta_a); only 1, fast learning, is accepted",
    },
    OptionSpec {
        name: "r",
        synopsis: "-r <double>",
        description: "map-field vigilance (rho_ab)",
    },
    OptionSpec {
        name: "logPath",
        synopsis: "-logPath <string>",
        description: "path of the diagnostic log file",
    },
    OptionSpec {
        name: "enableLog",
        synopsis: "-enableLog <boolean>",
        description: "whether the diagnostic log is written",
    },
    OptionSpec {
        name: "i",
        synopsis: "-i <int>",
        description: "passes over the training set",
    },
];

/// Classifier options: engine hyperparameters plus log settings.
///
/// The class count is not an option; it comes from the training data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamrOptions {
    pub i_min: f64,
    pub i_max: f64,
    pub rho_init_a: f64,
    pub beta_a: f64,
    pub rho_ab: f64,
    pub iterations: usize,
    pub log: DiagnosticLogConfig,
}

impl Default for FamrOptions {
    fn default() -> Self {
        Self {
            i_min: DEFAULT_I_MIN,
            i_max: DEFAULT_I_MAX,
            rho_init_a: DEFAULT_RHO_INIT_A,
            beta_a: DEFAULT_BETA_A,
            rho_ab: DEFAULT_RHO_AB,
            iterations: DEFAULT_EPOCHS,
            log: DiagnosticLogConfig::default(),
        }
    }
}

impl FamrOptions {
    /// All recognized options.
    pub fn list_options() -> &'static [OptionSpec] {
        OPTION_SPECS
    }

    /// Parse an option list on top of the defaults.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> AdapterResult<Self> {
        let mut options = Self::default();
        options.apply(args)?;
        Ok(options)
    }

    /// Apply an option list to these options. Options not present keep their
    /// current value; anything unrecognized is an error.
    pub fn apply<S: AsRef<str>>(&mut self, args: &[S]) -> AdapterResult<()> {
        let mut args = args.iter().map(AsRef::as_ref);
        while let Some(flag) = args.next() {
            let name = flag.strip_prefix('-').unwrap_or_default();
            let value = args.next().ok_or_else(|| AdapterError::InvalidOption {
                option: flag.to_string(),
                detail: "missing value".into(),
            })?;

            match name {
                "iMin" => self.i_min = parse_value(flag, value)?,
                "iMax" => self.i_max = parse_value(flag, value)?,
                "a" => self.rho_init_a = parse_value(flag, value)?,
                "c" => self.beta_a = parse_value(flag, value)?,
                "r" => self.rho_ab = parse_value(flag, value)?,
                "i" => self.iterations = parse_value(flag, value)?,
                "logPath" => self.log.path = PathBuf::from(value),
                "enableLog" => self.log.enabled = parse_bool(flag, value)?,
                _ => {
                    return Err(AdapterError::InvalidOption {
                        option: flag.to_string(),
                        detail: "unrecognized option".into(),
                    })
                }
            }
        }
        Ok(())
    }

    /// Render as an option list that `parse` accepts.
    pub fn to_args(&self) -> Vec<String> {
        vec![
            "-iMin".into(),
            self.i_min.to_string(),
            "-iMax".into(),
            self.i_max.to_string(),
            "-a".into(),
            self.rho_init_a.to_string(),
            "-c".into(),
            self.beta_a.to_string(),
            "-r".into(),
            self.rho_ab.to_string(),
            "-logPath".into(),
            self.log.path.display().to_string(),
            "-enableLog".into(),
            self.log.enabled.to_string(),
            "-i".into(),
            self.iterations.to_string(),
        ]
    }

    /// Engine configuration for a dataset with `num_classes` labels.
    pub fn to_config(&self, num_classes: usize) -> FamrConfig {
        FamrConfig {
            i_min: self.i_min,
            i_max: self.i_max,
            rho_init_a: self.rho_init_a,
            beta_a: self.beta_a,
            rho_ab: self.rho_ab,
            epochs: self.iterations,
            ..FamrConfig::for_classes(num_classes)
        }
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: &str) -> AdapterResult<T>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| AdapterError::InvalidOption {
        option: flag.to_string(),
        detail: format!("'{}': {}", value, e),
    })
}

fn parse_bool(flag: &str, value: &str) -> AdapterResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(AdapterError::InvalidOption {
            option: flag.to_string(),
            detail: format!("'{}' is not a boolean", value),
        }),
    }
}
