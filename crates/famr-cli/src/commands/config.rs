//! `famr config`: show the effective configuration.

use clap::Args;
use famr_adapter::{FamrOptions, OptionSpec};
use serde::Serialize;
use tabled::Tabled;

use crate::config::{effective_options, CliConfig, HyperParams};
use crate::error::CliResult;
use crate::output::{render_record, render_rows, FieldRow, OutputFormat};

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// List the host option names instead of the values
    #[arg(long)]
    pub list_options: bool,

    #[command(flatten)]
    pub params: HyperParams,
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct OptionRow {
    #[tabled(rename = "Option")]
    pub synopsis: String,
    #[tabled(rename = "Description")]
    pub description: String,
}

impl From<&OptionSpec> for OptionRow {
    fn from(spec: &OptionSpec) -> Self {
        Self {
            synopsis: spec.synopsis.to_string(),
            description: spec.description.to_string(),
        }
    }
}

pub fn execute(args: &ConfigArgs, config: &CliConfig, format: OutputFormat) -> CliResult<String> {
    if args.list_options {
        let rows: Vec<OptionRow> = FamrOptions::list_options().iter().map(Into::into).collect();
        return render_rows(&rows, format);
    }

    let options = effective_options(config, &args.params)?;
    let fields = vec![
        FieldRow::new("i_min", options.i_min),
        FieldRow::new("i_max", options.i_max),
        FieldRow::new("rho_init_a", options.rho_init_a),
        FieldRow::new("beta_a", options.beta_a),
        FieldRow::new("rho_ab", options.rho_ab),
        FieldRow::new("iterations", options.iterations),
        FieldRow::new("log.enabled", options.log.enabled),
        FieldRow::new("log.path", options.log.path.display()),
        FieldRow::new("host options", options.to_args().join(" ")),
    ];
    render_record(&options, fields, format)
}
