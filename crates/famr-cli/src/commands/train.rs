//! `famr train`: build a model from a dataset and save it.

use std::path::PathBuf;

use clap::Args;
use famr_adapter::{Classifier, Dataset, FamrClassifier};
use serde::Serialize;
use tracing::info;

use crate::config::{effective_options, CliConfig, HyperParams};
use crate::error::{CliError, CliResult};
use crate::output::{render_record, FieldRow, OutputFormat};

#[derive(Debug, Args)]
pub struct TrainArgs {
    /// Training dataset (JSON)
    #[arg(long)]
    pub data: PathBuf,

    /// Output model file (JSON)
    #[arg(long)]
    pub model: PathBuf,

    #[command(flatten)]
    pub params: HyperParams,
}

/// Result of a training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainReport {
    pub relation: String,
    pub instances: usize,
    pub classes: usize,
    pub epochs: usize,
    pub patterns_processed: usize,
    pub categories_created: usize,
    pub resonances: usize,
    pub match_tracking_raises: usize,
    pub categories: usize,
    pub model: String,
}

impl TrainReport {
    fn fields(&self) -> Vec<FieldRow> {
        vec![
            FieldRow::new("Relation", &self.relation),
            FieldRow::new("Instances", self.instances),
            FieldRow::new("Classes", self.classes),
            FieldRow::new("Epochs", self.epochs),
            FieldRow::new("Patterns processed", self.patterns_processed),
            FieldRow::new("Categories created", self.categories_created),
            FieldRow::new("Resonances", self.resonances),
            FieldRow::new("Match tracking raises", self.match_tracking_raises),
            FieldRow::new("Categories", self.categories),
            FieldRow::new("Model", &self.model),
        ]
    }
}

pub fn execute(args: &TrainArgs, config: &CliConfig, format: OutputFormat) -> CliResult<String> {
    let options = effective_options(config, &args.params)?;
    let data = Dataset::load_json(&args.data)?;

    let mut classifier = FamrClassifier::new(options);
    classifier.build_classifier(&data)?;
    let snapshot = classifier
        .snapshot()
        .ok_or_else(|| CliError::InvalidInput("training produced no model".into()))?;
    snapshot.save_json(&args.model)?;
    info!(model = %args.model.display(), "model saved");

    let summary = classifier.training_summary().cloned().unwrap_or_default();
    let report = TrainReport {
        relation: data.header.relation.clone(),
        instances: data.len(),
        classes: data.num_classes()?,
        epochs: summary.epochs,
        patterns_processed: summary.patterns_processed,
        categories_created: summary.categories_created,
        resonances: summary.resonances,
        match_tracking_raises: summary.match_tracking_raises,
        categories: summary.category_count,
        model: args.model.display().to_string(),
    };
    render_record(&report, report.fields(), format)
}
