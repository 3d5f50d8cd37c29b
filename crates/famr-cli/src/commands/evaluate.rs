//! `famr evaluate`: train on one dataset, measure accuracy on another.

use std::path::PathBuf;

use clap::Args;
use famr_adapter::{Classifier, Dataset, FamrClassifier};
use serde::Serialize;

use crate::commands::classify::check_compatible;
use crate::config::{effective_options, CliConfig, HyperParams};
use crate::error::CliResult;
use crate::output::{render_record, FieldRow, OutputFormat};

#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// Training dataset (JSON)
    #[arg(long)]
    pub train: PathBuf,

    /// Test dataset (JSON); rows without a label are skipped
    #[arg(long)]
    pub test: PathBuf,

    #[command(flatten)]
    pub params: HyperParams,
}

/// Hold-out evaluation result.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub relation: String,
    pub train_instances: usize,
    pub test_instances: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub categories: usize,
}

impl Evaluation {
    fn fields(&self) -> Vec<FieldRow> {
        vec![
            FieldRow::new("Relation", &self.relation),
            FieldRow::new("Train instances", self.train_instances),
            FieldRow::new("Test instances", self.test_instances),
            FieldRow::new("Correct", self.correct),
            FieldRow::new("Accuracy", format!("{:.2}%", self.accuracy * 100.0)),
            FieldRow::new("Categories", self.categories),
        ]
    }
}

pub fn execute(args: &EvaluateArgs, config: &CliConfig, format: OutputFormat) -> CliResult<String> {
    let evaluation = evaluate(args, config)?;
    render_record(&evaluation, evaluation.fields(), format)
}

pub fn evaluate(args: &EvaluateArgs, config: &CliConfig) -> CliResult<Evaluation> {
    let options = effective_options(config, &args.params)?;
    let train = Dataset::load_json(&args.train)?;
    let mut test = Dataset::load_json(&args.test)?;
    check_compatible(&train.header, &test.header)?;
    test.delete_with_missing_class();

    let mut classifier = FamrClassifier::new(options);
    classifier.build_classifier(&train)?;

    let class_index = test.header.class_index;
    let mut correct = 0;
    for instance in &test.instances {
        let predicted = classifier.classify_instance(instance)?;
        if instance.value(class_index) == Some(predicted) {
            correct += 1;
        }
    }

    let accuracy = if test.is_empty() {
        0.0
    } else {
        correct as f64 / test.len() as f64
    };
    Ok(Evaluation {
        relation: train.header.relation.clone(),
        train_instances: train.len(),
        test_instances: test.len(),
        correct,
        accuracy,
        categories: classifier.category_count(),
    })
}
