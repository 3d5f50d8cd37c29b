//! `famr classify`: predict labels for every row of a dataset.

use std::path::PathBuf;

use clap::Args;
use famr_adapter::{Classifier, ClassifierSnapshot, Dataset, DatasetHeader, FamrClassifier};
use serde::Serialize;
use tabled::Tabled;

use crate::error::{CliError, CliResult};
use crate::output::{render_rows, OutputFormat};

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Trained model file (JSON)
    #[arg(long)]
    pub model: PathBuf,

    /// Dataset to classify (JSON); the class column may be empty
    #[arg(long)]
    pub data: PathBuf,
}

/// One classified row.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct Prediction {
    #[tabled(rename = "#")]
    pub row: usize,
    #[tabled(rename = "Predicted")]
    pub predicted: String,
    #[tabled(rename = "Confidence")]
    pub confidence: f64,
    #[tabled(rename = "Actual")]
    pub actual: String,
}

pub fn execute(args: &ClassifyArgs, format: OutputFormat) -> CliResult<String> {
    let classifier = FamrClassifier::from_snapshot(ClassifierSnapshot::load_json(&args.model)?)?;
    let data = Dataset::load_json(&args.data)?;
    let header = classifier
        .header()
        .ok_or_else(|| CliError::InvalidInput("model is not trained".into()))?;
    check_compatible(header, &data.header)?;

    let predictions = classify_rows(&classifier, header, &data)?;
    render_rows(&predictions, format)
}

/// Classify every row of `data` against a trained classifier.
pub fn classify_rows(
    classifier: &FamrClassifier,
    header: &DatasetHeader,
    data: &Dataset,
) -> CliResult<Vec<Prediction>> {
    data.instances
        .iter()
        .enumerate()
        .map(|(row, instance)| {
            let predicted = classifier.classify_instance(instance)? as usize;
            let distribution = classifier.distribution_for_instance(instance)?;
            Ok(Prediction {
                row,
                predicted: label(header, predicted),
                confidence: distribution.get(predicted).copied().unwrap_or(0.0),
                actual: instance
                    .value(header.class_index)
                    .map(|v| label(header, v as usize))
                    .unwrap_or_else(|| "-".into()),
            })
        })
        .collect()
}

/// The model and the data must agree on column layout and class labels.
pub fn check_compatible(model: &DatasetHeader, data: &DatasetHeader) -> CliResult<()> {
    if model.num_attributes() != data.num_attributes() || model.class_index != data.class_index {
        return Err(CliError::InvalidInput(format!(
            "dataset layout ({} attributes, class at {}) does not match the model ({} attributes, class at {})",
            data.num_attributes(),
            data.class_index,
            model.num_attributes(),
            model.class_index
        )));
    }
    if model.class_attribute()? != data.class_attribute()? {
        return Err(CliError::InvalidInput(
            "class attribute differs from the model's".into(),
        ));
    }
    Ok(())
}

fn label(header: &DatasetHeader, index: usize) -> String {
    header
        .class_label(index)
        .map(str::to_string)
        .unwrap_or_else(|| index.to_string())
}
