//! Host-facing classifier interface and the FAMR implementation of it.

use std::fmt;
use std::path::Path;

use famr_core::{write_atomic, Famr, FamrError, FamrSnapshot, TrainingSummary};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::capabilities::Capabilities;
use crate::convert::{patterns_from_dataset, query_from_instance};
use crate::dataset::{Dataset, DatasetHeader, Instance};
use crate::diagnostics::DiagnosticLog;
use crate::error::{AdapterError, AdapterResult};
use crate::options::FamrOptions;

/// A batch-trained classifier over tabular datasets.
pub trait Classifier {
    /// Data the classifier accepts.
    fn capabilities(&self) -> Capabilities;

    /// Train on `data`, replacing any previous model.
    fn build_classifier(&mut self, data: &Dataset) -> AdapterResult<()>;

    /// Predicted label index, as a host-style `f64`.
    fn classify_instance(&self, instance: &Instance) -> AdapterResult<f64>;

    /// Per-class probabilities, summing to 1.
    fn distribution_for_instance(&self, instance: &Instance) -> AdapterResult<Vec<f64>>;
}

/// Trained state: the engine plus the header instances are read against.
#[derive(Debug)]
struct Model {
    engine: Famr,
    header: DatasetHeader,
    summary: TrainingSummary,
}

/// Everything needed to restore a trained [`FamrClassifier`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSnapshot {
    pub options: FamrOptions,
    pub header: DatasetHeader,
    pub engine: FamrSnapshot,
}

impl ClassifierSnapshot {
    /// Write as pretty JSON, atomically.
    pub fn save_json(&self, path: impl AsRef<Path>) -> AdapterResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path.as_ref(), json)?;
        Ok(())
    }

    pub fn load_json(path: impl AsRef<Path>) -> AdapterResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// FAMR behind the [`Classifier`] interface.
#[derive(Debug)]
pub struct FamrClassifier {
    options: FamrOptions,
    log: DiagnosticLog,
    model: Option<Model>,
}

impl FamrClassifier {
    pub fn new(options: FamrOptions) -> Self {
        let log = DiagnosticLog::new(options.log.clone());
        Self {
            options,
            log,
            model: None,
        }
    }

    /// Build from a host option list.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> AdapterResult<Self> {
        Ok(Self::new(FamrOptions::parse(args)?))
    }

    pub fn options(&self) -> &FamrOptions {
        &self.options
    }

    /// Replace the options. Takes effect at the next `build_classifier`.
    pub fn set_options(&mut self, options: FamrOptions) {
        if options.log != *self.log.config() {
            self.log = DiagnosticLog::new(options.log.clone());
        }
        self.options = options;
    }

    /// The trained engine, if any.
    pub fn engine(&self) -> Option<&Famr> {
        self.model.as_ref().map(|m| &m.engine)
    }

    /// Summary of the last training run.
    pub fn training_summary(&self) -> Option<&TrainingSummary> {
        self.model.as_ref().map(|m| &m.summary)
    }

    /// Number of committed categories; 0 before training.
    pub fn category_count(&self) -> usize {
        self.engine().map_or(0, Famr::category_count)
    }

    /// Trained state, or `None` before the first build.
    pub fn snapshot(&self) -> Option<ClassifierSnapshot> {
        self.model.as_ref().map(|m| ClassifierSnapshot {
            options: self.options.clone(),
            header: m.header.clone(),
            engine: m.engine.snapshot(),
        })
    }

    /// Restore a trained classifier, checking the header against the engine.
    pub fn from_snapshot(snapshot: ClassifierSnapshot) -> AdapterResult<Self> {
        let ClassifierSnapshot {
            options,
            header,
            engine,
        } = snapshot;
        let engine = Famr::from_snapshot(engine)?;

        let num_classes = header.num_classes()?;
        if num_classes != engine.config().num_classes {
            return Err(AdapterError::Dataset(format!(
                "header has {} classes, model has {}",
                num_classes,
                engine.config().num_classes
            )));
        }
        let inputs = header.input_attributes().count();
        if let Some(dimensions) = engine.dimensions() {
            if dimensions != inputs {
                return Err(AdapterError::Dataset(format!(
                    "header has {} input attributes, model has {}",
                    inputs, dimensions
                )));
            }
        }

        let summary = TrainingSummary {
            category_count: engine.category_count(),
            ..TrainingSummary::default()
        };
        let mut classifier = Self::new(options);
        classifier.model = Some(Model {
            engine,
            header,
            summary,
        });
        Ok(classifier)
    }

    /// Header of the training data.
    pub fn header(&self) -> Option<&DatasetHeader> {
        self.model.as_ref().map(|m| &m.header)
    }

    fn model(&self) -> AdapterResult<&Model> {
        self.model
            .as_ref()
            .ok_or(AdapterError::Engine(FamrError::NotTrained))
    }
}

impl Default for FamrClassifier {
    fn default() -> Self {
        Self::new(FamrOptions::default())
    }
}

impl Classifier for FamrClassifier {
    fn capabilities(&self) -> Capabilities {
        Capabilities::famr()
    }

    fn build_classifier(&mut self, data: &Dataset) -> AdapterResult<()> {
        self.capabilities().check(data)?;

        let mut data = data.clone();
        let dropped = data.delete_with_missing_class();
        let num_classes = data.num_classes()?;

        let mut engine = Famr::new(self.options.to_config(num_classes))?;
        let patterns = patterns_from_dataset(&data)?;
        for pattern in &patterns {
            self.log.record(pattern.to_string());
        }
        let summary = engine.train(&patterns)?;

        self.log.record(format!(
            "class attribute numeric= {}",
            data.header.class_attribute()?.is_numeric()
        ));
        self.log.record(format!("rho_a= {}", self.options.rho_init_a));
        self.log.record(format!("rho_ab= {}", self.options.rho_ab));
        self.log.record(format!("beta_a= {}", self.options.beta_a));
        self.log.record("after training: ");
        self.log
            .record(format!("input categories= {}", engine.category_count()));

        info!(
            relation = %data.header.relation,
            instances = data.len(),
            dropped_unlabeled = dropped,
            categories = engine.category_count(),
            "classifier built"
        );

        self.model = Some(Model {
            engine,
            header: data.header,
            summary,
        });
        Ok(())
    }

    fn classify_instance(&self, instance: &Instance) -> AdapterResult<f64> {
        let model = self.model()?;
        let query = query_from_instance(&model.header, instance)?;
        Ok(model.engine.classify(&query)? as f64)
    }

    fn distribution_for_instance(&self, instance: &Instance) -> AdapterResult<Vec<f64>> {
        let model = self.model()?;
        let query = query_from_instance(&model.header, instance)?;
        Ok(model.engine.class_distribution(&query)?)
    }
}

impl fmt::Display for FamrClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fuzzy ARTMAP with relevance factor")?;
        match &self.model {
            Some(model) => write!(
                f,
                "{} categories over {} inputs",
                model.engine.category_count(),
                model.engine.dimensions().unwrap_or(0)
            ),
            None => write!(f, "(not trained)"),
        }
    }
}
