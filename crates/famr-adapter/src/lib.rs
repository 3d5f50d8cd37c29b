//! # famr-adapter
//!
//! Connects the FAMR engine to tabular classifier hosts: JSON datasets with
//! nominal class columns, flat `-name value` option lists, capability
//! checks and an optional diagnostic text log.
//!
//! ```rust
//! use famr_adapter::{Attribute, Classifier, Dataset, FamrClassifier, Instance};
//!
//! let mut data = Dataset::with_last_class(
//!     "toy",
//!     vec![Attribute::numeric("x"), Attribute::nominal("class", &["low", "high"])],
//! );
//! data.push(Instance::dense(&[1.0, 0.0]));
//! data.push(Instance::dense(&[7.0, 1.0]));
//!
//! let mut classifier = FamrClassifier::from_args(&["-a", "0.9"])?;
//! classifier.build_classifier(&data)?;
//! assert_eq!(classifier.classify_instance(&Instance::dense(&[6.8, 0.0]))?, 1.0);
//! # Ok::<(), famr_adapter::AdapterError>(())
//! ```

#![deny(unsafe_code)]

pub mod capabilities;
pub mod classifier;
pub mod convert;
pub mod dataset;
pub mod diagnostics;
pub mod error;
pub mod options;

pub use capabilities::Capabilities;
pub use classifier::{Classifier, ClassifierSnapshot, FamrClassifier};
pub use convert::{pattern_from_instance, patterns_from_dataset, query_from_instance};
pub use dataset::{Attribute, AttributeKind, Dataset, DatasetHeader, Instance};
pub use diagnostics::{DiagnosticLog, DiagnosticLogConfig, DEFAULT_LOG_PATH};
pub use error::{AdapterError, AdapterResult};
pub use options::{FamrOptions, OptionSpec};
