//! Tabular datasets: attribute header plus weighted instances.
//!
//! Nominal values are stored as the index of the label in the attribute's
//! value list; a missing value is `None` (`null` in JSON).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AdapterError, AdapterResult};

/// Kind of a dataset column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Numeric,
    Nominal { values: Vec<String> },
}

/// A named dataset column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
}

impl Attribute {
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Numeric,
        }
    }

    pub fn nominal(name: impl Into<String>, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Nominal {
                values: values.iter().map(|v| v.to_string()).collect(),
            },
        }
    }

    pub fn is_nominal(&self) -> bool {
        matches!(self.kind, AttributeKind::Nominal { .. })
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, AttributeKind::Numeric)
    }

    /// Number of labels of a nominal attribute; 1 for numeric ones.
    pub fn num_values(&self) -> usize {
        match &self.kind {
            AttributeKind::Numeric => 1,
            AttributeKind::Nominal { values } => values.len(),
        }
    }
}

fn default_weight() -> f64 {
    1.0
}

/// One row of the dataset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// One value per attribute, class column included.
    pub values: Vec<Option<f64>>,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl Instance {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self { values, weight: 1.0 }
    }

    /// Row without missing values.
    pub fn dense(values: &[f64]) -> Self {
        Self::new(values.iter().copied().map(Some).collect())
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn value(&self, attribute: usize) -> Option<f64> {
        self.values.get(attribute).copied().flatten()
    }
}

// ── Header ──────────────────────────────────────────────────────────────

/// Column layout shared by a dataset and the instances classified against it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetHeader {
    pub relation: String,
    pub attributes: Vec<Attribute>,
    /// Position of the class column in `attributes`.
    pub class_index: usize,
}

impl DatasetHeader {
    pub fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn class_attribute(&self) -> AdapterResult<&Attribute> {
        self.attributes.get(self.class_index).ok_or_else(|| {
            AdapterError::Dataset(format!(
                "class index {} out of range for {} attributes",
                self.class_index,
                self.attributes.len()
            ))
        })
    }

    pub fn num_classes(&self) -> AdapterResult<usize> {
        self.class_attribute().map(Attribute::num_values)
    }

    /// Name of class label `index`, for a nominal class column.
    pub fn class_label(&self, index: usize) -> Option<&str> {
        match &self.attributes.get(self.class_index)?.kind {
            AttributeKind::Nominal { values } => values.get(index).map(String::as_str),
            AttributeKind::Numeric => None,
        }
    }

    /// Input columns, in order, with the class column left out.
    pub fn input_attributes(&self) -> impl Iterator<Item = (usize, &Attribute)> {
        let class_index = self.class_index;
        self.attributes
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != class_index)
    }

    /// Check that `instance` has one value per column.
    pub fn check_instance(&self, instance: &Instance) -> AdapterResult<()> {
        if instance.values.len() != self.attributes.len() {
            return Err(AdapterError::Dataset(format!(
                "instance has {} values, header has {} attributes",
                instance.values.len(),
                self.attributes.len()
            )));
        }
        Ok(())
    }
}

// ── Dataset ─────────────────────────────────────────────────────────────

/// Header plus rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(flatten)]
    pub header: DatasetHeader,
    pub instances: Vec<Instance>,
}

impl Dataset {
    pub fn new(relation: impl Into<String>, attributes: Vec<Attribute>, class_index: usize) -> Self {
        Self {
            header: DatasetHeader {
                relation: relation.into(),
                attributes,
                class_index,
            },
            instances: Vec::new(),
        }
    }

    /// Dataset whose class column is the last attribute.
    pub fn with_last_class(relation: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        let class_index = attributes.len().saturating_sub(1);
        Self::new(relation, attributes, class_index)
    }

    pub fn push(&mut self, instance: Instance) {
        self.instances.push(instance);
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn num_classes(&self) -> AdapterResult<usize> {
        self.header.num_classes()
    }

    /// Drop every row whose class value is missing.
    pub fn delete_with_missing_class(&mut self) -> usize {
        let class_index = self.header.class_index;
        let before = self.instances.len();
        self.instances
            .retain(|instance| instance.value(class_index).is_some());
        before - self.instances.len()
    }

    /// Check header consistency and row shapes.
    pub fn validate(&self) -> AdapterResult<()> {
        self.header.class_attribute()?;
        for instance in &self.instances {
            self.header.check_instance(instance)?;
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> AdapterResult<Self> {
        let dataset: Dataset = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn load_json(path: impl AsRef<Path>) -> AdapterResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
