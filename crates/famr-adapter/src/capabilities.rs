//! What kind of data the classifier can learn from.

use crate::dataset::Dataset;
use crate::error::{AdapterError, AdapterResult};

/// Data requirements a classifier declares to its host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub numeric_attributes: bool,
    pub nominal_attributes: bool,
    pub missing_values: bool,
    pub nominal_class: bool,
    pub numeric_class: bool,
    pub missing_class_values: bool,
}

impl Capabilities {
    /// Numeric inputs without gaps, nominal class, unlabeled rows tolerated.
    pub fn famr() -> Self {
        Self {
            numeric_attributes: true,
            nominal_attributes: false,
            missing_values: false,
            nominal_class: true,
            numeric_class: false,
            missing_class_values: true,
        }
    }

    /// Reject `data` if it needs anything these capabilities lack.
    pub fn check(&self, data: &Dataset) -> AdapterResult<()> {
        data.validate()?;
        let header = &data.header;

        let class = header.class_attribute()?;
        if class.is_nominal() && !self.nominal_class {
            return Err(AdapterError::Unsupported(format!(
                "nominal class '{}'",
                class.name
            )));
        }
        if class.is_numeric() && !self.numeric_class {
            return Err(AdapterError::Unsupported(format!(
                "numeric class '{}'",
                class.name
            )));
        }

        for (index, attribute) in header.input_attributes() {
            if attribute.is_nominal() && !self.nominal_attributes {
                return Err(AdapterError::Unsupported(format!(
                    "nominal attribute '{}'",
                    attribute.name
                )));
            }
            if attribute.is_numeric() && !self.numeric_attributes {
                return Err(AdapterError::Unsupported(format!(
                    "numeric attribute '{}'",
                    attribute.name
                )));
            }
            if !self.missing_values && data.instances.iter().any(|i| i.value(index).is_none()) {
                return Err(AdapterError::Unsupported(format!(
                    "missing values in attribute '{}'",
                    attribute.name
                )));
            }
        }

        if !self.missing_class_values
            && data
                .instances
                .iter()
                .any(|i| i.value(header.class_index).is_none())
        {
            return Err(AdapterError::Unsupported("missing class values".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Attribute, Instance};

    fn numeric_dataset() -> Dataset {
        let mut data = Dataset::with_last_class(
            "toy",
            vec![
                Attribute::numeric("a"),
                Attribute::numeric("b"),
                Attribute::nominal("class", &["no", "yes"]),
            ],
        );
        data.push(Instance::dense(&[1.0, 2.0, 0.0]));
        data.push(Instance::new(vec![Some(3.0), Some(4.0), None]));
        data
    }

    #[test]
    fn accepts_numeric_inputs_with_nominal_class() {
        Capabilities::famr().check(&numeric_dataset()).unwrap();
    }

    #[test]
    fn rejects_numeric_class() {
        let mut data = numeric_dataset();
        data.header.attributes[2] = Attribute::numeric("target");
        let err = Capabilities::famr().check(&data).unwrap_err();
        assert!(err.to_string().contains("numeric class"));
    }

    #[test]
    fn rejects_nominal_inputs() {
        let mut data = numeric_dataset();
        data.header.attributes[0] = Attribute::nominal("colour", &["red", "blue"]);
        let err = Capabilities::famr().check(&data).unwrap_err();
        assert!(matches!(err, AdapterError::Unsupported(_)));
    }

    #[test]
    fn rejects_missing_input_values() {
        let mut data = numeric_dataset();
        data.push(Instance::new(vec![None, Some(1.0), Some(1.0)]));
        let err = Capabilities::famr().check(&data).unwrap_err();
        assert!(err.to_string().contains("'a'"));
    }
}
