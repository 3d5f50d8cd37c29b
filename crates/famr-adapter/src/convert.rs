//! Dataset rows to engine patterns.

use famr_core::Pattern;

use crate::dataset::{Dataset, DatasetHeader, Instance};
use crate::error::{AdapterError, AdapterResult};

/// Build a training pattern from one row. The class column never enters the
/// input vector; a row without a label becomes a query carrying class 0.
pub fn pattern_from_instance(header: &DatasetHeader, instance: &Instance) -> AdapterResult<Pattern> {
    let input = input_vector(header, instance)?;
    let pattern = match instance.value(header.class_index) {
        Some(label) => {
            if label < 0.0 || label.fract() != 0.0 {
                return Err(AdapterError::Dataset(format!(
                    "class value {} is not a label index",
                    label
                )));
            }
            Pattern::new(input, label as usize)
        }
        None => Pattern::query(input),
    };
    Ok(pattern.with_weight(instance.weight))
}

/// Build a query from one row to be classified. Whatever sits in the class
/// column is ignored.
pub fn query_from_instance(header: &DatasetHeader, instance: &Instance) -> AdapterResult<Pattern> {
    Ok(Pattern::query(input_vector(header, instance)?))
}

fn input_vector(header: &DatasetHeader, instance: &Instance) -> AdapterResult<Vec<f64>> {
    header.check_instance(instance)?;
    header
        .input_attributes()
        .map(|(index, attribute)| {
            instance
                .value(index)
                .ok_or_else(|| AdapterError::MissingValue(attribute.name.clone()))
        })
        .collect()
}

/// Convert every row of `data`, in order.
pub fn patterns_from_dataset(data: &Dataset) -> AdapterResult<Vec<Pattern>> {
    data.instances
        .iter()
        .map(|instance| pattern_from_instance(&data.header, instance))
        .collect()
}
