//! CLI command implementations
//!
//! Each command returns its rendered output; `main` prints it.

pub mod classify;
pub mod config;
pub mod evaluate;
pub mod train;

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::{Path, PathBuf};

    use famr_adapter::{Attribute, Dataset, Instance};

    /// Two well separated blobs on [0, 10]², written as JSON.
    pub fn write_blobs(dir: &Path, name: &str, offset: f64) -> PathBuf {
        let mut data = Dataset::with_last_class(
            "blobs",
            vec![
                Attribute::numeric("x"),
                Attribute::numeric("y"),
                Attribute::nominal("side", &["left", "right"]),
            ],
        );
        for i in 0..6 {
            let d = offset + 0.05 * i as f64;
            data.push(Instance::dense(&[1.0 + d, 1.5 + d, 0.0]));
            data.push(Instance::dense(&[8.5 - d, 8.0 - d, 1.0]));
        }
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_string(&data).unwrap()).unwrap();
        path
    }
}
