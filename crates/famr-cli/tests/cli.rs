//! End-to-end runs of the `famr` binary.

use assert_cmd::Command;
use famr_adapter::{Attribute, Dataset, Instance};
use predicates::prelude::*;

fn write_dataset(dir: &std::path::Path, name: &str) -> std::path::PathBuf {
    let mut data = Dataset::with_last_class(
        "line",
        vec![Attribute::numeric("x"), Attribute::nominal("band", &["low", "high"])],
    );
    for x in [0.5, 0.7, 0.9, 6.5, 6.8, 7.0] {
        data.push(Instance::dense(&[x, if x < 4.0 { 0.0 } else { 1.0 }]));
    }
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string(&data).unwrap()).unwrap();
    path
}

#[test]
fn train_then_classify() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(dir.path(), "data.json");
    let model = dir.path().join("model.json");

    Command::cargo_bin("famr")
        .unwrap()
        .args(["train", "--data"])
        .arg(&data)
        .arg("--model")
        .arg(&model)
        .assert()
        .success()
        .stdout(predicate::str::contains("Categories"));
    assert!(model.exists());

    Command::cargo_bin("famr")
        .unwrap()
        .args(["-o", "json", "classify", "--model"])
        .arg(&model)
        .arg("--data")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"predicted\": \"high\""));
}

#[test]
fn evaluate_reports_accuracy() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(dir.path(), "data.json");

    Command::cargo_bin("famr")
        .unwrap()
        .args(["evaluate", "--train"])
        .arg(&data)
        .arg("--test")
        .arg(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("100.00%"));
}

#[test]
fn invalid_hyperparameter_fails_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(dir.path(), "data.json");

    Command::cargo_bin("famr")
        .unwrap()
        .args(["train", "--rho-a", "2.0", "--data"])
        .arg(&data)
        .arg("--model")
        .arg(dir.path().join("model.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("rho_init_a"));
}

#[test]
fn partial_learning_rate_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_dataset(dir.path(), "data.json");
    let model = dir.path().join("model.json");

    Command::cargo_bin("famr")
        .unwrap()
        .args(["train", "--beta-a", "0.5", "--data"])
        .arg(&data)
        .arg("--model")
        .arg(&model)
        .assert()
        .failure()
        .stderr(predicate::str::contains("beta_a"));
    assert!(!model.exists());
}

#[test]
fn config_lists_host_options() {
    Command::cargo_bin("famr")
        .unwrap()
        .args(["config", "--list-options"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-enableLog <boolean>"));
}
