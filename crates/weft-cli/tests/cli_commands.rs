// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
use assert_cmd::Command;
use predicates::prelude::*;

fn weft(config_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("weft").unwrap();
    cmd.arg("--config-dir").arg(config_dir);
    cmd
}

#[test]
fn list_json_filters_by_family() {
    let dir = tempfile::tempdir().unwrap();
    let output = weft(dir.path())
        .args(["list", "--family", "OnTheFly", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let types: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let types = types.as_array().unwrap();
    assert_eq!(types.len(), 16);
    assert!(types.iter().all(|t| t["family"] == "OnTheFly"));
}

#[test]
fn describe_unknown_type_fails() {
    let dir = tempfile::tempdir().unwrap();
    weft(dir.path())
        .args(["describe", "FullVectorEncoderBinary3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown type FullVectorEncoderBinary3"));
}

#[test]
fn roundtrip_saves_defaults_for_the_next_run() {
    let dir = tempfile::tempdir().unwrap();
    weft(dir.path())
        .args([
            "roundtrip",
            "--family",
            "OnTheFly",
            "--field",
            "Binary4",
            "--symbols",
            "5",
            "--symbol-size",
            "12",
            "--save-defaults",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("60 bytes verified"));
    assert!(dir.path().join("cli-prefs.json").exists());

    let output = weft(dir.path())
        .args(["roundtrip", "--family", "NoCode", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["block_size"], 60);
    assert_eq!(report["sent"], 5);
}
