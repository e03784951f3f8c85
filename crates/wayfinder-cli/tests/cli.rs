use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DETOUR_TOML: &str = r#"
source = "A"
goal = "D"

[[edges]]
from = "A"
to = "B"
cost = 5.0

[[edges]]
from = "A"
to = "C"
cost = 1.0

[[edges]]
from = "C"
to = "B"
cost = 1.0

[[edges]]
from = "B"
to = "D"
cost = 1.0

[heuristic]
A = 2.0
B = 1.0
C = 1.0
"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn wayfinder(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("wayfinder").unwrap();
    cmd.env("WAYFINDER_CONFIG", dir.join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_find_prints_cheapest_path() {
    let dir = TempDir::new().unwrap();
    let graph = write(&dir, "detour.toml", DETOUR_TOML);

    wayfinder(dir.path())
        .arg("find")
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("Path from A to D (cost 3, 4 states):"))
        .stdout(predicate::str::contains("  A\n  C\n  B\n  D"));
}

#[test]
fn test_find_json_output() {
    let dir = TempDir::new().unwrap();
    let graph = write(&dir, "detour.toml", DETOUR_TOML);

    let output = wayfinder(dir.path())
        .args(["--format", "json", "find", "--stats"])
        .arg(&graph)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["found"], true);
    assert_eq!(report["cost"], 3.0);
    assert_eq!(report["path"], serde_json::json!(["A", "C", "B", "D"]));
    assert_eq!(report["stats"]["nodes_relaxed"], 1);
}

#[test]
fn test_find_reports_missing_path() {
    let dir = TempDir::new().unwrap();
    let graph = write(
        &dir,
        "oneway.json",
        r#"{"source": "B", "goal": "A", "edges": [{"from": "A", "to": "B", "cost": 1.0}]}"#,
    );

    wayfinder(dir.path())
        .arg("find")
        .arg(&graph)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("No path found from B to A"));

    wayfinder(dir.path())
        .args(["find", "--undirected"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("Path from B to A"));
}

#[test]
fn test_find_with_overridden_endpoints() {
    let dir = TempDir::new().unwrap();
    let graph = write(&dir, "detour.toml", DETOUR_TOML);

    wayfinder(dir.path())
        .args(["--format", "csv", "find", "--from", "C", "--to", "D"])
        .arg(&graph)
        .assert()
        .success()
        .stdout("step,state\n0,C\n1,B\n2,D\n");
}

#[test]
fn test_check_rejects_invalid_graph() {
    let dir = TempDir::new().unwrap();
    let graph = write(
        &dir,
        "bad.json",
        r#"{"source": "A", "goal": "B", "edges": [{"from": "A", "to": "B", "cost": -1.0}]}"#,
    );

    wayfinder(dir.path())
        .arg("check")
        .arg(&graph)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid cost"));
}

#[test]
fn test_check_summarizes_graph() {
    let dir = TempDir::new().unwrap();
    let graph = write(&dir, "detour.toml", DETOUR_TOML);

    wayfinder(dir.path())
        .arg("check")
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("States:    4"))
        .stdout(predicate::str::contains("Edges:     4"));
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let graph = write(&dir, "graph.yaml", "source: A");

    wayfinder(dir.path())
        .arg("check")
        .arg(&graph)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected a .json or .toml extension"));
}

#[test]
fn test_config_changes_default_format() {
    let dir = TempDir::new().unwrap();
    let graph = write(&dir, "detour.toml", DETOUR_TOML);

    wayfinder(dir.path())
        .args(["config", "set", "default_format", "csv"])
        .assert()
        .success()
        .stdout("Set default_format = csv\n");

    wayfinder(dir.path())
        .args(["config", "get", "default_format"])
        .assert()
        .success()
        .stdout("csv\n");

    wayfinder(dir.path())
        .arg("find")
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("step,state\n0,A"));

    wayfinder(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_goal_override_rejects_free_edges_without_estimates() {
    let dir = TempDir::new().unwrap();
    let graph = write(
        &dir,
        "free.json",
        r#"{
            "source": "S",
            "goal": "Y",
            "edges": [
                {"from": "S", "to": "X", "cost": 2.0},
                {"from": "X", "to": "G", "cost": 0.0},
                {"from": "S", "to": "Y", "cost": 1.0},
                {"from": "Y", "to": "G", "cost": 1.5}
            ],
            "heuristic": {"S": 1.0, "X": 1.0, "G": 1.0}
        }"#,
    );

    wayfinder(dir.path())
        .arg("find")
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("Path from S to Y"));

    wayfinder(dir.path())
        .args(["find", "--to", "G"])
        .arg(&graph)
        .assert()
        .failure()
        .stderr(predicate::str::contains("zero-cost edges"));
}
