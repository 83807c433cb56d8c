use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

const STATIONS: &str = "A, 0, 0\nB, 0, 1\nC, 1, 0\n";

fn cli() -> Command {
    Command::cargo_bin("station-mst").expect("binary built")
}

#[test]
fn build_writes_tree_and_map() {
    let dir = tempfile::tempdir().unwrap();
    let points = dir.path().join("estacoes.txt");
    let tree = dir.path().join("arvore.txt");
    let map = dir.path().join("mapa.geojson");
    std::fs::write(&points, STATIONS).unwrap();

    cli()
        .arg("build")
        .arg(&points)
        .arg("--output")
        .arg(&tree)
        .arg("--map")
        .arg(&map)
        .assert()
        .success()
        .stdout(predicate::str::contains("Spanning tree with 2 edges"));

    let written = std::fs::read_to_string(&tree).unwrap();
    let lines: Vec<_> = written.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|line| line.starts_with("A,")));

    let geojson: Value = serde_json::from_str(&std::fs::read_to_string(&map).unwrap()).unwrap();
    assert_eq!(geojson["features"].as_array().unwrap().len(), 5);
}

#[test]
fn render_reads_an_existing_tree() {
    let dir = tempfile::tempdir().unwrap();
    let points = dir.path().join("estacoes.txt");
    let tree = dir.path().join("arvore.txt");
    let map = dir.path().join("mapa.geojson");
    std::fs::write(&points, STATIONS).unwrap();
    std::fs::write(&tree, "A, B, 111.19\n").unwrap();

    cli()
        .arg("render")
        .arg(&points)
        .arg(&tree)
        .arg("--map")
        .arg(&map)
        .assert()
        .success();

    let geojson: Value = serde_json::from_str(&std::fs::read_to_string(&map).unwrap()).unwrap();
    let features = geojson["features"].as_array().unwrap();
    assert_eq!(features.len(), 4);
    assert_eq!(features[3]["properties"]["weight_km"], 111.19);
}

#[test]
fn invalid_latitude_fails() {
    let dir = tempfile::tempdir().unwrap();
    let points = dir.path().join("estacoes.txt");
    std::fs::write(&points, "A, 200, 0\nB, 0, 0\n").unwrap();

    cli()
        .arg("build")
        .arg(&points)
        .arg("--output")
        .arg(dir.path().join("arvore.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid coordinate for A"));
}
