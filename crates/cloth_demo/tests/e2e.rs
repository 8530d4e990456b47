//! End-to-end tests for the cloth_demo CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

/// Get a Command for the cloth_demo binary.
#[allow(deprecated)]
fn demo_cmd() -> Command {
    Command::cargo_bin("cloth_demo").unwrap()
}

mod basic_usage {
    use super::*;

    #[test]
    fn test_report_printed() {
        demo_cmd()
            .args(["--seed", "1", "--points-x", "8", "--points-y", "8", "--frames", "200"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"points\": 64"))
            .stdout(predicate::str::contains("\"seed\": 1"));
    }

    #[test]
    fn test_help() {
        demo_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--brush-size"));
    }

    #[test]
    fn test_same_seed_same_report() {
        let args = ["--seed", "5", "--points-x", "6", "--points-y", "6", "--frames", "300"];
        let a = demo_cmd().args(args).output().unwrap();
        let b = demo_cmd().args(args).output().unwrap();
        assert!(a.status.success());
        assert_eq!(a.stdout, b.stdout);
    }
}

mod config_file {
    use super::*;

    #[test]
    fn test_config_file_used() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[cloth]\npoints_x = 5\npoints_y = 4\nseed = 3\n\n[run]\nframes = 60\n")
            .unwrap();

        demo_cmd()
            .arg("--config")
            .arg(file.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("\"points\": 20"))
            .stdout(predicate::str::contains("\"frames\": 60"));
    }

    #[test]
    fn test_missing_config_fails() {
        demo_cmd()
            .args(["--config", "/no/such/cloth.toml"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }

    #[test]
    fn test_invalid_grid_fails() {
        demo_cmd()
            .args(["--points-x", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid point count"));
    }
}

mod dump {
    use super::*;

    #[test]
    fn test_dump_writes_vertex_buffer() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vertices.json");

        demo_cmd()
            .args(["--seed", "2", "--points-x", "3", "--points-y", "3", "--strokes", "0"])
            .args(["--frames", "200", "--width", "20", "--height", "20"])
            .arg("--dump")
            .arg(&path)
            .assert()
            .success();

        let json = std::fs::read_to_string(&path).unwrap();
        let vertices: Vec<f32> = serde_json::from_str(&json).unwrap();
        // Reveal finished and no strokes: every point is back at rest
        assert_eq!(
            vertices,
            vec![0.0, 0.0, 10.0, 0.0, 20.0, 0.0, 0.0, 10.0, 10.0, 10.0, 20.0, 10.0, 0.0, 20.0, 10.0, 20.0, 20.0, 20.0]
        );
    }
}
