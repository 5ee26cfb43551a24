//! End-to-end tests of the read → operate → write pipeline

use std::fs;
use std::path::{Path, PathBuf};

use sparse_calc::{run, MatrixError, Operation, RunConfig};

/// Creates a fresh scratch directory for one test
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sparse_calc_e2e_{}_{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_operands(dir: &Path) -> (PathBuf, PathBuf) {
    let a = dir.join("a.txt");
    let b = dir.join("b.txt");
    fs::write(&a, "rows=2\ncols=2\n(0, 0, 5)\n(1, 1, 3)\n").unwrap();
    fs::write(&b, "rows=2\ncols=2\n(0, 0, 2)\n(0, 1, 4)\n").unwrap();
    (a, b)
}

#[test]
fn test_run_all_operations() {
    let dir = scratch_dir("all");
    let (a, b) = write_operands(&dir);

    let expected = [
        (Operation::Add, "rows=2\ncols=2\n(0, 0, 7)\n(0, 1, 4)\n(1, 1, 3)\n"),
        (Operation::Subtract, "rows=2\ncols=2\n(0, 0, 3)\n(0, 1, -4)\n(1, 1, 3)\n"),
        (Operation::Multiply, "rows=2\ncols=2\n(0, 0, 10)\n(0, 1, 20)\n"),
    ];

    for (op, text) in expected {
        let config = RunConfig::new(op, &a, &b).with_output_dir(&dir);
        let output = run(&config).unwrap();

        assert_eq!(output, dir.join(format!("matrix_{}_result.txt", op)));
        assert_eq!(fs::read_to_string(&output).unwrap(), text);
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_run_dimension_mismatch_writes_nothing() {
    let dir = scratch_dir("mismatch");
    let a = dir.join("a.txt");
    let b = dir.join("b.txt");
    fs::write(&a, "rows=2\ncols=3\n(0, 0, 1)\n").unwrap();
    fs::write(&b, "rows=4\ncols=5\n(0, 0, 1)\n").unwrap();

    let config = RunConfig::new(Operation::Multiply, &a, &b).with_output_dir(&dir);
    let err = run(&config).unwrap_err();

    assert!(matches!(err, MatrixError::DimensionMismatch { .. }));
    assert!(!config.output_path().exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_run_missing_input() {
    let dir = scratch_dir("missing");
    let (a, _) = write_operands(&dir);
    let missing = dir.join("nope.txt");

    let config = RunConfig::new(Operation::Add, &a, &missing).with_output_dir(&dir);
    let err = run(&config).unwrap_err();

    assert!(matches!(err, MatrixError::Io { ref path, .. } if *path == missing));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_run_malformed_input() {
    let dir = scratch_dir("malformed");
    let (a, b) = write_operands(&dir);
    fs::write(&b, "rows=2\ncols=2\n(1,2)\n").unwrap();

    let config = RunConfig::new(Operation::Subtract, &a, &b).with_output_dir(&dir);
    assert!(matches!(run(&config), Err(MatrixError::Format { line: 3, .. })));

    fs::remove_dir_all(&dir).unwrap();
}
