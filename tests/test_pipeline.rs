use std::fs;

use text_aligner::{run, AlignerError, RunConfig};

#[test]
fn single_letter_files() {
    let dir = tempfile::tempdir().unwrap();
    let primary = dir.path().join("primary.txt");
    let reference = dir.path().join("reference.txt");
    let output = dir.path().join("out.txt");
    fs::write(&primary, "A.\n").unwrap();
    fs::write(&reference, "  a").unwrap();

    let config = RunConfig::new(&primary, &reference)
        .with_output(&output)
        .unwrap();
    let report = run(&config).unwrap();

    assert_eq!(report.primary_len, 1);
    assert_eq!(report.reference_len, 1);
    assert!(report.best.is_none());
    assert_eq!(fs::read_to_string(&output).unwrap(), "0,0,\n0,1,\n");
}

#[test]
fn output_lines_follow_the_primary_file() {
    let dir = tempfile::tempdir().unwrap();
    let primary = dir.path().join("primary.txt");
    let reference = dir.path().join("reference.txt");
    let output = dir.path().join("out.txt");
    fs::write(&primary, "Cats!").unwrap();
    fs::write(&reference, "c-a-t").unwrap();

    let config = RunConfig::new(&primary, &reference)
        .with_output(&output)
        .unwrap()
        .with_report_best(true);
    let report = run(&config).unwrap();

    let table = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(
        lines,
        vec!["0,0,0,0,", "0,1,0,0,", "0,0,2,0,", "0,0,0,3,", "0,0,0,1,"]
    );

    let best = report.best.unwrap();
    assert_eq!(best.score, 3);
    assert_eq!((best.position.i, best.position.j), (3, 3));
}

#[test]
fn output_is_truncated_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let primary = dir.path().join("primary.txt");
    let reference = dir.path().join("reference.txt");
    let output = dir.path().join("out.txt");
    fs::write(&primary, "x").unwrap();
    fs::write(&reference, "x").unwrap();
    fs::write(&output, "stale contents that are longer than the table\n").unwrap();

    let config = RunConfig::new(&primary, &reference)
        .with_output(&output)
        .unwrap();
    run(&config).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "0,0,\n0,1,\n");
}

#[test]
fn empty_inputs_still_export() {
    let dir = tempfile::tempdir().unwrap();
    let primary = dir.path().join("primary.txt");
    let reference = dir.path().join("reference.txt");
    let output = dir.path().join("out.txt");
    fs::write(&primary, "ab").unwrap();
    fs::write(&reference, "123 !").unwrap();

    let config = RunConfig::new(&primary, &reference)
        .with_output(&output)
        .unwrap();
    let report = run(&config).unwrap();

    assert_eq!(report.reference_len, 0);
    assert_eq!(fs::read_to_string(&output).unwrap(), "0,\n0,\n0,\n");
}

#[test]
fn missing_input_is_reported_and_nothing_written() {
    let dir = tempfile::tempdir().unwrap();
    let primary = dir.path().join("primary.txt");
    let reference = dir.path().join("does-not-exist.txt");
    let output = dir.path().join("out.txt");
    fs::write(&primary, "abc").unwrap();

    let config = RunConfig::new(&primary, &reference)
        .with_output(&output)
        .unwrap();

    match run(&config) {
        Err(AlignerError::Io { path, .. }) => assert_eq!(path, reference),
        other => panic!("expected Io error, got {other:?}"),
    }
    assert!(!output.exists());
}
