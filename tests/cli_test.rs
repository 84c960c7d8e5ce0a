// Binary-level checks: clap surface and headless rendering
mod common;

use common::{write_cache, write_result, REPORT_CARD};
use rexpect::spawn;
use std::fs;
use std::path::Path;
use std::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_hocba-viewer");
const TIMEOUT_MS: u64 = 10000;

fn write_config(dir: &Path) -> std::path::PathBuf {
    let result = write_result(dir, "hocba_1_result_full.json", REPORT_CARD);
    let empty = write_result(dir, "hocba_2_result_full.json", r#"{"pages": []}"#);
    write_cache(&dir.join("hocba1_images"), 4);
    write_cache(&dir.join("hocba2_images"), 1);

    let config = dir.join("viewer.toml");
    fs::write(
        &config,
        format!(
            r#"
            title = "Document Classifier Results"
            [[documents]]
            label = "hocba1"
            pdf = "{dir}/hocba_test1.pdf"
            result = "{result}"

            [[documents]]
            label = "hocba2"
            pdf = "{dir}/hocba_test2.pdf"
            result = "{empty}"
            "#,
            dir = dir.display(),
            result = result.display(),
            empty = empty.display(),
        ),
    )
    .unwrap();
    config
}

#[test]
fn help_describes_the_viewer() {
    let mut p = spawn(&format!("{} --help", BIN), Some(TIMEOUT_MS)).unwrap();
    p.exp_string("report card").unwrap();
    p.exp_string("--prepare").unwrap();
    p.exp_eof().unwrap();
}

#[test]
fn print_renders_parsing_results() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let output = Command::new(BIN)
        .arg("--config")
        .arg(&config)
        .args(["--page", "1", "--print"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Document Classifier Results\n[hocba1] hocba2\n"));
    assert!(stdout.contains("Page 1/4"));
    assert!(stdout.contains("Parsing Results"));
    assert!(stdout.contains("Grade: 10"));
    assert!(stdout.contains("name       | Term 1 | Term 2 | Final"));
    assert!(stdout.contains("Math       |    N/A |    N/A |   9.0"));
}

#[test]
fn print_clamps_page_and_degrades_to_no_data() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let output = Command::new(BIN)
        .arg("--config")
        .arg(&config)
        .args(["--document", "2", "--page", "30", "--print"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("hocba1 [hocba2]"));
    assert!(stdout.contains("Page 1/1"));
    assert!(stdout.contains("No data available for this page."));
}

#[test]
fn prepare_reports_existing_caches() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let output = Command::new(BIN)
        .arg("--config")
        .arg(&config)
        .arg("--prepare")
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("hocba1: 4 pages"));
    assert!(stdout.contains("hocba2: 1 pages"));
}

#[test]
fn missing_results_fail_before_the_ui_starts() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("viewer.toml");
    fs::write(
        &config,
        format!(
            "[[documents]]\nlabel = \"hocba1\"\npdf = \"x.pdf\"\nresult = \"{}/absent.json\"\n",
            dir.path().display()
        ),
    )
    .unwrap();

    let output = Command::new(BIN).arg("--config").arg(&config).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load classifier results"));
}
