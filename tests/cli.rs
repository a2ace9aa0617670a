mod common;

use std::io::Write;
use std::process::{Command, Output};

use common::{FaBuilder, signed_words, words};
use tempfile::NamedTempFile;

fn write_image(bytes: &[u8]) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("temp file");
    tmp.write_all(bytes).expect("write image");
    tmp.flush().expect("flush");
    tmp
}

fn fatool(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fatool"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("FATOOL_FIELD")
        .output()
        .expect("run fatool")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn size_check_passes_on_a_consistent_file() {
    let image = FaBuilder::new(64, 32).fillers(5).build();
    let tmp = write_image(&image.bytes);
    let output = fatool(&[tmp.path().to_str().unwrap(), "-s"]);

    assert!(output.status.success(), "status: {:?}", output.status);
    assert_eq!(stdout(&output).trim(), format!("OK : size {}", image.bytes.len()));
}

#[test]
fn size_mismatch_exits_non_zero() {
    let image = FaBuilder::new(64, 32).fillers(5).build();
    let mut bytes = image.bytes.clone();
    bytes.extend_from_slice(&[0u8; 64 * 8]);
    let tmp = write_image(&bytes);
    let output = fatool(&[tmp.path().to_str().unwrap(), "-s"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stdout(&output).starts_with(&format!("ERROR : expected {}", image.bytes.len())),
        "stdout: {}",
        stdout(&output)
    );
}

#[test]
fn listing_numbers_rows_of_three() {
    let image = FaBuilder::new(64, 32).fillers(5).build();
    let tmp = write_image(&image.bytes);
    let output = fatool(&[tmp.path().to_str().unwrap(), "-l"]);

    assert!(output.status.success());
    let text = stdout(&output);
    let rows: Vec<Vec<&str>> = text.lines().map(|l| l.split_whitespace().collect()).collect();
    assert_eq!(
        rows,
        vec![
            vec!["1", ":", "F0000", "F0001", "F0002"],
            vec!["4", ":", "F0003", "F0004"],
        ]
    );
}

#[test]
fn listing_can_be_filtered() {
    let image = FaBuilder::new(64, 32)
        .field("SURFTEMPERATURE", words(&[1]))
        .field("S001HUMI.SPECIFI", words(&[2, 0]))
        .field("S002HUMI.SPECIFI", words(&[3, 0]))
        .build();
    let tmp = write_image(&image.bytes);
    let output = fatool(&[tmp.path().to_str().unwrap(), "-l", "-m", "HUMI"]);

    assert!(output.status.success());
    let text = stdout(&output);
    let tokens: Vec<&str> = text.split_whitespace().collect();
    assert_eq!(tokens, vec!["1", ":", "S001HUMI.SPECIFI", "S002HUMI.SPECIFI"]);
}

#[test]
fn missing_file_exits_non_zero() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.fa");
    let output = fatool(&[path.to_str().unwrap(), "-H"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn no_file_prints_usage_and_succeeds() {
    let output = fatool(&[]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn foreign_file_is_a_fatal_error() {
    let tmp = write_image(&[0u8; 512]);
    let output = fatool(&[tmp.path().to_str().unwrap(), "-l"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not a regular FA file"));
}

#[test]
fn corrupt_index_is_a_fatal_error() {
    let image = FaBuilder::new(64, 32)
        .fillers(3)
        .header_word(0, 1 << 41)
        .header_word(5, 1 << 40)
        .header_word(12, 1 << 40)
        .build();
    let tmp = write_image(&image.bytes);
    let output = fatool(&[tmp.path().to_str().unwrap(), "-l"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn missing_probe_field_is_reported_but_not_fatal() {
    let image = FaBuilder::new(64, 32).fillers(2).build();
    let tmp = write_image(&image.bytes);
    let output = fatool(&[tmp.path().to_str().unwrap(), "-q"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "Field S001HUMI.SPECIFI not found.");
}

#[test]
fn frame_fix_reports_old_and_new_values() {
    let image = FaBuilder::new(64, 32)
        .field("CADRE-REDPOINPOL", signed_words(&[11, 0, 60, 1, 58, 1, 8, 8]))
        .build();
    let tmp = write_image(&image.bytes);
    let output = fatool(&[tmp.path().to_str().unwrap(), "-F"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).lines().collect::<Vec<_>>(), vec!["old_value: 11", "new_value: 10"]);
    let patched = std::fs::read(tmp.path()).expect("read back");
    let (offset, _) = image.locations[0];
    assert_eq!(&patched[offset as usize..offset as usize + 8], &10u64.to_be_bytes());
}

#[test]
fn version_banner() {
    let output = fatool(&["-v"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        format!("fatool version: {}", env!("CARGO_PKG_VERSION"))
    );
}
