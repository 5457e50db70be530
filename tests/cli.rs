/// End-to-end runs of the `sam2psl` binary.
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

// ── helpers ──────────────────────────────────────────────────────────────────

const SAM: &str = "@HD\tVN:1.6\tSO:coordinate\n\
                   @SQ\tSN:chr1\tLN:1000\n\
                   read1\t0\tchr1\t5\t60\t10M\t*\t0\t0\t*\t*\n\
                   read2\t4\t*\t0\t0\t*\t*\t0\t0\tACGT\tIIII\n\
                   read3\t16\tchr1\t101\t60\t5M2I3M1D4M\t*\t0\t0\t*\t*\tNM:i:4\tts:A:-\n";

fn sam2psl_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sam2psl"))
}

fn write_sam(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp SAM");
    file.write_all(contents.as_bytes()).expect("write temp SAM");
    file
}

fn run(args: &[&str]) -> Output {
    Command::new(sam2psl_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn sam2psl")
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[test]
fn converts_to_stdout() {
    let sam = write_sam(SAM);
    let out = run(&["-i", sam.path().to_str().unwrap()]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "10\t0\t0\t0\t0\t0\t0\t0\t+\tread1\t10\t0\t10\tchr1\t1000\t4\t14\t1\t10,\t0,\t4,",
            "12\t0\t0\t0\t1\t2\t1\t1\t-\tread3\t14\t0\t14\tchr1\t1000\t100\t113\t3\t5,3,4,\t0,7,10,\t100,105,109,",
        ]
    );

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("conversion complete"), "stderr: {stderr}");
}

#[test]
fn minimap2_flag_applies_tags() {
    let sam = write_sam(SAM);
    let out = run(&["-i", sam.path().to_str().unwrap(), "-m", "-q"]);
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    let read3 = stdout.lines().nth(1).expect("read3 record");
    // NM 4 - indel bases 3 = 1 mismatch; ts:A:- flips the reverse flag to '+'
    assert!(read3.starts_with("11\t1\t0\t0\t1\t2\t1\t1\t+\tread3\t"), "{read3}");
    assert!(out.stderr.is_empty(), "quiet run should not log");
}

#[test]
fn writes_to_output_file() {
    let sam = write_sam(SAM);
    let dir = tempfile::tempdir().expect("temp dir");
    let psl = dir.path().join("out.psl");

    let out = run(&["-i", sam.path().to_str().unwrap(), "-o", psl.to_str().unwrap(), "-q"]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());

    let written = std::fs::read_to_string(&psl).expect("read output");
    assert_eq!(written.lines().count(), 2);
}

#[test]
fn missing_input_flag_is_a_usage_error() {
    let out = run(&[]);
    assert!(!out.status.success());
}

#[test]
fn empty_input_path_is_a_usage_error() {
    let out = run(&["-i", ""]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("please specify an input file"), "stderr: {stderr}");
}

#[test]
fn missing_file_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("nope.sam");
    let out = run(&["-i", missing.to_str().unwrap()]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("failed to open"), "stderr: {stderr}");
}

#[test]
fn malformed_cigar_fails_the_run() {
    let sam = write_sam(
        "@SQ\tSN:chr1\tLN:1000\n\
         read1\t0\tchr1\t5\t60\t10M\t*\t0\t0\t*\t*\n\
         read2\t0\tchr1\t5\t60\t10MI\t*\t0\t0\t*\t*\n",
    );
    let out = run(&["-i", sam.path().to_str().unwrap(), "-q"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("line 3"), "stderr: {stderr}");
    assert!(stderr.contains("no length prefix"), "stderr: {stderr}");
}
