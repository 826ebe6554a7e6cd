//! Exit codes and stdout contract of the `pdf2docx` binary.
//!
//! None of these cases reach pdfium, so they run without the library.

use std::path::Path;
use std::process::{Command, Output};

fn pdf2docx(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pdf2docx"))
        .args(args)
        .env_remove("PDF2DOCX_PAGES")
        .env_remove("PDF2DOCX_FOOTER_SCOPE")
        .output()
        .expect("failed to spawn pdf2docx")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn no_arguments_prints_usage() {
    let out = pdf2docx(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("Usage: pdf2docx <input.pdf> <output.docx>"));
}

#[test]
fn one_argument_prints_usage() {
    let out = pdf2docx(&["only.pdf"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("Usage:"));
}

#[test]
fn missing_input_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.docx");
    let out = pdf2docx(&[
        "--no-progress",
        "/definitely/not/here.pdf",
        output.to_str().unwrap(),
    ]);

    assert_eq!(out.status.code(), Some(1));
    let text = stdout(&out);
    assert!(text.starts_with("ERROR:"), "stdout was {text:?}");
    assert!(!text.contains("SUCCESS"));
    assert!(!output.exists());
}

#[test]
fn non_pdf_input_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.pdf");
    std::fs::write(&input, "plain text, not a PDF").unwrap();
    let output = dir.path().join("out.docx");

    let out = pdf2docx(&[
        "--no-progress",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
    ]);

    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).starts_with("ERROR:"));
    assert!(!Path::new(&output).exists());
}

#[test]
fn invalid_page_selection_reports_error() {
    let out = pdf2docx(&["--pages", "0", "in.pdf", "out.docx"]);
    assert_eq!(out.status.code(), Some(1));
    let text = stdout(&out);
    assert!(text.starts_with("ERROR:"), "stdout was {text:?}");
    assert!(text.contains("1-indexed"));
}

#[test]
fn reversed_page_range_reports_error() {
    let out = pdf2docx(&["--pages", "5-2", "in.pdf", "out.docx"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("start must be <= end"));
}

#[test]
fn help_exits_cleanly() {
    let out = pdf2docx(&["--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("--footer-scope"));
}
