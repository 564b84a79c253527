//! Integration tests for CLI error handling
//!
//! Tests:
//! - Missing and unreadable input files
//! - Invalid JSON input
//! - Invalid command arguments and environment
//! - Non-object documents

use super::support::{
    fixture, run_cli_command, run_cli_command_with_env, run_cli_command_with_stdin,
    TempDeclarationFile,
};

#[test]
fn test_missing_file() {
    let result = run_cli_command(&["summary", "/nonexistent/declaration.json"]);

    assert_eq!(result.status, Some(1));
    assert!(
        result.stderr.contains("Failed to load declaration from /nonexistent/declaration.json"),
        "stderr: {}",
        result.stderr
    );
    assert!(result.stdout.is_empty());
}

#[test]
fn test_invalid_json() {
    let file = TempDeclarationFile::new("{ \"class\": \"ADC\", ");
    let result = run_cli_command(&["names", &file.path_str()]);

    assert_eq!(result.status, Some(1));
    assert!(result.stderr.contains("Invalid JSON document"), "stderr: {}", result.stderr);
}

#[test]
fn test_invalid_json_on_stdin() {
    let result = run_cli_command_with_stdin(&["dump", "-"], "not json");

    assert_eq!(result.status, Some(1));
    assert!(result.stderr.contains("Invalid JSON document"), "stderr: {}", result.stderr);
}

#[test]
fn test_invalid_arguments() {
    let bad_output = run_cli_command(&["dump", &fixture("tenant.json"), "--output", "table"]);
    assert_eq!(bad_output.status, Some(2));

    let bad_order = run_cli_command(&["--key-order", "random", "names", &fixture("tenant.json")]);
    assert_eq!(bad_order.status, Some(2));

    let no_file = run_cli_command(&["summary"]);
    assert_eq!(no_file.status, Some(2));
}

#[test]
fn test_invalid_environment() {
    let result = run_cli_command_with_env(
        &["names", &fixture("tenant.json")],
        &[("AS3DECL_REPORT_MISSING", "sometimes")],
    );

    assert_eq!(result.status, Some(1));
    assert!(result.stderr.contains("Invalid decoder configuration"), "stderr: {}", result.stderr);
}

#[test]
fn test_non_object_document_is_reported_not_fatal() {
    let file = TempDeclarationFile::new("[1, 2, 3]");

    let summary = run_cli_command(&["summary", &file.path_str()]);
    assert!(summary.success(), "stderr: {}", summary.stderr);
    assert!(summary.stdout.contains("Total tenants: 0"));

    let check = run_cli_command(&["check", "--strict", &file.path_str()]);
    assert_eq!(check.status, Some(1));
    assert!(check.stdout.contains("malformed"));
    assert!(check.stdout.contains("expected object, found array"));
}
