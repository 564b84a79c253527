//! Integration tests for the decoding commands

use super::support::{
    fixture, run_cli_command, run_cli_command_with_env, run_cli_command_with_stdin,
    TempDeclarationFile,
};

const UNORDERED: &str = r#"{
    "class": "ADC",
    "T": {
        "class": "Tenant",
        "A": {
            "class": "Application",
            "b_vs": {"class": "Service_HTTP"},
            "a_vs": {"class": "Service_TCP"}
        }
    }
}"#;

#[test]
fn test_summary_command() {
    let result = run_cli_command(&["summary", &fixture("https_application.json")]);

    assert!(result.success(), "stderr: {}", result.stderr);
    assert!(result.stdout.starts_with("Declaration:\n  Label: HTTPS sample\n"));
    assert!(result.stdout.contains("  Total tenants: 1\n"));
    assert!(result.stdout.contains("    Name: Sample_01\n    Apps: 1\n"));
}

#[test]
fn test_names_command() {
    let result = run_cli_command(&["names", &fixture("https_application.json")]);

    assert!(result.success(), "stderr: {}", result.stderr);
    assert_eq!(result.stdout, "serviceMain\n");
}

#[test]
fn test_names_respects_key_order() {
    let file = TempDeclarationFile::new(UNORDERED);

    let sorted = run_cli_command(&["names", &file.path_str()]);
    assert_eq!(sorted.stdout, "a_vs\nb_vs\n");

    let document = run_cli_command(&["--key-order", "document", "names", &file.path_str()]);
    assert_eq!(document.stdout, "b_vs\na_vs\n");

    let from_env = run_cli_command_with_env(
        &["names", &file.path_str()],
        &[("AS3DECL_KEY_ORDER", "document")],
    );
    assert_eq!(from_env.stdout, "b_vs\na_vs\n");
}

#[test]
fn test_dump_json() {
    let result = run_cli_command(&["dump", &fixture("https_application.json")]);
    assert!(result.success(), "stderr: {}", result.stderr);

    let value: serde_json::Value = serde_json::from_str(&result.stdout).expect("dump emits JSON");
    assert_eq!(value["label"], "HTTPS sample");
    assert_eq!(value["tenants"][0]["name"], "Sample_01");
    assert_eq!(value["tenants"][0]["applications"][0]["pools"][0]["members"][1]["servicePort"], 80);
}

#[test]
fn test_dump_yaml() {
    let result =
        run_cli_command(&["dump", &fixture("declaration_scalars.json"), "--output", "yaml"]);

    assert!(result.success(), "stderr: {}", result.stderr);
    assert!(result.stdout.contains("label: AS3 direct deploy"));
    assert!(result.stdout.contains("archiveTimestamp: some timestamp"));
    assert!(result.stdout.contains("tenants: []"));
}

#[test]
fn test_dump_envelope_from_stdin() {
    let input = std::fs::read_to_string(fixture("envelope.json")).expect("read fixture");
    let result = run_cli_command_with_stdin(&["names", "-"], &input);

    assert!(result.success(), "stderr: {}", result.stderr);
    assert_eq!(result.stdout, "resolver\n");
}

#[test]
fn test_check_json_lists_skipped_entries() {
    let result = run_cli_command(&[
        "--no-report-missing",
        "check",
        &fixture("mixed_classes.json"),
        "--output",
        "json",
    ]);
    assert!(result.success(), "check without --strict never fails: {}", result.stderr);

    let diagnostics: Vec<serde_json::Value> =
        serde_json::from_str(&result.stdout).expect("check emits a JSON array");
    let unrecognized = diagnostics.iter().filter(|d| d["kind"] == "unrecognized_entry").count();
    assert_eq!(unrecognized, 5);

    let mismatches: Vec<&serde_json::Value> =
        diagnostics.iter().filter(|d| d["kind"] == "unprojected_field").collect();
    assert_eq!(mismatches.len(), 2);
    assert!(mismatches.iter().all(|d| d["reason"]["type"] == "type_mismatch"));
}

#[test]
fn test_check_table() {
    let clean = run_cli_command(&["check", &fixture("declaration_scalars.json")]);
    assert!(clean.success());
    assert_eq!(clean.stdout.trim(), "No diagnostics");

    let mixed = run_cli_command(&["check", &fixture("mixed_classes.json")]);
    assert!(mixed.success());
    assert!(mixed.stdout.contains("Path"));
    assert!(mixed.stdout.contains("/Common/Shared/mystery"));
    assert!(mixed.stdout.contains("unrecognized entry"));
    assert!(mixed.stdout.contains("type mismatch"));
}

#[test]
fn test_check_strict_exit_codes() {
    let clean = run_cli_command(&["check", "--strict", &fixture("https_application.json")]);
    assert_eq!(clean.status, Some(1), "unrecognized certificate entries are mismatches");

    let scalars = run_cli_command(&["check", "--strict", &fixture("declaration_scalars.json")]);
    assert_eq!(scalars.status, Some(0));

    // Missing fields alone never fail a strict check
    let tenantless = TempDeclarationFile::new(r#"{"class": "ADC"}"#);
    let missing_only = run_cli_command(&["check", "--strict", &tenantless.path_str()]);
    assert_eq!(missing_only.status, Some(0));
    assert!(missing_only.stdout.contains("missing field"));
}
