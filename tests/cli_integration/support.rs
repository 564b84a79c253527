//! Support utilities for CLI integration tests

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Captured result of one CLI invocation
pub struct CliOutput {
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CliOutput {
    fn from_output(output: Output) -> Self {
        Self {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

fn command(args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_as3decl"));
    cmd.args(args);
    // Keep the caller's environment from leaking into decoder settings
    for var in ["RUST_LOG", "AS3DECL_KEY_ORDER", "AS3DECL_REPORT_MISSING", "AS3DECL_LOG_LEVEL"] {
        cmd.env_remove(var);
    }
    cmd
}

/// Run the CLI with the given arguments
pub fn run_cli_command(args: &[&str]) -> CliOutput {
    run_cli_command_with_env(args, &[])
}

/// Run the CLI with extra environment variables
pub fn run_cli_command_with_env(args: &[&str], env: &[(&str, &str)]) -> CliOutput {
    let mut cmd = command(args);
    for (key, value) in env {
        cmd.env(key, value);
    }
    let output = cmd.output().expect("run as3decl binary");
    CliOutput::from_output(output)
}

/// Run the CLI feeding `input` on stdin
pub fn run_cli_command_with_stdin(args: &[&str], input: &str) -> CliOutput {
    let mut child = command(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn as3decl binary");

    child.stdin.take().expect("stdin handle").write_all(input.as_bytes()).expect("write stdin");
    let output = child.wait_with_output().expect("wait for as3decl");
    CliOutput::from_output(output)
}

/// Path of a fixture under `tests/fixtures` as a string argument
pub fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

/// A declaration written to a temporary file
pub struct TempDeclarationFile {
    pub path: PathBuf,
    _temp_dir: tempfile::TempDir,
}

impl TempDeclarationFile {
    pub fn new(content: &str) -> Self {
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        let path = temp_dir.path().join("declaration.json");
        std::fs::write(&path, content).expect("write declaration file");
        TempDeclarationFile { path, _temp_dir: temp_dir }
    }

    pub fn path_str(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}
