//! Integration tests for CLI commands.

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn run_cli(args: &[&str]) -> (bool, String, String) {
    run_cli_with_stdin(args, None)
}

fn run_cli_with_stdin(args: &[&str], stdin: Option<&str>) -> (bool, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_unf"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI");

    {
        let mut pipe = child.stdin.take().unwrap();
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).unwrap();
        }
    }

    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    (output.status.success(), stdout, stderr)
}

const A4: &str = "UNF:4:f3SmXdyuukxMqg24RNxRfeJ9QbM2sbI1lMVSkD7zzXU=";
const B4: &str = "UNF:4:2p2zhVjHfMlOvEfmzyEjbfLeZTL5Fe3L9uICjYtt15s=";

#[test]
fn test_vector_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ints.txt");
    fs::write(&path, "1\n2\n.\n").unwrap();

    let (success, stdout, stderr) =
        run_cli(&["vector", path.to_str().unwrap(), "-t", "integer", "-a", "4"]);
    assert!(success, "stderr: {}", stderr);
    assert_eq!(stdout.trim(), A4);
    assert!(stderr.is_empty());
}

#[test]
fn test_vector_from_stdin_defaults_to_character() {
    let (success, stdout, _) = run_cli_with_stdin(&["vector", "-a", "4"], Some("hello\nworld\n"));
    assert!(success);
    assert_eq!(
        stdout.trim(),
        "UNF:4:OrGOYyNJI+y9cPV0mkTznd+EmYJp/9Lyx7IzHZvaQcg="
    );
}

#[test]
fn test_digits_apply_to_the_vector_type() {
    let (success, stdout, _) =
        run_cli_with_stdin(&["vector", "-t", "c", "-d", "3"], Some("abcdefgh\n"));
    assert!(success);
    assert_eq!(
        stdout.trim(),
        "UNF:4.1:7,3:a7zlHUR2/C1hC4zgPeuDEJdeJn3QJMi4fE3Pot+tiMw="
    );

    let (success, stdout, stderr) =
        run_cli_with_stdin(&["vector", "-t", "unf", "-d", "3"], Some(&format!("{}\n", A4)));
    assert!(success);
    assert_eq!(stdout.trim(), A4);
    assert!(stderr.contains("digits does not apply here"));
}

#[test]
fn test_illegal_parameters_warn_and_fall_back() {
    let (success, stdout, stderr) =
        run_cli_with_stdin(&["vector", "-t", "i", "-a", "9", "-d", "40"], Some("1\n2\n.\n"));
    assert!(success);
    assert_eq!(
        stdout.trim(),
        "UNF:4.1:3sOx0oiDD7c0eff/yV8VRi9hv6YWShjYW684wT+OrRU="
    );
    assert!(stderr.contains("invalid version 9"));
    assert!(stderr.contains("invalid ndigits 40"));
}

#[test]
fn test_quiet_suppresses_warnings() {
    let (success, _, stderr) =
        run_cli_with_stdin(&["--quiet", "vector", "-t", "real"], Some("1.5x\n"));
    assert!(success);
    assert!(stderr.is_empty());
}

#[test]
fn test_vector_components() {
    let input = format!("{}\n{}\nbogus\n", A4, B4);
    let (success, stdout, stderr) =
        run_cli_with_stdin(&["vector", "-t", "unf", "--components"], Some(&input));
    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec![A4, B4, "UNF:4:7hti5QgJSOB+7rD869V0sFvwkzvxS/Xm/KABIUzCxvs="]);
    assert!(stderr.contains("not a UNF"));
}

#[test]
fn test_vector_json() {
    let (success, stdout, _) =
        run_cli_with_stdin(&["vector", "-t", "integer", "-a", "4", "--json"], Some("1\n2\n\n"));
    assert!(success);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["descriptor"]["digest"], "f3SmXdyuukxMqg24RNxRfeJ9QbM2sbI1lMVSkD7zzXU=");
    assert_eq!(json["report"]["warnings"].as_array().unwrap().len(), 0);
}

#[test]
fn test_compose_is_order_independent() {
    let (success, forward, _) = run_cli(&["compose", A4, B4]);
    assert!(success);
    let (success, reverse, _) = run_cli(&["compose", B4, A4]);
    assert!(success);
    assert_eq!(forward, reverse);
    assert_eq!(
        forward.trim(),
        "UNF:4:7hti5QgJSOB+7rD869V0sFvwkzvxS/Xm/KABIUzCxvs="
    );
}

#[test]
fn test_dataset() {
    let temp_dir = TempDir::new().unwrap();
    let ints = temp_dir.path().join("n.txt");
    let strs = temp_dir.path().join("s.txt");
    fs::write(&ints, "1\n2\n\n").unwrap();
    fs::write(&strs, "x\ny\n").unwrap();

    let ints_arg = format!("integer:{}", ints.display());
    let strs_arg = format!("character:{}", strs.display());
    let (success, stdout, stderr) = run_cli(&["dataset", &ints_arg, &strs_arg, "--json"]);
    assert!(success, "stderr: {}", stderr);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["columns"].as_array().unwrap().len(), 2);
    assert_eq!(
        json["composite"]["digest"],
        "oWNCcJvYAgI8E7D/oCML8EeyKo2LlA45/J0V1AcpgWg="
    );
}

#[test]
fn test_dataset_rejects_bad_column() {
    let (success, _, stderr) = run_cli(&["dataset", "nocolon"]);
    assert!(!success);
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_inspect() {
    let (success, stdout, _) = run_cli(&["inspect", "UNF:3:9,64:CXGqWTtn2HqgyW8l/jk7bw=="]);
    assert!(success);
    assert!(stdout.contains("version:  3 (UTF-32BE)"));
    assert!(stdout.contains("ndigits:  9"));
    assert!(stdout.contains("cdigits:  64"));
    assert!(stdout.contains("(16 bytes)"));

    let (success, stdout, _) = run_cli(&["inspect", A4, "--json"]);
    assert!(success);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["digest_bytes"], 32);
    assert_eq!(json["encoding"], "UTF-32BE");
}

#[test]
fn test_inspect_rejects_non_unf() {
    let (success, _, stderr) = run_cli(&["inspect", "UNF:4:short"]);
    assert!(!success);
    assert!(stderr.contains("not a UNF"));
}
