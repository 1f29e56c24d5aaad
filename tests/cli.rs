use std::process::{Command, Output};

fn mathex(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mathex")).args(args)
                                              .output()
                                              .expect("failed to run mathex")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn computes_with_named_parameters() {
    let output = mathex(&["x * 2 + y", "-p", "x=20", "--parameter", "y=2"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "42");

    let output = mathex(&["strlen(name)", "-p", "name=hello"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "5");
}

#[test]
fn applies_comparison_tolerances() {
    let output = mathex(&["x = 100", "-p", "x=109.0", "--percentage", "0.1"]);
    assert_eq!(stdout(&output), "true");

    let output = mathex(&["x = 100", "-p", "x=109.0"]);
    assert_eq!(stdout(&output), "false");

    let output = mathex(&["x = 2", "-p", "x=2.5", "--tolerance-lower", "1", "--tolerance-upper", "1"]);
    assert_eq!(stdout(&output), "true");
}

#[test]
fn shows_the_simplified_expression() {
    let output = mathex(&["--show", "x-(y-(2*3))"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "x - (y - 6)");
}

#[test]
fn fails_on_unrecognized_expressions() {
    let output = mathex(&["(1 + 2"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not recognized"));
}

#[test]
fn fails_on_missing_parameters() {
    let output = mathex(&["x + y", "-p", "x=1"]);
    assert!(!output.status.success());
}

#[test]
fn loads_a_definition_file() {
    let dir = std::env::temp_dir().join("mathex_cli");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("definition.json");
    std::fs::write(&path, r#"{ "powerSymbol": "**", "parameterSeparator": ";" }"#).unwrap();

    let path = path.to_string_lossy().to_string();
    let output = mathex(&["max(2 ** 3; 5)", "--definition", &path]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "8");
}
