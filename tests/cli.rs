use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;

#[test]
fn parse_expression_prints_parenthesized_tree() {
    let mut cmd = cargo_bin_cmd!("pratt");
    cmd.args(["parse", "--expr", "1 + 2 * 3"]);
    cmd.assert().success().stdout("(1 + (2 * 3))\n");
}

#[test]
fn parse_file_with_treeviz_format() {
    let mut file = tempfile::Builder::new()
        .suffix(".expr")
        .tempfile()
        .expect("temp file");
    write!(file, "-1 + f(2)").expect("write source");

    let mut cmd = cargo_bin_cmd!("pratt");
    cmd.arg("parse").arg(file.path()).args(["--format", "treeviz"]);
    cmd.assert().success().stdout(
        predicate::str::contains("└─ ")
            .and(predicate::str::contains("+"))
            .and(predicate::str::contains("f")),
    );
}

#[test]
fn parse_json_format_serializes_snapshot() {
    let mut cmd = cargo_bin_cmd!("pratt");
    cmd.args(["parse", "-e", "f(x)", "-f", "json"]);
    cmd.assert().success().stdout(
        predicate::str::contains("\"node_type\": \"Call\"")
            .and(predicate::str::contains("\"node_type\": \"Name\"")),
    );
}

#[test]
fn parse_errors_exit_non_zero_with_messages() {
    let mut cmd = cargo_bin_cmd!("pratt");
    cmd.args(["parse", "--expr", "1 +"]);
    cmd.assert()
        .failure()
        .code(1)
        .stdout("(1 + <invalid>)\n")
        .stderr(predicate::str::contains(
            "error[unexpected-token]: unexpected end of input, expected an expression",
        ));
}

#[test]
fn unknown_format_is_rejected() {
    let mut cmd = cargo_bin_cmd!("pratt");
    cmd.args(["parse", "--expr", "1", "--format", "xml"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown format 'xml'"));
}

#[test]
fn missing_file_is_reported() {
    let mut cmd = cargo_bin_cmd!("pratt");
    cmd.args(["parse", "does/not/exist.expr"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error: reading does/not/exist.expr"));
}

#[test]
fn tokens_lists_kinds_and_ranges() {
    let mut cmd = cargo_bin_cmd!("pratt");
    cmd.args(["tokens", "--expr", "a >>= 2"]);
    cmd.assert().success().stdout(
        predicate::str::contains("#name")
            .and(predicate::str::contains("\">>\""))
            .and(predicate::str::contains("\"=\""))
            .and(predicate::str::contains("#number"))
            .and(predicate::str::contains("#eof")),
    );
}

#[test]
fn list_formats_names_every_format() {
    let mut cmd = cargo_bin_cmd!("pratt");
    cmd.arg("list-formats");
    cmd.assert().success().stdout(
        predicate::str::contains("print")
            .and(predicate::str::contains("treeviz"))
            .and(predicate::str::contains("json"))
            .and(predicate::str::contains("yaml")),
    );
}

#[test]
fn config_file_switches_to_statement_documents() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp config");
    writeln!(
        file,
        "[parsing]\nstatement_separator = \";\"\npresets = [\"literals\", \"arithmetic\", \"assignment\"]"
    )
    .expect("write config");

    let mut cmd = cargo_bin_cmd!("pratt");
    cmd.args(["parse", "--expr", "a = 1; b = a * 2"])
        .arg("--config")
        .arg(file.path());
    cmd.assert()
        .success()
        .stdout("{ (a = 1); (b = (a * 2)) }\n");
}

#[test]
fn config_without_grouping_rejects_parentheses() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp config");
    writeln!(file, "[parsing]\npresets = [\"literals\", \"arithmetic\"]").expect("write config");

    let mut cmd = cargo_bin_cmd!("pratt");
    cmd.args(["parse", "--expr", "(1)", "--config"]).arg(file.path());
    cmd.assert().failure().code(1);
}

#[test]
fn invalid_config_is_reported() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp config");
    writeln!(file, "[parsing]\npresets = [\"teleport\"]").expect("write config");

    let mut cmd = cargo_bin_cmd!("pratt");
    cmd.args(["parse", "--expr", "1", "--config"]).arg(file.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn user_config_is_layered_under_explicit_config() {
    let home = tempfile::tempdir().expect("temp config home");
    let dir = home.path().join("pratt");
    std::fs::create_dir_all(&dir).expect("config dir");
    std::fs::write(dir.join("pratt.toml"), "[parsing]\nstatement_separator = \";\"\n")
        .expect("write user config");

    let mut cmd = cargo_bin_cmd!("pratt");
    cmd.env("XDG_CONFIG_HOME", home.path())
        .args(["parse", "--expr", "a; b"]);
    cmd.assert().success().stdout("{ a; b }\n");

    let mut explicit = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp config");
    writeln!(explicit, "[parsing]\nstatement_separator = \"\"").expect("write config");

    let mut cmd = cargo_bin_cmd!("pratt");
    cmd.env("XDG_CONFIG_HOME", home.path())
        .args(["parse", "--expr", "a; b", "--config"])
        .arg(explicit.path());
    cmd.assert().failure().code(1);
}
