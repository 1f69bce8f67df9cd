use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const EVENT_SETTINGS: &str = r#"{
    "AbsoluteFilePathRegExpPattern": ".*\\.txt$",
    "SearchFilesRecursively": false,
    "DataRegExpPattern": "(\\d{4}/\\d{2}/\\d{2} \\d{2}:\\d{2}:\\d{2}) ([A-Z]+)",
    "ColumnHeaderSpaceSeparated": "DateTime Event"
}"#;

struct Fixture {
    _temp: TempDir,
    settings: PathBuf,
    data: PathBuf,
    out: PathBuf,
}

fn fixture(settings: &str) -> Fixture {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    let settings_path = root.join("events.json");
    fs::write(&settings_path, settings).unwrap();

    let data = root.join("data");
    fs::create_dir(&data).unwrap();
    fs::write(data.join("a.txt"), "2024/01/01 10:00:00 START").unwrap();
    fs::write(data.join("b.log"), "2024/01/01 11:00:00 IGNORED").unwrap();

    let out = root.join("out");
    fs::create_dir(&out).unwrap();

    Fixture {
        _temp: temp,
        settings: settings_path,
        data,
        out,
    }
}

fn answers(paths: &[&Path]) -> String {
    paths
        .iter()
        .map(|p| format!("\"{}\"\r\n", p.display()))
        .collect()
}

fn tabgrep() -> Command {
    let mut cmd = Command::cargo_bin("tabgrep").unwrap();
    cmd.env_remove("TABGREP_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn interactive_run_writes_report_named_after_settings() {
    let fx = fixture(EVENT_SETTINGS);

    tabgrep()
        .write_stdin(answers(&[&fx.settings, &fx.data, &fx.out]))
        .assert()
        .success()
        .stdout(predicate::str::contains("Setting JSON: "))
        .stdout(predicate::str::contains("Data Folder: "))
        .stdout(predicate::str::contains("Output Folder: "))
        .stdout(predicate::str::contains("Match Count = 1"))
        .stdout(predicate::str::contains("Completed"));

    let report = fs::read_to_string(fx.out.join("events.txt")).unwrap();
    assert_eq!(report, "DateTime\tEvent\n2024/01/01 10:00:00\tSTART\n");
}

#[test]
fn flags_skip_prompts_and_explicit_name_wins() {
    let settings = EVENT_SETTINGS.replace(
        "\"ColumnHeaderSpaceSeparated\"",
        "\"OutputFileName\": \"result.tsv\",\n    \"ColumnHeaderSpaceSeparated\"",
    );
    let fx = fixture(&settings);

    tabgrep()
        .arg("--config")
        .arg(&fx.settings)
        .arg("--input")
        .arg(&fx.data)
        .arg("--output")
        .arg(&fx.out)
        .arg("--output-format")
        .arg("plain")
        .assert()
        .success()
        .stdout(predicate::str::contains("Setting JSON: ").not());

    assert!(fx.out.join("result.tsv").exists());
    assert!(!fx.out.join("events.txt").exists());
}

#[test]
fn quiet_mode_still_prints_completion_marker() {
    let fx = fixture(EVENT_SETTINGS);

    tabgrep()
        .args(["-q", "-c"])
        .arg(&fx.settings)
        .arg("-i")
        .arg(&fx.data)
        .arg("-o")
        .arg(&fx.out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed"))
        .stdout(predicate::str::contains("Match Count").not());
}

#[test]
fn single_file_that_does_not_match_is_a_config_error() {
    let fx = fixture(EVENT_SETTINGS);

    tabgrep()
        .arg("-c")
        .arg(&fx.settings)
        .arg("-i")
        .arg(fx.data.join("b.log"))
        .arg("-o")
        .arg(&fx.out)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not match"));

    assert_eq!(fs::read_dir(&fx.out).unwrap().count(), 0);
}

#[test]
fn invalid_data_pattern_exits_with_pattern_code() {
    let fx = fixture(r#"{"AbsoluteFilePathRegExpPattern": ".*", "DataRegExpPattern": "(oops"}"#);

    tabgrep()
        .arg("-c")
        .arg(&fx.settings)
        .arg("-i")
        .arg(&fx.data)
        .arg("-o")
        .arg(&fx.out)
        .assert()
        .code(3);
}

#[test]
fn missing_settings_file_is_a_config_error() {
    let fx = fixture(EVENT_SETTINGS);

    tabgrep()
        .write_stdin(answers(&[&fx.out.join("nope.json")]))
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Data Folder: ").not());
}

#[test]
fn missing_output_folder_is_an_io_error() {
    let fx = fixture(EVENT_SETTINGS);

    tabgrep()
        .arg("-c")
        .arg(&fx.settings)
        .arg("-i")
        .arg(&fx.data)
        .arg("-o")
        .arg(fx.out.join("missing"))
        .assert()
        .code(4);
}

#[test]
fn closed_stdin_fails() {
    tabgrep().write_stdin("").assert().failure();
}

#[test]
fn json_output_reports_summary() {
    let fx = fixture(EVENT_SETTINGS);

    tabgrep()
        .args(["--output-format", "json", "-c"])
        .arg(&fx.settings)
        .arg("-i")
        .arg(&fx.data)
        .arg("-o")
        .arg(&fx.out)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"files_selected\": 1"))
        .stdout(predicate::str::contains("\"matches\": 1"));
}

#[test]
fn plain_output_reports_progress_percent() {
    let fx = fixture(EVENT_SETTINGS);
    fs::write(fx.data.join("c.txt"), "2024/01/03 08:00:00 STOP").unwrap();

    tabgrep()
        .args(["--output-format", "plain", "-c"])
        .arg(&fx.settings)
        .arg("-i")
        .arg(&fx.data)
        .arg("-o")
        .arg(&fx.out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress 50 percent."))
        .stdout(predicate::str::contains("Progress 100 percent."));

    tabgrep()
        .args(["--output-format", "plain", "-q", "-c"])
        .arg(&fx.settings)
        .arg("-i")
        .arg(&fx.data)
        .arg("-o")
        .arg(&fx.out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress").not());
}

#[test]
fn recursive_flag_overrides_settings() {
    let fx = fixture(EVENT_SETTINGS);
    let nested = fx.data.join("nested");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("c.txt"), "2024/01/02 09:00:00 NESTED").unwrap();

    tabgrep()
        .args(["-q", "--recursive", "-c"])
        .arg(&fx.settings)
        .arg("-i")
        .arg(&fx.data)
        .arg("-o")
        .arg(&fx.out)
        .assert()
        .success();

    let report = fs::read_to_string(fx.out.join("events.txt")).unwrap();
    assert_eq!(
        report,
        "DateTime\tEvent\n2024/01/01 10:00:00\tSTART\n2024/01/02 09:00:00\tNESTED\n"
    );
}

#[test]
fn generate_config_writes_sample() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sample.json");

    tabgrep()
        .arg("--generate-config")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated sample settings file"));

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("ColumnHeaderSpaceSeparated"));
}
