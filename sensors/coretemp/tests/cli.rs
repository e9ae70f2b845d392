use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_sensor(dir: &Path, index: u32, label: &str, input: i64, max: i64, crit: i64) {
    fs::write(dir.join(format!("temp{index}_label")), format!("{label}\n")).unwrap();
    fs::write(dir.join(format!("temp{index}_input")), format!("{input}\n")).unwrap();
    fs::write(dir.join(format!("temp{index}_max")), format!("{max}\n")).unwrap();
    fs::write(dir.join(format!("temp{index}_crit")), format!("{crit}\n")).unwrap();
}

/// Monitor directory without `temp1`, like some desktop boards.
fn monitor() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_sensor(dir.path(), 2, "Core 0", 45000, 80000, 100000);
    write_sensor(dir.path(), 3, "Core 1", 90000, 80000, 100000);
    write_sensor(dir.path(), 4, "Package id 0", 99000, 80000, 100000);
    dir
}

fn tempbgline(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tempbgline"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn per_core_graph_from_explicit_monitor() {
    let dir = monitor();
    let output = tempbgline(&["-m", dir.path().to_str().unwrap()]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "▅!\n");
}

#[test]
fn average_graph() {
    let dir = monitor();
    let output = tempbgline(&["-a", "-m", dir.path().to_str().unwrap()]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "▇\n");
}

#[test]
fn verbose_wraps_the_graph() {
    let dir = monitor();
    let output = tempbgline(&["-v", "-m", dir.path().to_str().unwrap()]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains(&dir.path().display().to_string()));
    assert!(text.contains("Package id 0"));
    assert!(text.contains("▅!"));
    assert!(text.contains("Graph ["));
}

#[test]
fn verbose_graph_colour_survives_alerts() {
    let dir = TempDir::new().unwrap();
    write_sensor(dir.path(), 2, "Core 0", 101000, 80000, 100000);
    write_sensor(dir.path(), 3, "Core 1", 40000, 80000, 100000);

    let output = tempbgline(&["-v", "-m", dir.path().to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("\x1b[1;31m!\x1b[0m\x1b[1;34m\u{2584}"));
    assert!(text.ends_with("\x1b[1;31m]\x1b[0m\n"));
}

#[test]
fn plain_graph_has_no_colour_restore() {
    let dir = TempDir::new().unwrap();
    write_sensor(dir.path(), 2, "Core 0", 101000, 80000, 100000);

    let output = tempbgline(&["-m", dir.path().to_str().unwrap()]);
    assert_eq!(stdout(&output), "\x1b[1;31m!\x1b[0m\n");
}

#[test]
fn json_output() {
    let dir = monitor();
    let output = tempbgline(&["--json", "-m", dir.path().to_str().unwrap()]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["text"], "▅!");
    assert_eq!(json["class"], "warning");
    assert_eq!(json["percentage"], 84);
}

#[test]
fn check_reports_availability() {
    let dir = monitor();
    let output = tempbgline(&["--check", "-m", dir.path().to_str().unwrap()]);
    assert!(output.status.success());

    let empty = TempDir::new().unwrap();
    let output = tempbgline(&["--check", "-m", empty.path().to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn no_cores_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_sensor(dir.path(), 1, "Package id 0", 50000, 80000, 100000);

    let output = tempbgline(&["-m", dir.path().to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn missing_monitor_is_fatal() {
    let dir = TempDir::new().unwrap();
    let output = tempbgline(&["-m", dir.path().join("hwmon7").to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn usage_errors() {
    assert!(!tempbgline(&["stray"]).status.success());
    assert!(!tempbgline(&["-x"]).status.success());
    assert!(!tempbgline(&["-m"]).status.success());
}

#[test]
fn unreadable_field_is_not_fatal() {
    let dir = monitor();
    fs::write(dir.path().join("temp2_max"), "n/a\n").unwrap();

    let output = tempbgline(&["-m", dir.path().to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "?!\n");
    assert!(!output.stderr.is_empty());
}
