use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_async_pi"))
        .args(args)
        .env("PI_LOG", "off")
        .output()
        .expect("failed to run async_pi")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout is not utf-8")
}

fn assert_single_estimate_line(output: &Output) -> f64 {
    assert!(output.status.success(), "status {:?}", output.status);
    let stdout = stdout_of(output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "stdout: {stdout:?}");

    let value = lines[0]
        .strip_prefix("Pi approximation: ")
        .unwrap_or_else(|| panic!("unexpected line: {}", lines[0]));
    value.parse().expect("estimate is not a float")
}

#[test]
fn success_prints_one_estimate_line() {
    for executor in ["tasks", "threads"] {
        let output = run(&["-n", "200000", "-t", "8", "-e", executor]);
        let pi = assert_single_estimate_line(&output);
        assert!((0.0..=4.0).contains(&pi), "{executor}: {pi}");
    }
}

#[test]
fn logging_stays_off_stdout() {
    let output = Command::new(env!("CARGO_BIN_EXE_async_pi"))
        .args(["--total-points", "1000", "--tasks", "4"])
        .env("PI_LOG", "async_pi=debug")
        .output()
        .expect("failed to run async_pi");
    assert_single_estimate_line(&output);
    assert!(!output.stderr.is_empty());
}

#[test]
fn fewer_points_than_tasks_exits_with_error() {
    for executor in ["tasks", "threads"] {
        let output = run(&["-n", "5", "-t", "10", "-e", executor]);
        assert_eq!(output.status.code(), Some(1));
        assert!(output.stdout.is_empty(), "stdout: {:?}", stdout_of(&output));

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("no samples drawn"), "stderr: {stderr}");
    }
}

#[test]
fn zero_tasks_exits_with_error() {
    let output = run(&["-n", "100", "-t", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("task count"));
}

#[test]
fn huge_task_count_exits_with_error() {
    let output = run(&["-n", "5", "-t", &usize::MAX.to_string()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}
