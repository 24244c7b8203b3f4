use predicates::str::contains;

mod support;
use support::TestHome;

#[test]
fn corrupt_data_file_starts_empty_with_warning() {
    let home = TestHome::new();
    home.write_data("{not json");

    home.cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("No tasks. Add one to get started."))
        .stdout(contains("Warnings:"));
}

#[test]
fn incompatible_data_shape_starts_empty_with_warning() {
    let home = TestHome::new();
    home.write_data(r#"{"todos": "not an array"}"#);

    home.cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("No tasks. Add one to get started."))
        .stdout(contains("Warnings:"));
}

#[test]
fn add_after_corruption_replaces_the_file() {
    let home = TestHome::new();
    home.write_data("{not json");

    home.add("Fresh start", "2024-03-15");

    let data = home.read_data();
    let tasks = data.as_array().expect("array of tasks");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["text"], "Fresh start");
}

#[test]
fn data_survives_across_invocations() {
    let home = TestHome::new();
    let id = home.add("Buy milk", "2024-03-15");
    home.cmd().args(["done", &id.to_string()]).assert().success();

    let data = home.read_data();
    assert_eq!(data[0]["completed"], true);
    assert_eq!(data[0]["text"], "Buy milk");
    assert_eq!(data[0]["date"], "2024-03-15");
    assert!(data[0]["createdAt"].is_string());
}

#[test]
fn missing_data_file_is_not_a_warning() {
    let home = TestHome::new();
    home.cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("Warnings:").count(0));
}
