use predicates::str::contains;

mod support;
use support::TestHome;

#[test]
fn add_then_list_shows_task() {
    let home = TestHome::new();
    home.add("Buy milk", "2024-03-15");

    home.cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("Buy milk"))
        .stdout(contains("Mar 15"))
        .stdout(contains("[ ]"));
}

#[test]
fn add_rejects_blank_text() {
    let home = TestHome::new();
    home.cmd()
        .args(["add", "   "])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("must not be empty"));
}

#[test]
fn add_rejects_malformed_date() {
    let home = TestHome::new();
    home.cmd()
        .args(["add", "Buy milk", "--date", "15/03/2024"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("YYYY-MM-DD"));
}

#[test]
fn list_empty_shows_placeholder() {
    let home = TestHome::new();
    home.cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("No tasks. Add one to get started."));
}

#[test]
fn list_rejects_unknown_filter() {
    let home = TestHome::new();
    home.cmd()
        .args(["list", "--filter", "bogus"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("invalid filter"));
}

#[test]
fn done_toggles_both_ways() {
    let home = TestHome::new();
    let id = home.add("Buy milk", "2024-03-15");

    home.cmd()
        .args(["done", &id.to_string()])
        .assert()
        .success()
        .stdout(contains("now completed"));

    home.cmd()
        .args(["done", &id.to_string()])
        .assert()
        .success()
        .stdout(contains("now pending"));
}

#[test]
fn done_unknown_id_fails_and_keeps_data() {
    let home = TestHome::new();
    home.add("Buy milk", "2024-03-15");

    home.cmd()
        .args(["done", "999"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Task not found: 999"));

    let data = home.read_data();
    assert_eq!(data.as_array().unwrap().len(), 1);
    assert_eq!(data[0]["completed"], false);
}

#[test]
fn edit_changes_only_requested_fields() {
    let home = TestHome::new();
    let id = home.add("Buy milk", "2024-03-15");

    home.cmd()
        .args(["edit", &id.to_string(), "--text", "Buy oat milk"])
        .assert()
        .success()
        .stdout(contains("Updated task"));

    let data = home.read_data();
    assert_eq!(data[0]["text"], "Buy oat milk");
    assert_eq!(data[0]["date"], "2024-03-15");

    home.cmd()
        .args(["edit", &id.to_string(), "--date", "2024-04-01"])
        .assert()
        .success();
    let data = home.read_data();
    assert_eq!(data[0]["text"], "Buy oat milk");
    assert_eq!(data[0]["date"], "2024-04-01");
}

#[test]
fn edit_without_changes_is_an_error() {
    let home = TestHome::new();
    let id = home.add("Buy milk", "2024-03-15");

    home.cmd()
        .args(["edit", &id.to_string()])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("nothing to change"));
}

#[test]
fn rm_requires_confirmation() {
    let home = TestHome::new();
    let id = home.add("Buy milk", "2024-03-15");

    home.cmd()
        .args(["rm", &id.to_string()])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Confirmation required"));

    // Nothing was deleted.
    assert_eq!(home.read_data().as_array().unwrap().len(), 1);

    home.cmd()
        .args(["rm", &id.to_string(), "--yes"])
        .assert()
        .success()
        .stdout(contains("Deleted task"));
    assert!(home.read_data().as_array().unwrap().is_empty());
}

#[test]
fn stats_follow_the_task_lifecycle() {
    let home = TestHome::new();

    home.cmd()
        .args(["stats"])
        .assert()
        .success()
        .stdout(contains("total: 0"));

    let id = home.add("Buy milk", "2024-03-15");
    home.cmd()
        .args(["stats"])
        .assert()
        .success()
        .stdout(contains("total: 1"))
        .stdout(contains("completed: 0"))
        .stdout(contains("pending: 1"));

    home.cmd().args(["done", &id.to_string()]).assert().success();
    home.cmd()
        .args(["stats"])
        .assert()
        .success()
        .stdout(contains("completed: 1"))
        .stdout(contains("pending: 0"));

    home.cmd()
        .args(["rm", &id.to_string(), "--yes"])
        .assert()
        .success();
    home.cmd()
        .args(["stats"])
        .assert()
        .success()
        .stdout(contains("total: 0"));
}

#[test]
fn quiet_suppresses_output() {
    let home = TestHome::new();
    home.cmd()
        .args(["--quiet", "add", "Buy milk", "--date", "2024-03-15"])
        .assert()
        .success()
        .stdout(predicates::str::is_empty());
}
