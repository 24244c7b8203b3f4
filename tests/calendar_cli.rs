use predicates::prelude::*;
use predicates::str::contains;

mod support;
use support::TestHome;

#[test]
fn calendar_shows_month_and_weekday_headers() {
    let home = TestHome::new();
    home.cmd()
        .args(["calendar", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(contains("March 2024"))
        .stdout(contains("Sun"))
        .stdout(contains("Sat"));
}

#[test]
fn calendar_lists_tasks_on_their_day() {
    let home = TestHome::new();
    home.add("Buy milk", "2024-03-15");
    home.add("Call dentist", "2024-03-15");

    home.cmd()
        .args(["calendar", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(contains("Mar 15"))
        .stdout(contains("Buy milk"))
        .stdout(contains("Call dentist"));
}

#[test]
fn calendar_caps_per_day_listing_with_overflow() {
    let home = TestHome::new();
    for text in ["one", "two", "three", "four", "five"] {
        home.add(text, "2024-03-15");
    }

    home.cmd()
        .args(["calendar", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(contains("one"))
        .stdout(contains("three"))
        .stdout(contains("+2 more"))
        .stdout(contains("four").not());
}

#[test]
fn calendar_ignores_tasks_outside_the_month() {
    let home = TestHome::new();
    home.add("Elsewhere", "2024-05-01");

    home.cmd()
        .args(["calendar", "--month", "2024-03"])
        .assert()
        .success()
        .stdout(contains("Elsewhere").not());
}

#[test]
fn calendar_rejects_malformed_month() {
    let home = TestHome::new();
    home.cmd()
        .args(["calendar", "--month", "March"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("YYYY-MM"));
}

#[test]
fn calendar_rejects_extreme_years_as_user_error() {
    let home = TestHome::new();
    for month in ["2147483647-01", "262143-12", "0-01"] {
        home.cmd()
            .args(["calendar", "--month", month])
            .assert()
            .failure()
            .code(2)
            .stderr(contains("YYYY-MM"));
    }
}

#[test]
fn calendar_json_emits_42_cells() {
    let home = TestHome::new();
    home.add("Buy milk", "2024-03-15");

    let assert = home
        .cmd()
        .args(["--json", "calendar", "--month", "2024-03"])
        .assert()
        .success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON envelope");

    assert_eq!(value["command"], "calendar");
    assert_eq!(value["data"]["month"], "2024-03");
    let cells = value["data"]["cells"].as_array().expect("cells array");
    assert_eq!(cells.len(), 42);

    // March 2024 starts on a Friday; the grid starts the previous Sunday.
    assert_eq!(cells[0]["date"], "2024-02-25");
    let march_15 = cells
        .iter()
        .find(|cell| cell["date"] == "2024-03-15")
        .expect("March 15 in grid");
    assert_eq!(march_15["inMonth"], true);
    assert_eq!(march_15["tasks"][0]["text"], "Buy milk");
}
