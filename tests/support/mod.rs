use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated home for one test: its own data file, never the user's.
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("todos.json")
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tuido").expect("binary");
        cmd.env_remove("TUIDO_DATA");
        cmd.arg("--data").arg(self.data_file());
        cmd
    }

    /// Add a task and return its id, parsed from the JSON envelope.
    pub fn add(&self, text: &str, date: &str) -> i64 {
        let assert = self
            .cmd()
            .args(["--json", "add", text, "--date", date])
            .assert()
            .success();
        let value: serde_json::Value =
            serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON envelope");
        value["data"]["id"].as_i64().expect("task id in envelope")
    }

    pub fn write_data(&self, contents: &str) {
        fs::write(self.data_file(), contents).expect("write data file");
    }

    pub fn read_data(&self) -> serde_json::Value {
        let contents = fs::read_to_string(self.data_file()).expect("read data file");
        serde_json::from_str(&contents).expect("valid JSON data file")
    }
}
