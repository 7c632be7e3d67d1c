use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("tasks.json")
    }

    pub fn write_blob(&self, contents: &str) {
        fs::write(self.data_file(), contents).expect("write blob");
    }

    pub fn read_blob(&self) -> Value {
        let contents = fs::read_to_string(self.data_file()).expect("read blob");
        serde_json::from_str(&contents).expect("blob json")
    }

    pub fn blob_exists(&self) -> bool {
        self.data_file().exists()
    }
}

pub fn taskgrid_cmd(env: &TestEnv) -> Command {
    let mut cmd = Command::cargo_bin("taskgrid").expect("binary");
    cmd.arg("--data-file").arg(env.data_file());
    cmd.env_remove("TASKGRID_DATA_FILE");
    cmd.env_remove("TASKGRID_CONFIG");
    cmd
}

pub fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("json envelope")
}
