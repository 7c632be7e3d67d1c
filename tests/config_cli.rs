mod support;

use std::fs;

use support::{json_output, taskgrid_cmd, TestEnv};

#[test]
fn config_defaults_apply_to_new_tasks() {
    let env = TestEnv::new();
    env.write_blob("[]");
    let config_path = env.data_file().with_file_name("taskgrid.toml");
    fs::write(
        &config_path,
        "[defaults]\nstatus = \"In Progress\"\npriority = \"High\"\n",
    )
    .expect("write config");

    let value = json_output(taskgrid_cmd(&env).args([
        "--config",
        config_path.to_str().expect("utf8 path"),
        "add",
        "Configured",
        "--description",
        "details",
        "--due",
        "2026-09-01",
        "--json",
    ]));
    assert_eq!(value["data"]["task"]["status"], "In Progress");
    assert_eq!(value["data"]["task"]["priority"], "High");
}

#[test]
fn invalid_config_defaults_are_rejected() {
    let env = TestEnv::new();
    env.write_blob("[]");
    let config_path = env.data_file().with_file_name("taskgrid.toml");
    fs::write(&config_path, "[defaults]\nstatus = \"done\"\n").expect("write config");

    taskgrid_cmd(&env)
        .args([
            "--config",
            config_path.to_str().expect("utf8 path"),
            "list",
        ])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn explicit_flag_wins_over_config_data_file() {
    let env = TestEnv::new();
    env.write_blob("[]");
    let other_blob = env.data_file().with_file_name("other.json");
    fs::write(
        &other_blob,
        r#"[{"id": 9, "name": "Elsewhere", "dueDate": "2026-09-09"}]"#,
    )
    .expect("write other blob");
    let config_path = env.data_file().with_file_name("taskgrid.toml");
    fs::write(
        &config_path,
        format!("data_file = {:?}\n", other_blob.to_str().expect("utf8 path")),
    )
    .expect("write config");

    // --data-file (set by the test harness) takes precedence over the config.
    let value = json_output(taskgrid_cmd(&env).args([
        "--config",
        config_path.to_str().expect("utf8 path"),
        "list",
        "--json",
    ]));
    assert_eq!(value["data"]["total"].as_u64(), Some(0));

    // Without the flag, the config's data_file is used.
    let mut cmd = assert_cmd::Command::cargo_bin("taskgrid").expect("binary");
    cmd.env_remove("TASKGRID_DATA_FILE");
    let value = json_output(cmd.args([
        "--config",
        config_path.to_str().expect("utf8 path"),
        "list",
        "--json",
    ]));
    assert_eq!(value["data"]["total"].as_u64(), Some(1));
    assert_eq!(value["data"]["tasks"][0]["name"], "Elsewhere");
}
