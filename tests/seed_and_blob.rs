mod support;

use support::{json_output, taskgrid_cmd, TestEnv};

#[test]
fn missing_blob_falls_back_to_seed_tasks() {
    let env = TestEnv::new();
    assert!(!env.blob_exists());

    let value = json_output(taskgrid_cmd(&env).args(["list", "--json"]));
    assert_eq!(value["data"]["total"].as_u64(), Some(3));
    let tasks = value["data"]["tasks"].as_array().expect("tasks array");
    assert_eq!(tasks[0]["id"].as_u64(), Some(1));
    assert_eq!(tasks[0]["status"], "Pending");
    assert_eq!(tasks[0]["priority"], "Low");

    // Listing alone does not create the blob.
    assert!(!env.blob_exists());
}

#[test]
fn first_mutation_writes_blob_with_seed_included() {
    let env = TestEnv::new();

    let value = json_output(taskgrid_cmd(&env).args([
        "add",
        "Fourth",
        "--description",
        "details",
        "--due",
        "2026-10-01",
        "--json",
    ]));
    assert_eq!(value["data"]["task"]["id"].as_u64(), Some(4));
    assert_eq!(value["data"]["total"].as_u64(), Some(4));

    let blob = env.read_blob();
    let tasks = blob.as_array().expect("blob array");
    assert_eq!(tasks.len(), 4);
    assert_eq!(tasks[3]["name"], "Fourth");
}

#[test]
fn corrupt_blob_falls_back_to_seed_tasks() {
    let env = TestEnv::new();
    env.write_blob("{ not json ]");

    let value = json_output(taskgrid_cmd(&env).args(["list", "--json"]));
    assert_eq!(value["data"]["total"].as_u64(), Some(3));
}

#[test]
fn blob_survives_round_trips() {
    let env = TestEnv::new();
    env.write_blob(
        r#"[
        {"id": 5, "name": "Existing", "description": "kept", "dueDate": "2026-09-09", "status": "Completed", "priority": "High"}
    ]"#,
    );

    let value = json_output(taskgrid_cmd(&env).args(["list", "--json"]));
    assert_eq!(value["data"]["total"].as_u64(), Some(1));
    assert_eq!(value["data"]["tasks"][0]["status"], "Completed");

    let value = json_output(taskgrid_cmd(&env).args([
        "add",
        "Next",
        "--description",
        "details",
        "--due",
        "2026-09-10",
        "--json",
    ]));
    assert_eq!(value["data"]["task"]["id"].as_u64(), Some(6));

    let blob = env.read_blob();
    let tasks = blob.as_array().expect("blob array");
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["id"].as_u64(), Some(5));
    assert_eq!(tasks[1]["id"].as_u64(), Some(6));
}

#[test]
fn tasks_missing_status_and_priority_get_defaults() {
    let env = TestEnv::new();
    env.write_blob(r#"[{"id": 1, "name": "Bare", "dueDate": "2026-09-09"}]"#);

    let value = json_output(taskgrid_cmd(&env).args(["list", "--json"]));
    let task = &value["data"]["tasks"][0];
    assert_eq!(task["status"], "Pending");
    assert_eq!(task["priority"], "Low");
    assert_eq!(task["description"], "");
}
