use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kvp(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kvp").unwrap();
    cmd.current_dir(dir.path())
        .env("KVP_FILE", dir.path().join("kvp.json"));
    cmd
}

fn init_store(dir: &TempDir) {
    kvp(dir).arg("init").assert().success();
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// kvp init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_working_document() {
    let dir = TempDir::new().unwrap();
    kvp(&dir).arg("init").assert().success();
    assert!(dir.path().join("kvp.json").is_file());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    kvp(&dir).arg("init").assert().success();
    kvp(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

#[test]
fn commands_fail_before_init() {
    let dir = TempDir::new().unwrap();
    kvp(&dir)
        .args(["project", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

// ---------------------------------------------------------------------------
// kvp project
// ---------------------------------------------------------------------------

#[test]
fn project_new_and_list() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);

    kvp(&dir)
        .args(["project", "new", "Reduce", "scrap", "rate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reduce scrap rate"));

    kvp(&dir)
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reduce scrap rate"))
        .stdout(predicate::str::contains("draft"));
}

#[test]
fn project_select_by_id_prefix() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);

    let first = stdout_json(kvp(&dir).args(["-j", "project", "new", "first"]));
    kvp(&dir).args(["project", "new", "second"]).assert().success();

    let id = first["id"].as_str().unwrap();
    kvp(&dir)
        .args(["project", "select", &id[..8]])
        .assert()
        .success()
        .stdout(predicate::str::contains("first"));

    kvp(&dir)
        .args(["project", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("first"));
}

#[test]
fn project_status_rejects_unknown_value() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);
    kvp(&dir).args(["project", "new", "p"]).assert().success();

    kvp(&dir)
        .args(["project", "status", "paused"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid project status"));
}

#[test]
fn delete_last_project_is_blocked() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);
    kvp(&dir).args(["project", "new", "only"]).assert().success();

    kvp(&dir)
        .args(["project", "delete"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("the last project cannot be deleted"));

    // Collection unchanged.
    kvp(&dir)
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("only"));
}

#[test]
fn delete_reselects_first_remaining_project() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);
    kvp(&dir).args(["project", "new", "first"]).assert().success();
    kvp(&dir).args(["project", "new", "second"]).assert().success();

    // "second" is active; deleting it falls back to "first".
    kvp(&dir).args(["project", "delete"]).assert().success();
    kvp(&dir)
        .args(["project", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("first"));
}

// ---------------------------------------------------------------------------
// kvp dashboard
// ---------------------------------------------------------------------------

#[test]
fn sample_project_dashboard_is_complete() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);
    kvp(&dir).args(["project", "sample"]).assert().success();

    kvp(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress: 100%"))
        .stdout(predicate::str::contains("3 total"))
        .stdout(predicate::str::contains("Improvement: 28.9%"));
}

#[test]
fn dashboard_json_reports_task_counts() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);
    kvp(&dir).args(["project", "sample"]).assert().success();

    let value = stdout_json(kvp(&dir).args(["-j", "dashboard"]));
    assert_eq!(value["progress"], 100);
    assert_eq!(value["tasks"]["total"], 3);
    assert_eq!(value["tasks"]["completed"], 1);
    assert_eq!(value["tasks"]["in_progress"], 1);
    // The two unfinished sample steps are due in 2024 and long past.
    assert_eq!(value["tasks"]["overdue"], 2);
    assert_eq!(value["phases"]["plan"], true);
    assert_eq!(value["phases"]["act"], true);
}

#[test]
fn empty_project_dashboard_is_zero() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);
    kvp(&dir).args(["project", "new", "fresh"]).assert().success();

    kvp(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress: 0%"))
        .stdout(predicate::str::contains("0 total"));
}

// ---------------------------------------------------------------------------
// kvp plan / check / act
// ---------------------------------------------------------------------------

#[test]
fn plan_problem_awards_a_quarter_of_progress() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);
    kvp(&dir).args(["project", "new", "p"]).assert().success();

    kvp(&dir)
        .args(["plan", "set", "--problem", "Long wait times"])
        .assert()
        .success();

    kvp(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress: 25%"));
}

#[test]
fn check_set_computes_improvement() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);
    kvp(&dir).args(["project", "new", "p"]).assert().success();

    kvp(&dir)
        .args(["check", "set", "--before", "45", "--after", "32"])
        .assert()
        .success()
        .stdout(predicate::str::contains("28.9%"));
}

#[test]
fn check_show_marks_regression() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);
    kvp(&dir).args(["project", "new", "p"]).assert().success();

    kvp(&dir)
        .args(["check", "set", "--before", "10", "--after", "12"])
        .assert()
        .success();

    kvp(&dir)
        .args(["check", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-20.0%"))
        .stdout(predicate::str::contains("regression"));
}

#[test]
fn act_set_and_show() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);
    kvp(&dir).args(["project", "new", "p"]).assert().success();

    kvp(&dir)
        .args(["act", "set", "--standardization", "New work instructions"])
        .assert()
        .success();

    kvp(&dir)
        .args(["act", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New work instructions"));
}

// ---------------------------------------------------------------------------
// kvp task
// ---------------------------------------------------------------------------

#[test]
fn task_add_status_and_list() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);
    kvp(&dir).args(["project", "new", "p"]).assert().success();

    kvp(&dir)
        .args([
            "task",
            "add",
            "Analyze",
            "utilization",
            "--responsible",
            "Marie",
            "--due",
            "2024-07-15",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added task #1"));

    kvp(&dir)
        .args(["task", "status", "1", "done"])
        .assert()
        .success();

    kvp(&dir)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1/1 completed"))
        .stdout(predicate::str::contains("Analyze utilization"));
}

#[test]
fn task_add_rejects_malformed_date() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);
    kvp(&dir).args(["project", "new", "p"]).assert().success();

    kvp(&dir)
        .args(["task", "add", "t", "--due", "July 15th"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid date"));

    // Nothing was added.
    kvp(&dir)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks yet."));
}

#[test]
fn task_status_rejects_unknown_value() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);
    kvp(&dir).args(["project", "new", "p"]).assert().success();
    kvp(&dir)
        .args(["task", "add", "t", "--due", "2024-07-15"])
        .assert()
        .success();

    kvp(&dir)
        .args(["task", "status", "1", "blocked"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid task status"));
}

#[test]
fn task_out_of_range_number_fails() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);
    kvp(&dir).args(["project", "new", "p"]).assert().success();

    kvp(&dir)
        .args(["task", "status", "5", "done"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("task not found"));
}

// ---------------------------------------------------------------------------
// kvp export / import
// ---------------------------------------------------------------------------

#[test]
fn export_import_roundtrip() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);
    kvp(&dir).args(["project", "sample"]).assert().success();

    let snapshot = dir.path().join("snapshot.json");
    kvp(&dir)
        .args(["export"])
        .arg(&snapshot)
        .assert()
        .success();
    assert!(snapshot.is_file());

    // Import into a fresh working document.
    let other = TempDir::new().unwrap();
    init_store(&other);
    kvp(&other).args(["project", "new", "placeholder"]).assert().success();
    kvp(&other)
        .arg("import")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wait time reduction"));

    kvp(&other)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress: 100%"));
}

#[test]
fn importing_the_same_snapshot_twice_fails() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);
    kvp(&dir).args(["project", "sample"]).assert().success();

    let snapshot = dir.path().join("snapshot.json");
    kvp(&dir).args(["export"]).arg(&snapshot).assert().success();

    kvp(&dir)
        .arg("import")
        .arg(&snapshot)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already in the store"));
}

#[test]
fn export_default_filename_derives_from_name() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);
    kvp(&dir).args(["project", "new", "Scrap", "rate"]).assert().success();

    kvp(&dir).arg("export").assert().success();
    assert!(dir.path().join("kvp_project_Scrap_rate.json").is_file());
}

// ---------------------------------------------------------------------------
// kvp role
// ---------------------------------------------------------------------------

#[test]
fn viewer_role_blocks_edits() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);
    kvp(&dir).args(["project", "new", "p"]).assert().success();
    kvp(&dir).args(["role", "viewer"]).assert().success();

    kvp(&dir)
        .args(["plan", "set", "--problem", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot edit"));
}

#[test]
fn editor_role_cannot_delete() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);
    kvp(&dir).args(["project", "new", "a"]).assert().success();
    kvp(&dir).args(["project", "new", "b"]).assert().success();
    kvp(&dir).args(["role", "editor"]).assert().success();

    kvp(&dir)
        .args(["project", "delete"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot delete"));

    // Editors can still edit fields.
    kvp(&dir)
        .args(["plan", "set", "--goal", "g"])
        .assert()
        .success();
}

#[test]
fn role_show_defaults_to_admin() {
    let dir = TempDir::new().unwrap();
    init_store(&dir);

    kvp(&dir)
        .arg("role")
        .assert()
        .success()
        .stdout(predicate::str::contains("admin"));

    kvp(&dir)
        .args(["role", "supervisor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid role"));
}
