use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("todolist-{nanos}-{file_name}"))
}

fn run(store_path: &Path, args: &[&str]) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_todolist");
    Command::new(exe)
        .args(args)
        .env("TODOLIST_STORE_PATH", store_path)
        .output()
        .expect("failed to run todolist command")
}

fn add_and_get_id(store_path: &Path, title: &str) -> String {
    let output = run(store_path, &["add", title, "--json"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let record: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    record["id"].as_str().unwrap().to_string()
}

#[test]
fn edit_command_updates_title() {
    let store_path = temp_path("cli-edit.json");
    let id = add_and_get_id(&store_path, "old title");

    let output = run(&store_path, &["edit", &id, "--title", "new title", "--json"]);
    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let record: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(record["title"], "new title");
}

#[test]
fn edit_command_clears_due_date() {
    let store_path = temp_path("cli-edit-clear-due.json");

    let output = run(&store_path, &["add", "demo", "--due", "2026-01-20", "--json"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let record: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    let id = record["id"].as_str().unwrap();

    let output = run(&store_path, &["edit", id, "--clear-due", "--json"]);
    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let record: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert!(record["dueDate"].is_null());
}

#[test]
fn edit_command_requires_a_field() {
    let store_path = temp_path("cli-edit-nothing.json");
    let id = add_and_get_id(&store_path, "demo");

    let output = run(&store_path, &["edit", &id]);
    std::fs::remove_file(&store_path).ok();
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: validation"));
}

#[test]
fn remove_command_deletes_todo() {
    let store_path = temp_path("cli-remove.json");
    let id = add_and_get_id(&store_path, "doomed");

    let output = run(&store_path, &["remove", &id]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Removed todo:"));

    let output = run(&store_path, &["list"]);
    std::fs::remove_file(&store_path).ok();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No todos"));
}

#[test]
fn remove_command_rejects_unknown_id() {
    let store_path = temp_path("cli-remove-missing.json");
    add_and_get_id(&store_path, "demo");

    let output = run(&store_path, &["remove", "todo-0"]);
    std::fs::remove_file(&store_path).ok();
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: not_found"));
}
