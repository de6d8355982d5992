use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn detemplate(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_detemplate"))
        .args(args)
        .current_dir(dir)
        .env_remove("ACRONYM_LIST")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn has_git() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A fresh git repository named `name` inside a temp dir.
fn repo(name: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join(name);
    fs::create_dir_all(&root).unwrap();
    let status = Command::new("git")
        .args(["init", "-q"])
        .current_dir(&root)
        .status()
        .unwrap();
    assert!(status.success());
    (dir, root)
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = detemplate(dir.path(), &["--bogus"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--bogus"));
}

#[test]
fn json_without_yes_or_dry_run_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let output = detemplate(dir.path(), &["--json"]);

    assert_eq!(output.status.code(), Some(2));
    let body: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "validation.invalid_argument");
}

#[test]
fn outside_a_repository_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let output = detemplate(dir.path(), &["--dry-run"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Not inside a git repository"), "{}", err);
    assert!(err.contains("hint:"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn clean_repository_has_nothing_to_do() {
    if !has_git() {
        return;
    }
    let (_dir, root) = repo("acme");
    fs::write(root.join("README.md"), "# Acme\n").unwrap();

    let output = detemplate(&root, &["--yes"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).starts_with("Nothing to do"));

    let output = detemplate(&root, &["--dry-run", "--json"]);
    assert_eq!(output.status.code(), Some(0));
    let body: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "nothing_to_do");
    assert_eq!(body["data"]["names"]["new_lower"], "acme");
}

#[test]
fn without_a_terminal_or_yes_the_run_aborts() {
    if !has_git() {
        return;
    }
    let (_dir, root) = repo("acme");
    fs::write(root.join("template.txt"), "template\n").unwrap();

    let output = detemplate(&root, &[]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).starts_with("Aborted"));
    assert_eq!(fs::read_to_string(root.join("template.txt")).unwrap(), "template\n");
}

#[test]
fn dry_run_then_apply() {
    if !has_git() {
        return;
    }
    let (_dir, root) = repo("my-api-tool");
    fs::create_dir_all(root.join("template")).unwrap();
    fs::write(root.join("template/Template.md"), "# Template\n").unwrap();

    let preview = detemplate(&root, &["--dry-run"]);
    assert_eq!(preview.status.code(), Some(0));
    let text = stdout(&preview);
    assert!(text.contains("would update template/Template.md (1 replacement(s))"), "{}", text);
    assert!(text.contains("would rename template/Template.md → my-api-tool/My API Tool.md"));
    assert!(root.join("template/Template.md").exists());

    let applied = detemplate(&root, &["--yes", "--json"]);
    assert_eq!(applied.status.code(), Some(0));
    let body: serde_json::Value = serde_json::from_str(&stdout(&applied)).unwrap();
    assert_eq!(body["data"]["status"], "completed");
    assert_eq!(body["data"]["report"]["applied"], true);
    assert_eq!(
        fs::read_to_string(root.join("my-api-tool/My API Tool.md")).unwrap(),
        "# My API Tool\n"
    );
    assert!(!root.join("template").exists());
}
