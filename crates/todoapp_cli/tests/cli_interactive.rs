use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("todoapp-{nanos}-{file_name}"))
}

fn run_with_config(config_path: &Path, args: &[&str], input: &str) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_todoapp");

    let mut child = Command::new(exe)
        .args(["--delay-ms", "0"])
        .args(args)
        .env("TODOAPP_CONFIG_PATH", config_path)
        .env_remove("TODOAPP_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn interactive session");

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin
            .write_all(input.as_bytes())
            .expect("failed to write to stdin");
    }

    child
        .wait_with_output()
        .expect("failed to read interactive output")
}

fn run_interactive(args: &[&str], input: &str) -> std::process::Output {
    run_with_config(&temp_path("missing-config.json"), args, input)
}

fn json_screens(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter(|line| line.starts_with('{'))
        .map(|line| serde_json::from_str(line).expect("screen is valid JSON"))
        .collect()
}

#[test]
fn interactive_starts_on_welcome_and_walks_to_home() {
    let output = run_interactive(&[], "start\nstart\nexit\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let welcome = stdout.find("Welcome to TodoApp!").expect("welcome shown");
    let instructions = stdout.find("How to Use").expect("instructions shown");
    let home = stdout.find("My Todo App").expect("home shown");
    assert!(welcome < instructions && instructions < home);
    assert!(stdout.contains("No tasks yet."));
}

#[test]
fn interactive_help_shows_usage() {
    let output = run_interactive(&[], "help\n?\nexit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage") || stdout.contains("USAGE"));
    assert!(stdout.contains("clear-completed"));
}

#[test]
fn interactive_invalid_command_prints_error() {
    let output = run_interactive(&[], "nope\nexit\n");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}

#[test]
fn interactive_home_command_on_welcome_is_rejected() {
    let output = run_interactive(&[], "add \"Buy milk\"\n");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input - 'add' is only available on the Home screen"));
}

#[test]
fn interactive_buy_milk_walk_dog_scenario() {
    let script = "start\nstart\nadd \"Buy milk\"\nadd Walk dog\ntoggle task-1\nfilter active\nexit\n";
    let output = run_interactive(&[], script);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task: Buy milk (task-1)"));
    assert!(stdout.contains("Added task: Walk dog (task-2)"));
    assert!(stdout.contains("Completed task: Buy milk (task-1)"));
    assert!(stdout.contains("1 item left"));
}

#[test]
fn interactive_adds_text_starting_with_a_hyphen() {
    let output = run_interactive(&[], "go home\nadd \"-5 degrees\"\nadd --fix the bike\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("Added task: -5 degrees (task-1)"));
    assert!(stdout.contains("Added task: --fix the bike (task-2)"));
    assert!(!stderr.contains("ERROR"));
}

#[test]
fn interactive_shows_busy_home_while_add_is_pending() {
    let output = run_interactive(&["--json"], "go home\nadd \"Buy milk\"\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let busy: Vec<_> = json_screens(&stdout)
        .into_iter()
        .filter(|screen| screen["snapshot"]["busy"] == true)
        .collect();
    assert_eq!(busy.len(), 1);
    assert_eq!(busy[0]["snapshot"]["tasks"].as_array().map(Vec::len), Some(0));

    let plain = run_interactive(&[], "go home\nadd \"Buy milk\"\n");
    let stdout = String::from_utf8_lossy(&plain.stdout);
    let working = stdout.find("working...").expect("busy screen printed");
    let added = stdout.find("Added task: Buy milk").expect("add notice printed");
    assert!(working < added);
}

#[test]
fn interactive_json_snapshot_follows_filter() {
    let script = "start\nstart\nadd \"Buy milk\"\nadd \"Walk dog\"\ntoggle task-1\nfilter completed\n";
    let output = run_interactive(&["--json"], script);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let screens = json_screens(&stdout);
    assert_eq!(screens[0]["screen"], "welcome");

    let last = screens.last().expect("home rendered");
    assert_eq!(last["screen"], "home");
    assert_eq!(last["snapshot"]["filter"], "completed");
    assert_eq!(last["snapshot"]["remaining"], 1);
    assert_eq!(last["snapshot"]["busy"], false);
    let tasks = last["snapshot"]["tasks"].as_array().expect("tasks array");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["text"], "Buy milk");
    assert_eq!(tasks[0]["completed"], true);
}

#[test]
fn interactive_blank_add_is_rejected() {
    let output = run_interactive(&[], "go home\nadd \"   \"\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input - task text is required"));
    assert!(!stdout.contains("Added task:"));
}

#[test]
fn interactive_delete_asks_for_confirmation() {
    let script = "go home\nadd A\ndelete task-1\nn\ndelete task-1\ny\nexit\n";
    let output = run_interactive(&[], script);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Delete task \"A\"? [y/N]"));
    let cancelled = stdout.find("Delete cancelled").expect("first delete cancelled");
    let deleted = stdout.find("Deleted task: A (task-1)").expect("second delete applied");
    assert!(cancelled < deleted);
}

#[test]
fn interactive_delete_declines_at_end_of_input() {
    let output = run_interactive(&[], "go home\nadd A\ndelete task-1\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Delete cancelled"));
    assert!(!stdout.contains("Deleted task:"));
}

#[test]
fn interactive_clear_completed_with_yes_flag() {
    let script = "go home\nadd A\nadd B\ntoggle task-1\nclear-completed\nfilter all\n";
    let output = run_interactive(&["--yes", "--json"], script);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Cleared 1 completed task"));
    let last = json_screens(&stdout).pop().expect("home rendered");
    let tasks = last["snapshot"]["tasks"].as_array().expect("tasks array");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["text"], "B");
    assert_eq!(last["snapshot"]["has_completed"], false);
}

#[test]
fn interactive_leaving_home_discards_tasks() {
    let script = "go home\nadd A\nback\ngo home\n";
    let output = run_interactive(&["--json"], script);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let last = json_screens(&stdout).pop().expect("home rendered");
    assert_eq!(last["screen"], "home");
    assert_eq!(last["snapshot"]["tasks"].as_array().map(Vec::len), Some(0));
}

#[test]
fn interactive_uses_config_aliases_and_default_filter() {
    let config_path = temp_path("alias-config.json");
    let config = serde_json::json!({
        "aliases": { "a": "add", "home": "go home" },
        "default_filter": "active"
    });
    std::fs::write(&config_path, serde_json::to_string(&config).unwrap()).unwrap();

    let output = run_with_config(&config_path, &["--json"], "home\na Buy milk\n");
    std::fs::remove_file(&config_path).ok();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task: Buy milk (task-1)"));
    let last = json_screens(&stdout).pop().expect("home rendered");
    assert_eq!(last["snapshot"]["filter"], "active");
}

#[test]
fn interactive_invalid_config_falls_back_to_defaults() {
    let config_path = temp_path("broken-config.json");
    std::fs::write(&config_path, "{ not json").unwrap();

    let output = run_with_config(&config_path, &[], "exit\n");
    std::fs::remove_file(&config_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("Welcome to TodoApp!"));
    assert!(stderr.contains("config ignored"));
}
