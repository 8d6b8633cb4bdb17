use clap::Parser;
use serde_json::json;
use tempfile::TempDir;
use widget_mcp_app::cli::{self, Cli, Command};
use widget_mcp_app::config::{Config, LogFormat};

fn config(dir: &TempDir) -> Config {
    Config {
        sandbox_root: dir.path().join("widgets"),
        docs_root: dir.path().join("docs"),
        log_format: LogFormat::Compact,
    }
}

#[test]
fn test_parse_call_command() {
    let cli = Cli::try_parse_from([
        "widget-mcp",
        "--config",
        "custom.yaml",
        "call",
        "read_widget_file",
        "--args",
        r#"{"path":"a.txt"}"#,
    ])
    .unwrap();

    assert_eq!(cli.config.to_str(), Some("custom.yaml"));
    match cli.command {
        Command::Call { tool, args } => {
            assert_eq!(tool, "read_widget_file");
            assert_eq!(args, r#"{"path":"a.txt"}"#);
        }
        other => panic!("Expected call command, got {:?}", other),
    }
}

#[tokio::test]
async fn test_tools_lists_builtins() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli::execute(Command::Tools, &config(&dir)).await.unwrap();

    assert_eq!(output.as_object().unwrap().len(), 5);
    assert!(output["write_widget_file"]["inputSchema"].is_object());
}

#[tokio::test]
async fn test_schemas_are_function_declarations() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli::execute(Command::Schemas, &config(&dir)).await.unwrap();

    let schemas = output.as_array().unwrap();
    assert_eq!(schemas.len(), 5);
    assert!(schemas.iter().all(|s| s["type"] == "function"));
}

#[tokio::test]
async fn test_call_write_returns_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli::execute(
        Command::Call {
            tool: "write_widget_file".into(),
            args: json!({"path": "a.txt", "content": "hi"}).to_string(),
        },
        &config(&dir),
    )
    .await
    .unwrap();

    assert_eq!(output["content"][0]["type"], "text");
    assert!(dir.path().join("widgets/a.txt").is_file());
}

#[tokio::test]
async fn test_call_with_bad_json_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = cli::execute(
        Command::Call {
            tool: "write_widget_file".into(),
            args: "{not json".into(),
        },
        &config(&dir),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_call_unknown_tool_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = cli::execute(
        Command::Call {
            tool: "nope".into(),
            args: "{}".into(),
        },
        &config(&dir),
    )
    .await
    .unwrap_err();

    assert!(err.to_string().contains("nope"));
}

#[tokio::test]
async fn test_locate_finds_widget_files() {
    let dir = tempfile::tempdir().unwrap();
    let widget = dir.path().join("widgets/generated/timer");
    std::fs::create_dir_all(&widget).unwrap();
    std::fs::write(widget.join("index.js"), "export default {};").unwrap();
    std::fs::write(widget.join("component.tsx"), "export default () => null;").unwrap();

    let output = cli::execute(
        Command::Locate {
            dir: "generated/timer".into(),
            prompt: Some("a pomodoro timer".into()),
        },
        &config(&dir),
    )
    .await
    .unwrap();

    assert_eq!(output["prompt"], "a pomodoro timer");
    assert!(output["indexPath"].as_str().unwrap().ends_with("index.js"));
    assert!(output["componentPath"].as_str().unwrap().ends_with("component.tsx"));
}

#[tokio::test]
async fn test_locate_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = cli::execute(
        Command::Locate {
            dir: "generated/none".into(),
            prompt: None,
        },
        &config(&dir),
    )
    .await;

    assert!(result.is_err());
}
