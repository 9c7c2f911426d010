use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Run the CLI binary with an isolated HOME and no COCOBASE_* variables.
pub fn run_cli_with_env(args: &[&str], home: &Path, env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cocobase"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join("config"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    for var in ["COCOBASE_API_KEY", "COCOBASE_TOKEN", "COCOBASE_BASE_URL"] {
        cmd.env_remove(var);
    }
    cmd.envs(env.iter().copied());
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI off the async runtime so a mock server can answer it.
pub async fn run_cli(args: &[&str], home: &Path, env: &[(&str, &str)]) -> Output {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let env: Vec<(String, String)> = env
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let home = home.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let env: Vec<(&str, &str)> = env.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        run_cli_with_env(&args, &home, &env)
    })
    .await
    .expect("CLI task panicked")
}

/// Run the CLI and expect success, returning stdout.
pub async fn run_cli_success(args: &[&str], home: &Path, env: &[(&str, &str)]) -> String {
    let output = run_cli(args, home, env).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Path of the saved profile under an isolated HOME.
pub fn profile_path(home: &Path) -> PathBuf {
    home.join("config").join("cocobase").join("config.json")
}
