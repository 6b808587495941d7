use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};

fn cryptoscope_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cryptoscope"));
    cmd.env("HOME", home);
    cmd.env_remove("CRYPTOSCOPE_CONFIG");
    cmd.env_remove("CRYPTOSCOPE_SERVER_HOST");
    cmd.env_remove("CRYPTOSCOPE_SERVER_PORT");
    cmd.env_remove("CRYPTOSCOPE_LOG_LEVEL");
    cmd.env_remove("CRYPTOSCOPE_CORS_ALLOW_ANY_ORIGIN");
    cmd
}

fn run(home: &Path, args: &[&str]) -> Output {
    cryptoscope_cmd(home)
        .args(args)
        .output()
        .expect("run cryptoscope")
}

fn make_temp_home() -> PathBuf {
    static HOME_SEQ: AtomicU64 = AtomicU64::new(0);

    let seq = HOME_SEQ.fetch_add(1, Ordering::Relaxed);
    let home = std::env::temp_dir().join(format!(
        "cryptoscope-config-test-{}-{seq}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&home);
    std::fs::create_dir_all(&home).expect("create home");
    home
}

fn write_file(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdirs");
    }
    std::fs::write(path, bytes).expect("write");
}

#[test]
fn defaults_apply_without_config_file() {
    let home = make_temp_home();

    let out = run(&home, &["config", "--show", "--json"]);
    assert!(out.status.success());

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    assert_eq!(
        v.pointer("/server/host").and_then(|h| h.as_str()),
        Some("0.0.0.0")
    );
    assert_eq!(v.pointer("/server/port").and_then(|p| p.as_u64()), Some(8080));
    assert_eq!(v.pointer("/log/level").and_then(|l| l.as_str()), Some("info"));
    assert_eq!(
        v.pointer("/cors/allow_any_origin").and_then(|c| c.as_bool()),
        Some(true)
    );
    assert!(v.get("config_path").is_none());

    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn config_file_overrides_defaults() {
    let home = make_temp_home();
    write_file(
        home.join(".config/cryptoscope/config.toml").as_path(),
        br#"
[server]
port = 9090

[cors]
allow_any_origin = false
"#,
    );

    let out = run(&home, &["config", "--show", "--json"]);
    assert!(out.status.success());

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    assert_eq!(v.pointer("/server/port").and_then(|p| p.as_u64()), Some(9090));
    assert_eq!(
        v.pointer("/cors/allow_any_origin").and_then(|c| c.as_bool()),
        Some(false)
    );
    assert!(
        v.get("config_path")
            .and_then(|p| p.as_str())
            .is_some_and(|p| p.ends_with("config.toml"))
    );

    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn config_show_emits_effective_config() {
    let home = make_temp_home();
    write_file(
        home.join(".config/cryptoscope/config.toml").as_path(),
        br#"
[server]
port = 9090
"#,
    );

    let out = run(&home, &["config", "--show"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("port = 9090"), "stdout={stdout}");
    assert!(stdout.contains("config_path"), "stdout={stdout}");

    let _ = std::fs::remove_dir_all(&home);
}
