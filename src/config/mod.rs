use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    pub server: ServerConfig,
    pub log: LogConfig,
    pub cors: CorsConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogConfig {
    pub level: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorsConfig {
    pub allow_any_origin: bool,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            log: LogConfig {
                level: "info".to_string(),
            },
            cors: CorsConfig {
                allow_any_origin: true,
            },
            config_path: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    server: Option<RawServerConfig>,
    log: Option<RawLogConfig>,
    cors: Option<RawCorsConfig>,
}

#[derive(Debug, Deserialize)]
struct RawServerConfig {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct RawLogConfig {
    level: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCorsConfig {
    allow_any_origin: Option<bool>,
}

pub fn default_config_path(home_dir: &Path) -> PathBuf {
    home_dir.join(".config/cryptoscope/config.toml")
}

pub fn load(config_path: Option<&Path>, home_dir: &Path) -> Result<EffectiveConfig> {
    let mut cfg = EffectiveConfig::default();

    let path = config_path
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| default_config_path(home_dir));

    if path.exists() {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("設定ファイルの読み取りに失敗しました: {}", path.display()))?;
        let raw: RawConfig =
            toml::from_str(&s).context("設定ファイル(TOML)の解析に失敗しました")?;
        apply_raw_config(&mut cfg, raw);
        cfg.config_path = Some(path.display().to_string());
    }

    apply_env_overrides(&mut cfg)?;

    Ok(cfg)
}

fn apply_raw_config(cfg: &mut EffectiveConfig, raw: RawConfig) {
    if let Some(server) = raw.server {
        if let Some(host) = server.host {
            cfg.server.host = host;
        }
        if let Some(port) = server.port {
            cfg.server.port = port;
        }
    }

    if let Some(log) = raw.log {
        if let Some(level) = log.level {
            cfg.log.level = level;
        }
    }

    if let Some(cors) = raw.cors {
        if let Some(allow_any_origin) = cors.allow_any_origin {
            cfg.cors.allow_any_origin = allow_any_origin;
        }
    }
}

fn apply_env_overrides(cfg: &mut EffectiveConfig) -> Result<()> {
    if let Ok(v) = std::env::var("CRYPTOSCOPE_SERVER_HOST") {
        let v = v.trim();
        if !v.is_empty() {
            cfg.server.host = v.to_string();
        }
    }
    if let Ok(v) = std::env::var("CRYPTOSCOPE_SERVER_PORT") {
        cfg.server.port = v
            .trim()
            .parse::<u16>()
            .with_context(|| "CRYPTOSCOPE_SERVER_PORT")?;
    }
    if let Ok(v) = std::env::var("CRYPTOSCOPE_LOG_LEVEL") {
        let v = v.trim();
        if !v.is_empty() {
            cfg.log.level = v.to_string();
        }
    }
    if let Ok(v) = std::env::var("CRYPTOSCOPE_CORS_ALLOW_ANY_ORIGIN") {
        cfg.cors.allow_any_origin =
            parse_bool(&v).with_context(|| "CRYPTOSCOPE_CORS_ALLOW_ANY_ORIGIN")?;
    }

    Ok(())
}

fn parse_bool(s: &str) -> Result<bool> {
    let s = s.trim().to_ascii_lowercase();
    match s.as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow::anyhow!(
            "真偽値が不正です: {s}（true|false|1|0|yes|no|on|off を指定してください）"
        )),
    }
}
