use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::core::AnalysisRequest;
use crate::engine::Engine;

#[derive(Debug, Parser)]
#[command(
    name = "cryptoscope",
    version,
    about = "暗号実装インベントリを評価し、リスクスコアと改善提案を返す分析サービス"
)]
pub struct Cli {
    #[arg(long, global = true)]
    pub json: bool,
    #[arg(long, global = true)]
    pub verbose: bool,
    #[arg(long, global = true)]
    pub quiet: bool,
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Serve(ServeArgs),
    Analyze(AnalyzeArgs),
    Completion(CompletionArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub host: Option<String>,
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CompletionArgs {
    pub shell: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[arg(long)]
    pub show: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let home_dir = effective_home_dir()?;

    let env_config_path = std::env::var_os("CRYPTOSCOPE_CONFIG").map(PathBuf::from);
    let cfg = crate::config::load(
        cli.config.as_deref().or(env_config_path.as_deref()),
        &home_dir,
    )
    .map_err(crate::exit::invalid_args_err)?;

    init_tracing(&cfg, cli.verbose, cli.quiet);

    match cli.command {
        Commands::Serve(args) => {
            let host = args.host.unwrap_or_else(|| cfg.server.host.clone());
            let port = args.port.unwrap_or(cfg.server.port);
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("tokio ランタイムの初期化に失敗しました")
                .map_err(crate::exit::serve_failed_err)?;
            runtime
                .block_on(crate::api::serve(&cfg, &host, port))
                .map_err(crate::exit::serve_failed_err)?;
        }
        Commands::Analyze(args) => {
            let request = read_analysis_request(args.input.as_deref())?;
            let engine = Engine::new();
            let response = engine.analyze(&request);
            write_json(&response)?;
        }
        Commands::Completion(args) => {
            let shell = parse_shell(&args.shell)?;
            let mut cmd = Cli::command();
            let mut out = std::io::stdout().lock();
            clap_complete::generate(shell, &mut cmd, "cryptoscope", &mut out);
        }
        Commands::Config(args) => {
            if args.show {
                if cli.json {
                    let stdout = std::io::stdout();
                    serde_json::to_writer_pretty(stdout.lock(), &cfg)?;
                } else {
                    println!("{}", toml::to_string_pretty(&cfg)?);
                }
            } else if !cli.quiet {
                eprintln!("config: `cryptoscope config --show` を使用してください");
            }
        }
    }

    Ok(())
}

fn effective_home_dir() -> Result<PathBuf> {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .ok_or_else(|| crate::exit::invalid_args("環境変数 HOME が設定されていません"))
}

fn init_tracing(cfg: &crate::config::EffectiveConfig, verbose: bool, quiet: bool) {
    let directive = if quiet {
        "error".to_string()
    } else if verbose {
        "debug".to_string()
    } else {
        cfg.log.level.clone()
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_analysis_request(input: Option<&Path>) -> Result<AnalysisRequest> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("入力ファイルの読み取りに失敗しました: {}", path.display()))
            .map_err(crate::exit::invalid_args_err)?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("標準入力の読み取りに失敗しました")
                .map_err(crate::exit::invalid_args_err)?;
            buf
        }
    };

    serde_json::from_str(&raw)
        .context("入力(JSON)の解析に失敗しました")
        .map_err(crate::exit::invalid_args_err)
}

fn write_json(response: &crate::core::AnalysisResponse) -> Result<()> {
    use std::io::Write;

    let buf = serde_json::to_vec_pretty(response)?;

    let mut stdout = std::io::stdout().lock();
    match stdout.write_all(&buf) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => return Ok(()),
        Err(err) => return Err(err.into()),
    }
    match stdout.write_all(b"\n") {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn parse_shell(s: &str) -> Result<clap_complete::Shell> {
    use clap_complete::Shell;

    match s.trim().to_ascii_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        "powershell" => Ok(Shell::PowerShell),
        "elvish" => Ok(Shell::Elvish),
        other => Err(crate::exit::invalid_args(format!(
            "未対応のシェルです: {other}（bash|zsh|fish|powershell|elvish を指定してください）"
        ))),
    }
}
