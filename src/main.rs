//! codex-notify CLI
//!
//! 把 Codex CLI 的 notify 事件显示为 macOS 通知

use clap::Parser;
use codex_notify::cli::{error_line, handle_codex_notify, CodexNotifyArgs};
use codex_notify::Config;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "codex-notify")]
#[command(about = "Show Codex CLI notify events as native macOS notifications")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    args: CodexNotifyArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let loaded = Config::load(cli.args.overrides());

    // 通过 RUST_LOG 环境变量控制日志级别；未设置时只有详细模式输出调试日志
    // 例如: RUST_LOG=debug codex-notify '{"turn-id":"1"}'
    let default_filter = if loaded.config.verbose {
        "codex_notify=debug"
    } else {
        "codex_notify=error"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    for warning in &loaded.warnings {
        warn!("{}", warning);
    }

    match handle_codex_notify(cli.args, &loaded.config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_line(&e));
            ExitCode::FAILURE
        }
    }
}
