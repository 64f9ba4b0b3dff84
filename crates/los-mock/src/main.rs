//! LOS Mock CLI
//!
//! 模拟服务的命令行入口点。

use anyhow::Context;
use clap::Parser;
use los_mock::cli::{Cli, CommandRunner, Commands};
use los_shared::config::AppConfig;
use los_shared::observability::init_tracing;

const SERVICE_NAME: &str = "los-mock";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config_dir {
        Some(dir) => AppConfig::load_from(SERVICE_NAME, dir),
        None => AppConfig::load(SERVICE_NAME),
    }
    .context("加载配置失败")?;

    // 命令行日志级别优先于配置文件；RUST_LOG 仍然优先于两者
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }
    init_tracing(&config.service_name, &config.observability)?;

    let runner = CommandRunner::new(config);

    match cli.command {
        Commands::Server { port } => runner.run_server(port).await,
        Commands::Generate(args) => runner.run_generate(args).await,
    }
}
