use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use exam_review::utils::logging;
use exam_review::{App, Command, Config};

/// 试卷 / 答题卡 OCR 阅卷客户端
#[derive(Debug, Parser)]
#[command(name = "exam-review", version, about)]
struct Cli {
    /// 配置文件路径（默认读取当前目录的 exam-review.toml）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 输出 debug 日志
    #[arg(short, long)]
    verbose: bool,

    /// 详情中附带完整 JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load(cli.config.as_deref()).context("加载配置失败")?;

    // 初始化日志
    logging::init(cli.verbose || config.verbose_logging);

    // 初始化并运行应用
    let mut app = App::initialize(config, cli.json)?;
    app.run(cli.command.unwrap_or(Command::Dashboard)).await?;

    Ok(())
}
