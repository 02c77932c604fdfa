//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：创建 HTTP 客户端、视图和控制器
//! 2. **命令分发**：把命令行子命令映射成控制器事件
//! 3. **结果汇总**：命令失败时返回带上下文的错误

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use tracing::{info, warn};

use crate::clients::HttpApiClient;
use crate::config::Config;
use crate::models::{Category, DocType, OcrEngine, Section};
use crate::orchestrator::controller::{LoadOutcome, ReviewController};
use crate::utils::logging::log_startup;
use crate::view::console::ConsoleView;
use crate::workflow::Submission;

/// 子命令
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// 检查后端是否可达
    Check,
    /// 显示仪表盘（加载全部列表）
    Dashboard,
    /// 列出试卷
    Papers {
        /// 选中指定文件
        #[arg(long)]
        select: Option<String>,
    },
    /// 列出答题卡
    Sheets {
        /// 选中指定文件
        #[arg(long)]
        select: Option<String>,
    },
    /// 列出已保存结果
    Results {
        /// 选中指定结果 ID
        #[arg(long)]
        select: Option<String>,
    },
    /// 显示已保存结果详情
    Show {
        /// 结果 ID
        id: String,
    },
    /// 上传文档并等待识别结果
    Upload {
        /// 待上传文件
        file: Option<PathBuf>,
        /// 文档类型
        #[arg(long, value_enum, default_value = "question-paper")]
        doc_type: DocType,
        /// OCR 引擎
        #[arg(long, value_enum, default_value = "gemini")]
        ocr_engine: OcrEngine,
    },
}

/// 应用主结构
pub struct App {
    controller: ReviewController<ConsoleView>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config, show_json: bool) -> Result<Self> {
        log_startup(&config);

        let api = HttpApiClient::new(&config).context("创建 API 客户端失败")?;
        let controller = ReviewController::new(&config, Arc::new(api), ConsoleView::new(show_json));

        Ok(Self { controller })
    }

    /// 执行一个命令
    pub async fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Check => {
                if !self.controller.check_backend().await {
                    bail!("后端不可达");
                }
            }
            Command::Dashboard => {
                self.controller.check_backend().await;
                self.controller.initialize().await;
            }
            Command::Papers { select } => {
                self.list(Section::QuestionPapers, Category::QuestionPapers, select)
                    .await?
            }
            Command::Sheets { select } => {
                self.list(Section::AnswerSheets, Category::AnswerSheets, select)
                    .await?
            }
            Command::Results { select } => {
                self.controller.navigate(Section::Results).await;
                let outcome = self.controller.load(Category::SavedResults, false).await;
                ensure_listed(Category::SavedResults, outcome)?;
                if let Some(id) = select {
                    self.controller
                        .set_active(Category::SavedResults, &id)
                        .await
                        .with_context(|| format!("无法选中结果 {}", id))?;
                }
            }
            Command::Show { id } => {
                self.controller
                    .fetch_detail(&id)
                    .await
                    .with_context(|| format!("加载结果 {} 失败", id))?;
            }
            Command::Upload {
                file,
                doc_type,
                ocr_engine,
            } => {
                let payload = self
                    .controller
                    .submit(Submission {
                        file,
                        doc_type,
                        ocr_engine,
                    })
                    .await
                    .context("上传处理失败")?;
                info!("🎉 处理完成: {}", payload.status.as_str());
            }
        }
        Ok(())
    }

    async fn list(&mut self, section: Section, category: Category, select: Option<String>) -> Result<()> {
        let outcome = self
            .controller
            .navigate(section)
            .await
            .unwrap_or(LoadOutcome::Cached);
        ensure_listed(category, outcome)?;

        if let Some(id) = select {
            self.controller
                .set_active(category, &id)
                .await
                .with_context(|| format!("无法选中 {}", id))?;
        }
        Ok(())
    }
}

fn ensure_listed(category: Category, outcome: LoadOutcome) -> Result<()> {
    match outcome {
        LoadOutcome::Failed => bail!("加载 {} 失败", category),
        LoadOutcome::Empty => {
            warn!("⚠️ {} 为空", category);
            Ok(())
        }
        _ => Ok(()),
    }
}
