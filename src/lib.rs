//! # Exam Review
//!
//! 试卷 / 答题卡 OCR 识别后端的命令行客户端
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 只暴露后端能力，不持有任何界面状态
//! - `ReviewApi` - 列表、详情、上传、状态查询
//! - `HttpApiClient` - 基于 reqwest 的实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `CacheState` - 每个分类的列表缓存和选中状态
//! - `ThrottleGate` - 已保存结果的刷新节流
//! - `Poller` - 处理状态轮询
//! - `result_renderer` - 识别结果的展示模型
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份文档"从提交到终态的流程
//! - `UploadFlow` - 前置检查 → 上传 → 轮询
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/controller` - 导航、选中、上传终态路由
//! - `orchestrator/app` - 命令行入口
//!
//! 视图通过 `view::ReviewView` 注入，终端实现为 `ConsoleView`
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod view;
pub mod workflow;

// 重新导出常用类型
pub use clients::{HttpApiClient, ReviewApi};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use orchestrator::{App, Command, ReviewController};
pub use view::ReviewView;
pub use workflow::{Submission, UploadFlow};
