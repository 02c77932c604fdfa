//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层把用户事件（导航、选择、上传）调度到流程层和能力层，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 创建 HTTP 客户端和终端视图
//! - 把命令行子命令映射成控制器事件
//!
//! ### `controller` - 阅卷控制器
//! - 持有三个列表缓存和节流闸门
//! - 处理列表加载、选中、详情拉取
//! - 上传终态后的路由（显示结果、切换分区、强制刷新）
//!
//! ## 层次关系
//!
//! ```text
//! app (命令行)
//!     ↓
//! controller (缓存 / 选中 / 路由)
//!     ↓
//! workflow::UploadFlow (单次上传)
//!     ↓
//! services (能力层：cache / throttle / poller / renderer)
//!     ↓
//! clients (基础设施：ReviewApi)
//! ```

pub mod app;
pub mod controller;

// 重新导出主要类型
pub use app::{App, Command};
pub use controller::{LoadOutcome, ReviewController};
