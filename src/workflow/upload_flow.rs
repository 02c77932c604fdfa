//! 上传处理流程 - 流程层
//!
//! 核心职责：定义"一份文档"从提交到拿到识别结果的流程
//!
//! 流程顺序：
//! 1. 检查是否选择了文件（否则直接提示，不发请求）
//! 2. 进入 loading 状态并上传
//! 3. 拿到文档 ID 后轮询到终态
//!
//! 终态之后的渲染、切换分区、刷新已保存结果由控制器完成

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info};

use crate::clients::{ReviewApi, UploadRequest};
use crate::error::{AppError, AppResult};
use crate::models::{DocType, OcrEngine, ResultPayload};
use crate::services::Poller;
use crate::view::ReviewView;

pub const NO_FILE_ALERT: &str = "Please select a file!";

/// 一次上传提交
#[derive(Debug, Clone)]
pub struct Submission {
    pub file: Option<PathBuf>,
    pub doc_type: DocType,
    pub ocr_engine: OcrEngine,
}

/// 上传流程
///
/// - 不持有任何缓存状态
/// - 只依赖 API 和轮询器
pub struct UploadFlow {
    api: Arc<dyn ReviewApi>,
    poller: Poller,
}

impl UploadFlow {
    pub fn new(api: Arc<dyn ReviewApi>, poller: Poller) -> Self {
        Self { api, poller }
    }

    /// 执行上传并等待终态结果
    ///
    /// 失败时已经向视图提示过（轮询失败除外，只记录日志）
    pub async fn run<V: ReviewView + ?Sized>(
        &self,
        view: &mut V,
        submission: Submission,
    ) -> AppResult<ResultPayload> {
        let Some(path) = submission.file else {
            view.alert(NO_FILE_ALERT);
            return Err(AppError::Precondition("未选择文件".to_string()));
        };

        view.set_loading(true);

        let request = match read_upload(&path, submission.doc_type, submission.ocr_engine).await {
            Ok(request) => request,
            Err(e) => {
                error!("❌ 读取文件失败: {}", e);
                view.alert(&format!("Error: {}", e));
                view.set_loading(false);
                return Err(e);
            }
        };

        info!(
            "📤 上传 {} ({}, {})",
            request.file_name,
            request.doc_type.as_str(),
            request.ocr_engine.as_str()
        );

        let doc_id = match self.api.upload(request).await {
            Ok(id) => id,
            Err(e) => {
                error!("❌ 上传失败: {}", e);
                view.alert("Error: Upload failed");
                view.set_loading(false);
                return Err(e);
            }
        };

        info!("✓ 上传成功，文档 ID: {}，开始轮询", doc_id);

        self.poller
            .run(&doc_id, |message| view.show_progress(message))
            .await
    }
}

async fn read_upload(path: &Path, doc_type: DocType, ocr_engine: OcrEngine) -> AppResult<UploadRequest> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());

    Ok(UploadRequest {
        file_name,
        bytes,
        doc_type,
        ocr_engine,
    })
}
