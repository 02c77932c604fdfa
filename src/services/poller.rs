//! 结果轮询 - 业务能力层
//!
//! 只负责"等一个文档处理完"，不关心上传和渲染

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::clients::ReviewApi;
use crate::error::AppResult;
use crate::models::{ResultPayload, ResultStatus};

/// 结果轮询器
///
/// 固定间隔查询 `/api/results/{id}`：
/// - `completed` / `failed`：停止轮询并返回结果
/// - `processing` / `queued`：通过 `on_tick` 报告进度
/// - 请求或解析失败：立即停止，不重试
pub struct Poller {
    api: Arc<dyn ReviewApi>,
    interval: Duration,
}

impl Poller {
    pub fn new(api: Arc<dyn ReviewApi>, interval: Duration) -> Self {
        Self { api, interval }
    }

    /// 轮询直到终态
    ///
    /// 第一次请求在启动一个间隔之后发出。返回 `Ok` 即终态回调，整个轮询过程中最多一次；
    /// 返回 `Err` 时不会有终态结果。
    pub async fn run<F>(&self, id: &str, mut on_tick: F) -> AppResult<ResultPayload>
    where
        F: FnMut(&str),
    {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut ticks = 0usize;
        loop {
            ticker.tick().await;
            ticks += 1;

            let payload = match self.api.fetch_result(id).await {
                Ok(payload) => payload,
                Err(e) => {
                    error!("❌ 轮询文档 {} 失败，停止轮询: {}", id, e);
                    return Err(e);
                }
            };

            if payload.status.is_terminal() {
                info!(
                    "✓ 文档 {} 处理结束: {} (轮询 {} 次)",
                    id,
                    payload.status.as_str(),
                    ticks
                );
                return Ok(payload);
            }

            match progress_message(&payload) {
                Some(message) => on_tick(&message),
                None => debug!("文档 {} 未知状态，继续轮询", id),
            }
        }
    }
}

/// 非终态的进度提示
pub fn progress_message(payload: &ResultPayload) -> Option<String> {
    match payload.status {
        ResultStatus::Processing => Some(format!(
            "Processing with {}... please wait.",
            payload
                .ocr_engine
                .as_deref()
                .filter(|e| !e.is_empty())
                .unwrap_or("selected OCR engine")
        )),
        ResultStatus::Queued => Some("Queued... please wait.".to_string()),
        _ => None,
    }
}
