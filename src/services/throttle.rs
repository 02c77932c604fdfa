//! 刷新节流 - 业务能力层
//!
//! 防止已保存结果列表在短时间内被重复拉取

use std::time::Duration;

use tokio::time::Instant;

/// 时间窗口节流闸门
///
/// 只有在放行时才记录时间；拒绝时没有副作用
#[derive(Debug, Clone)]
pub struct ThrottleGate {
    window: Duration,
    last_fetch_at: Option<Instant>,
}

impl ThrottleGate {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_fetch_at: None,
        }
    }

    pub fn from_millis(window_ms: u64) -> Self {
        Self::new(Duration::from_millis(window_ms))
    }

    /// 是否允许本次刷新
    ///
    /// `force_reload` 总是放行；否则距上次放行不少于窗口时长才放行。
    /// 从未放行过的闸门总是放行。
    pub fn allow(&mut self, now: Instant, force_reload: bool) -> bool {
        let open = force_reload
            || match self.last_fetch_at {
                None => true,
                Some(last) => now.saturating_duration_since(last) >= self.window,
            };

        if open {
            self.last_fetch_at = Some(now);
        }
        open
    }

    pub fn last_fetch_at(&self) -> Option<Instant> {
        self.last_fetch_at
    }
}
