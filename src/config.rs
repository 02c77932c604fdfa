use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "exam-review.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 后端地址
    pub api_base_url: String,
    /// 轮询识别结果的间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 已保存结果列表的刷新节流窗口（毫秒）
    pub saved_results_throttle_ms: u64,
    /// 试卷列表优先选中的文件名（大小写不敏感）
    pub default_question_paper: String,
    /// 单个请求超时（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            poll_interval_ms: 2000,
            saved_results_throttle_ms: 5000,
            default_question_paper: "eng_1.pdf".to_string(),
            request_timeout_secs: 30,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 加载配置：默认值 → TOML 文件（如果存在）→ 环境变量，合并后统一校验
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let base = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        let config = base.with_env();
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件加载，缺失字段使用默认值
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 默认值 + 环境变量，不读取配置文件
    pub fn from_env() -> AppResult<Self> {
        let config = Self::default().with_env();
        config.validate()?;
        Ok(config)
    }

    /// 用环境变量覆盖已有配置
    pub fn with_env(self) -> Self {
        Self {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(self.api_base_url),
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.poll_interval_ms),
            saved_results_throttle_ms: std::env::var("SAVED_RESULTS_THROTTLE_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.saved_results_throttle_ms),
            default_question_paper: std::env::var("DEFAULT_QUESTION_PAPER").unwrap_or(self.default_question_paper),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.request_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }

    fn validate(&self) -> AppResult<()> {
        if self.poll_interval_ms == 0 {
            return Err(AppError::Config("poll_interval_ms 必须大于 0".to_string()));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(AppError::Config("api_base_url 不能为空".to_string()));
        }
        Ok(())
    }
}
