use thiserror::Error;

/// 应用程序错误类型
///
/// 网络失败与解析失败在调用方被同等处理，只在日志里区分
#[derive(Debug, Error)]
pub enum AppError {
    /// 请求被拒绝或返回非 2xx 状态
    #[error("网络请求失败 ({endpoint}): {message}")]
    Network { endpoint: String, message: String },

    /// 响应体无法解析为预期结构
    #[error("响应解析失败 ({endpoint}): {source}")]
    Parse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// 前置条件不满足（例如上传前未选择文件）
    #[error("前置条件不满足: {0}")]
    Precondition(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 文件读写错误
    #[error("文件错误 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err
            .url()
            .map(|u| u.path().to_string())
            .unwrap_or_default();
        AppError::Network {
            endpoint,
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse {
            endpoint: String::new(),
            source: err,
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io {
            path: String::new(),
            source: err,
        }
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建网络请求失败错误
    pub fn network(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Network {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// 创建响应解析失败错误
    pub fn parse(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::Parse {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }

    /// 是否属于请求层面的失败（网络或解析）
    pub fn is_request_failure(&self) -> bool {
        matches!(self, AppError::Network { .. } | AppError::Parse { .. })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
