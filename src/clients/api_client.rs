/// 阅卷后端 API 客户端
///
/// 封装所有与后端接口相关的调用逻辑
use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{
    Category, DocType, DocumentEntry, FileList, OcrEngine, ResultPayload, SavedResultSummary,
    UploadResponse,
};

/// 待上传的文件
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub doc_type: DocType,
    pub ocr_engine: OcrEngine,
}

/// 后端能力
///
/// 任何非 2xx 或网络失败都返回 `AppError::Network`，响应体无法解析返回 `AppError::Parse`
pub trait ReviewApi: Send + Sync {
    /// 试卷 / 答题卡列表
    fn list_documents(&self, category: Category) -> BoxFuture<'_, AppResult<Vec<DocumentEntry>>>;

    /// 已保存结果列表（服务器原始顺序）
    fn list_saved_results(&self) -> BoxFuture<'_, AppResult<Vec<SavedResultSummary>>>;

    /// 已保存结果详情
    fn fetch_saved_result<'a>(&'a self, id: &'a str) -> BoxFuture<'a, AppResult<ResultPayload>>;

    /// 上传文档，返回文档 ID
    fn upload(&self, request: UploadRequest) -> BoxFuture<'_, AppResult<String>>;

    /// 查询处理状态
    fn fetch_result<'a>(&'a self, id: &'a str) -> BoxFuture<'a, AppResult<ResultPayload>>;

    /// 后端是否可达
    fn check_connection(&self) -> BoxFuture<'_, bool>;
}

/// 基于 reqwest 的 HTTP 客户端
pub struct HttpApiClient {
    client: Client,
    base_url: Url,
}

impl HttpApiClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("无法创建 HTTP 客户端: {}", e)))?;

        let base_url = Url::parse(config.api_base_url.trim())
            .map_err(|e| AppError::Config(format!("后端地址无效 {}: {}", config.api_base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!("后端地址无效: {}", config.api_base_url)));
        }

        Ok(Self { client, base_url })
    }

    /// 拼接接口地址
    ///
    /// `id` 作为单独的路径段追加，`#`、`%`、空格等字符会被转义
    pub fn url(&self, endpoint: &str, id: Option<&str>) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AppError::Config(format!("后端地址无效: {}", self.base_url)))?;
            segments
                .pop_if_empty()
                .extend(endpoint.split('/').filter(|s| !s.is_empty()));
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, id: Option<&str>) -> AppResult<T> {
        let url = self.url(endpoint, id)?;
        debug!("GET {}", url);
        let resp = self.client.get(url.clone()).send().await?;
        decode(url.path(), resp).await
    }
}

impl ReviewApi for HttpApiClient {
    fn list_documents(&self, category: Category) -> BoxFuture<'_, AppResult<Vec<DocumentEntry>>> {
        Box::pin(async move {
            let list: FileList<DocumentEntry> = self.get_json(category.list_endpoint(), None).await?;
            Ok(list.files)
        })
    }

    fn list_saved_results(&self) -> BoxFuture<'_, AppResult<Vec<SavedResultSummary>>> {
        Box::pin(async move {
            let list: FileList<SavedResultSummary> = self
                .get_json(Category::SavedResults.list_endpoint(), None)
                .await?;
            Ok(list.files)
        })
    }

    fn fetch_saved_result<'a>(&'a self, id: &'a str) -> BoxFuture<'a, AppResult<ResultPayload>> {
        Box::pin(async move {
            self.get_json(Category::SavedResults.list_endpoint(), Some(id))
                .await
        })
    }

    fn upload(&self, request: UploadRequest) -> BoxFuture<'_, AppResult<String>> {
        Box::pin(async move {
            let endpoint = "/api/upload";
            debug!(
                "POST {} ({} 字节, {}, {})",
                endpoint,
                request.bytes.len(),
                request.doc_type.as_str(),
                request.ocr_engine.as_str()
            );

            let form = Form::new()
                .part("file", Part::bytes(request.bytes).file_name(request.file_name))
                .text("doc_type", request.doc_type.as_str())
                .text("ocr_engine", request.ocr_engine.as_str());

            let resp = self
                .client
                .post(self.url(endpoint, None)?)
                .multipart(form)
                .send()
                .await?;

            let body: UploadResponse = decode(endpoint, resp).await?;
            Ok(body.id)
        })
    }

    fn fetch_result<'a>(&'a self, id: &'a str) -> BoxFuture<'a, AppResult<ResultPayload>> {
        Box::pin(async move { self.get_json("/api/results", Some(id)).await })
    }

    // 用试卷列表接口探测
    fn check_connection(&self) -> BoxFuture<'_, bool> {
        Box::pin(async move {
            let endpoint = Category::QuestionPapers.list_endpoint();
            let url = match self.url(endpoint, None) {
                Ok(url) => url,
                Err(e) => {
                    debug!("后端探测失败: {}", e);
                    return false;
                }
            };
            match self.client.get(url).send().await {
                Ok(resp) => resp.status().is_success(),
                Err(e) => {
                    debug!("后端探测失败: {}", e);
                    false
                }
            }
        })
    }
}

// ========== 辅助函数 ==========

/// 检查状态码并解析响应体
async fn decode<T: DeserializeOwned>(endpoint: &str, resp: Response) -> AppResult<T> {
    let status = resp.status();
    if !status.is_success() {
        return Err(AppError::network(endpoint, format!("HTTP {}", status)));
    }

    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| AppError::parse(endpoint, e))
}
