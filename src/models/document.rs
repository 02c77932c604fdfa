use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 可以按标识查找的列表条目
pub trait Identified {
    fn identity(&self) -> &str;
}

/// 远程文件描述（试卷 / 答题卡）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub name: String,
    pub url: String,
}

impl Identified for DocumentEntry {
    fn identity(&self) -> &str {
        &self.name
    }
}

/// 识别状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Completed,
    Failed,
    Processing,
    Queued,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ResultStatus {
    /// 轮询到此状态后不再继续
    pub fn is_terminal(&self) -> bool {
        matches!(self, ResultStatus::Completed | ResultStatus::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultStatus::Completed => "completed",
            ResultStatus::Failed => "failed",
            ResultStatus::Processing => "processing",
            ResultStatus::Queued => "queued",
            ResultStatus::Unknown => "unknown",
        }
    }
}

/// 已保存结果的摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedResultSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: ResultStatus,
    #[serde(default)]
    pub doc_type: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SavedResultSummary {
    /// 解析时间戳，无法解析时返回 None
    ///
    /// 支持带时区的 RFC 3339、无时区的 ISO 日期时间（按 UTC）和纯日期
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    /// 详情接口路径
    pub fn detail_endpoint(&self) -> String {
        format!("/api/saved-results/{}", self.id)
    }
}

impl Identified for SavedResultSummary {
    fn identity(&self) -> &str {
        &self.id
    }
}

/// 解析已保存结果的时间戳
///
/// 支持 RFC 3339、不带时区的 ISO 时间（本地时间）和纯日期（UTC 零点）
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        // 不带时区的时间按本地时间处理，落在夏令时空隙里的退回 UTC
        return naive
            .and_local_timezone(Local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|| Some(naive.and_utc()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// 结构化识别出的单道题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedItem {
    #[serde(deserialize_with = "deserialize_q_no")]
    pub q_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subparts: Option<Vec<Value>>,
}

/// 识别结果（轮询接口与已保存结果详情共用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPayload {
    #[serde(default)]
    pub status: ResultStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_engine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text_pages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_result: Option<Vec<ParsedItem>>,
    /// 后端附带的其他字段（filename、doc_type、error 等），原样保留
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultPayload {
    pub fn with_status(status: ResultStatus) -> Self {
        Self {
            status,
            ocr_engine: None,
            raw_text_pages: None,
            parsed_result: None,
            extra: Map::new(),
        }
    }
}

/// 列表接口的统一外层结构 `{ files: [...] }`
#[derive(Debug, Clone, Deserialize)]
pub struct FileList<T> {
    #[serde(default = "Vec::new")]
    pub files: Vec<T>,
}

/// 上传接口响应
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub id: String,
}

// 题号既可能是整数也可能是字符串
fn deserialize_q_no<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct QuestionNoVisitor;

    impl<'de> Visitor<'de> for QuestionNoVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer question number")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(QuestionNoVisitor)
}
