//! 结果渲染投影 - 业务能力层
//!
//! 把后端数据转换成视图直接展示的结构，不涉及任何输出

use serde::Serialize;

use crate::models::{DocumentEntry, ResultPayload, ResultStatus, SavedResultSummary};

/// 原始文本分页分隔符
pub const PAGE_BREAK: &str = "\n\n--- Page Break ---\n\n";

pub const NO_RAW_TEXT: &str = "No raw text available.";
pub const NO_TEXT_DETECTED: &str = "No text detected";
pub const NO_STRUCTURED_DATA: &str = "No structured data extracted. Check Raw JSON.";

/// 状态徽标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusBadge {
    Completed,
    Failed,
}

impl StatusBadge {
    /// 只有 failed 显示失败，其余一律显示完成
    pub fn for_status(status: ResultStatus) -> Self {
        if status == ResultStatus::Failed {
            StatusBadge::Failed
        } else {
            StatusBadge::Completed
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusBadge::Completed => "Completed",
            StatusBadge::Failed => "Failed",
        }
    }
}

/// 单道题的展示
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedItemView {
    /// 例如 `Q1`
    pub label: String,
    pub text: String,
    /// 有子题时为 `Sub-parts detected: n`
    pub subparts_note: Option<String>,
}

/// 识别结果详情的展示
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultView {
    pub badge: StatusBadge,
    pub json: String,
    pub raw_text: String,
    pub items: Vec<ParsedItemView>,
    /// 没有结构化结果时的提示
    pub empty_notice: Option<String>,
}

/// 列表中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    pub id: String,
    pub label: String,
    pub meta: Option<String>,
    pub url: String,
    pub active: bool,
}

/// 仪表盘统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub processing: usize,
}

/// 渲染识别结果
pub fn render_result(payload: &ResultPayload) -> ResultView {
    let json = serde_json::to_string_pretty(payload).unwrap_or_else(|_| "{}".to_string());

    let raw_text = match payload.raw_text_pages.as_deref() {
        Some(pages) if !pages.is_empty() => pages.join(PAGE_BREAK),
        _ => NO_RAW_TEXT.to_string(),
    };

    let items: Vec<ParsedItemView> = payload
        .parsed_result
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|item| ParsedItemView {
            label: format!("Q{}", item.q_no),
            text: item
                .text
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| NO_TEXT_DETECTED.to_string()),
            subparts_note: item
                .subparts
                .as_ref()
                .filter(|s| !s.is_empty())
                .map(|s| format!("Sub-parts detected: {}", s.len())),
        })
        .collect();

    let empty_notice = items.is_empty().then(|| NO_STRUCTURED_DATA.to_string());

    ResultView {
        badge: StatusBadge::for_status(payload.status),
        json,
        raw_text,
        items,
        empty_notice,
    }
}

/// 试卷 / 答题卡列表行
pub fn document_rows(items: &[DocumentEntry], flags: &[bool]) -> Vec<ListRow> {
    items
        .iter()
        .zip(flags.iter().copied().chain(std::iter::repeat(false)))
        .map(|(entry, active)| ListRow {
            id: entry.name.clone(),
            label: entry.name.clone(),
            meta: None,
            url: entry.url.clone(),
            active,
        })
        .collect()
}

/// 已保存结果列表行
pub fn saved_result_rows(items: &[SavedResultSummary], flags: &[bool]) -> Vec<ListRow> {
    items
        .iter()
        .zip(flags.iter().copied().chain(std::iter::repeat(false)))
        .map(|(summary, active)| ListRow {
            id: summary.id.clone(),
            label: summary.name.clone(),
            meta: Some(saved_result_meta(summary)),
            url: summary
                .url
                .clone()
                .unwrap_or_else(|| summary.detail_endpoint()),
            active,
        })
        .collect()
}

/// `doc_type • status • 时间`，时间无法解析时显示原始字符串
pub fn saved_result_meta(summary: &SavedResultSummary) -> String {
    let time_label = summary
        .parsed_timestamp()
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| summary.timestamp.clone());

    format!(
        "{} • {} • {}",
        summary.doc_type,
        summary.status.as_str(),
        time_label
    )
}

/// 仪表盘统计（基于去重前的原始列表）
pub fn dashboard_stats(files: &[SavedResultSummary]) -> DashboardStats {
    let count = |status: ResultStatus| files.iter().filter(|f| f.status == status).count();
    DashboardStats {
        total: files.len(),
        completed: count(ResultStatus::Completed),
        failed: count(ResultStatus::Failed),
        processing: count(ResultStatus::Processing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::mock::summary;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> ResultPayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_completed_with_one_item() {
        let view = render_result(&payload(json!({
            "status": "completed",
            "parsed_result": [{ "q_no": 1, "text": "A" }]
        })));

        assert_eq!(view.badge.label(), "Completed");
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].label, "Q1");
        assert_eq!(view.items[0].text, "A");
        assert_eq!(view.items[0].subparts_note, None);
        assert_eq!(view.raw_text, NO_RAW_TEXT);
        assert_eq!(view.empty_notice, None);
    }

    #[test]
    fn test_pages_joined_with_page_break() {
        let view = render_result(&payload(json!({
            "status": "completed",
            "raw_text_pages": ["page one", "page two"]
        })));

        assert_eq!(view.raw_text, "page one\n\n--- Page Break ---\n\npage two");
        assert_eq!(view.empty_notice.as_deref(), Some(NO_STRUCTURED_DATA));
    }

    #[test]
    fn test_failed_badge_and_missing_text() {
        let view = render_result(&payload(json!({
            "status": "failed",
            "error": "tesseract not found",
            "parsed_result": [{ "q_no": "6", "subparts": [{}, {}] }]
        })));

        assert_eq!(view.badge, StatusBadge::Failed);
        assert_eq!(view.items[0].text, NO_TEXT_DETECTED);
        assert_eq!(view.items[0].subparts_note.as_deref(), Some("Sub-parts detected: 2"));
        assert!(view.json.contains("tesseract not found"));
    }

    #[test]
    fn test_non_failed_status_shows_completed() {
        let view = render_result(&ResultPayload::with_status(ResultStatus::Unknown));
        assert_eq!(view.badge, StatusBadge::Completed);
    }

    #[test]
    fn test_meta_falls_back_to_raw_timestamp() {
        let s = summary("r.json", "sometime");
        assert_eq!(saved_result_meta(&s), "question_paper • completed • sometime");
    }

    #[test]
    fn test_dashboard_counts_raw_list() {
        let mut failed = summary("b", "2024-01-01");
        failed.status = ResultStatus::Failed;
        let files = vec![summary("a", "2024-01-01"), summary("a", "2024-01-02"), failed];

        let stats = dashboard_stats(&files);
        assert_eq!(
            stats,
            DashboardStats {
                total: 3,
                completed: 2,
                failed: 1,
                processing: 0
            }
        );
    }

    #[test]
    fn test_rows_carry_active_flag() {
        let items = vec![summary("x", "2024-01-01"), summary("y", "2024-01-01")];
        let rows = saved_result_rows(&items, &[false, true]);
        assert!(!rows[0].active);
        assert!(rows[1].active);
        assert_eq!(rows[0].url, "/api/saved-results/x");
    }
}
