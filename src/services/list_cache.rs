//! 列表缓存 - 业务能力层
//!
//! 每个分类一份 `CacheState`，由控制器独占持有。
//! 只负责缓存状态本身，不发请求、不渲染。

use std::collections::HashSet;

use crate::models::{Category, Identified, SavedResultSummary};

/// 单个分类的缓存状态
#[derive(Debug, Clone)]
pub struct CacheState<T> {
    pub(crate) loaded: bool,
    pub(crate) items: Vec<T>,
    pub(crate) active_id: Option<String>,
    generation: u64,
}

/// 一次列表加载的凭证
///
/// 完成加载时携带回来；如果期间又开始了新的加载，旧凭证的结果会被丢弃
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl<T> Default for CacheState<T> {
    fn default() -> Self {
        Self {
            loaded: false,
            items: Vec::new(),
            active_id: None,
            generation: 0,
        }
    }
}

impl<T: Identified> CacheState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// 已加载且非强制刷新时直接使用缓存
    pub fn needs_fetch(&self, force_reload: bool) -> bool {
        !self.loaded || force_reload
    }

    /// 开始一次加载：清空条目、取消选中、作废之前的凭证
    pub fn begin_load(&mut self) -> LoadTicket {
        self.items.clear();
        self.active_id = None;
        self.loaded = false;
        self.generation += 1;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// 凭证是否仍是最新一次加载
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// 加载成功，写入条目
    ///
    /// 凭证已过期时返回 false，状态不变
    pub fn finish_load(&mut self, ticket: LoadTicket, items: Vec<T>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.items = items;
        self.loaded = true;
        true
    }

    /// 使缓存失效，下次加载会重新请求
    pub fn invalidate(&mut self) {
        self.loaded = false;
    }
}

/// 已保存结果排序去重
///
/// 按时间戳降序（稳定排序，无法解析的排在最后），然后按 id 去重，保留排序后的第一次出现
pub fn order_saved_results(files: Vec<SavedResultSummary>) -> Vec<SavedResultSummary> {
    let mut keyed: Vec<_> = files
        .into_iter()
        .map(|f| (f.parsed_timestamp(), f))
        .collect();
    // Option 中 None 最小，降序后自然排在最后
    keyed.sort_by(|a, b| b.0.cmp(&a.0));

    let mut seen = HashSet::new();
    keyed
        .into_iter()
        .map(|(_, f)| f)
        .filter(|f| seen.insert(f.id.clone()))
        .collect()
}

/// 初始选中条目
///
/// 试卷优先选择与默认文件名（大小写不敏感）相同的条目，其余分类选第一个
pub fn initial_selection<T: Identified>(
    category: Category,
    items: &[T],
    default_question_paper: &str,
) -> Option<String> {
    if category == Category::QuestionPapers {
        let preferred = default_question_paper.to_lowercase();
        if let Some(item) = items
            .iter()
            .find(|i| i.identity().to_lowercase() == preferred)
        {
            return Some(item.identity().to_string());
        }
    }
    items.first().map(|i| i.identity().to_string())
}
