//! 选中状态 - 业务能力层
//!
//! 每个分类最多一个选中条目，且必须是当前列表中的条目

use crate::models::Identified;
use crate::services::list_cache::CacheState;

impl<T: Identified> CacheState<T> {
    /// 设置选中条目
    ///
    /// 标识不在当前列表中时返回 None，选中状态不变
    pub fn set_active(&mut self, id: &str) -> Option<&T> {
        let index = self.items.iter().position(|i| i.identity() == id)?;
        self.active_id = Some(id.to_string());
        self.items.get(index)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active_item(&self) -> Option<&T> {
        let id = self.active_id.as_deref()?;
        self.items.iter().find(|i| i.identity() == id)
    }

    /// 每个条目的高亮标记，顺序与 `items()` 一致
    pub fn highlight_flags(&self) -> Vec<bool> {
        self.items
            .iter()
            .map(|i| Some(i.identity()) == self.active_id.as_deref())
            .collect()
    }
}
