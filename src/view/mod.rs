//! 视图层
//!
//! 控制器只通过 [`ReviewView`] 输出，具体怎么显示由实现决定

pub mod console;
#[cfg(test)]
pub mod recording;

pub use console::ConsoleView;

use crate::models::{Category, DocumentEntry, Section};
use crate::services::result_renderer::{DashboardStats, ListRow, ResultView};

/// 渲染协作者
pub trait ReviewView {
    /// 显示列表
    fn show_list(&mut self, category: Category, rows: &[ListRow]);

    /// 列表为空
    fn show_empty(&mut self, category: Category);

    /// 列表加载失败（替代列表显示）
    fn show_list_error(&mut self, category: Category, message: &str);

    /// 高亮选中条目，其余条目取消高亮
    fn highlight(&mut self, category: Category, id: &str);

    /// 预览试卷 / 答题卡
    fn show_document(&mut self, category: Category, entry: &DocumentEntry);

    /// 显示识别结果详情
    fn show_detail(&mut self, view: &ResultView);

    /// 处理中 / 排队中的提示
    fn show_progress(&mut self, message: &str);

    fn set_loading(&mut self, loading: bool);

    /// 阻塞式提示
    fn alert(&mut self, message: &str);

    fn activate_section(&mut self, section: Section);

    /// 显示已保存结果区域
    fn reveal_saved_results(&mut self);

    fn update_dashboard(&mut self, stats: &DashboardStats);
}
