//! 记录所有调用的测试视图

use super::ReviewView;
use crate::models::{Category, DocumentEntry, Section};
use crate::services::result_renderer::{DashboardStats, ListRow, ResultView};

#[derive(Debug, Default)]
pub struct RecordingView {
    pub lists: Vec<(Category, Vec<ListRow>)>,
    pub empties: Vec<Category>,
    pub list_errors: Vec<(Category, String)>,
    pub highlights: Vec<(Category, String)>,
    pub documents: Vec<(Category, DocumentEntry)>,
    pub details: Vec<ResultView>,
    pub progress: Vec<String>,
    pub loading: Vec<bool>,
    pub alerts: Vec<String>,
    pub sections: Vec<Section>,
    pub saved_results_revealed: usize,
    pub dashboards: Vec<DashboardStats>,
}

impl ReviewView for RecordingView {
    fn show_list(&mut self, category: Category, rows: &[ListRow]) {
        self.lists.push((category, rows.to_vec()));
    }

    fn show_empty(&mut self, category: Category) {
        self.empties.push(category);
    }

    fn show_list_error(&mut self, category: Category, message: &str) {
        self.list_errors.push((category, message.to_string()));
    }

    fn highlight(&mut self, category: Category, id: &str) {
        self.highlights.push((category, id.to_string()));
    }

    fn show_document(&mut self, category: Category, entry: &DocumentEntry) {
        self.documents.push((category, entry.clone()));
    }

    fn show_detail(&mut self, view: &ResultView) {
        self.details.push(view.clone());
    }

    fn show_progress(&mut self, message: &str) {
        self.progress.push(message.to_string());
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading.push(loading);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn activate_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    fn reveal_saved_results(&mut self) {
        self.saved_results_revealed += 1;
    }

    fn update_dashboard(&mut self, stats: &DashboardStats) {
        self.dashboards.push(*stats);
    }
}
