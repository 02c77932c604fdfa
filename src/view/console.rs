//! 终端视图

use tracing::{debug, warn};

use super::ReviewView;
use crate::models::{Category, DocumentEntry, Section};
use crate::services::result_renderer::{DashboardStats, ListRow, ResultView};
use crate::utils::logging::truncate_text;

/// 把视图输出到标准输出
///
/// `show_json` 打开时详情附带完整 JSON
pub struct ConsoleView {
    show_json: bool,
    raw_text_preview: usize,
}

impl ConsoleView {
    pub fn new(show_json: bool) -> Self {
        Self {
            show_json,
            raw_text_preview: 2000,
        }
    }
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ReviewView for ConsoleView {
    fn show_list(&mut self, category: Category, rows: &[ListRow]) {
        println!("\n{} ({})", category, rows.len());
        println!("{}", "─".repeat(60));
        for row in rows {
            let marker = if row.active { "▶" } else { " " };
            match &row.meta {
                Some(meta) => println!("{} {}  [{}]\n    {}", marker, row.label, row.id, meta),
                None => println!("{} {}  {}", marker, row.label, row.url),
            }
        }
    }

    fn show_empty(&mut self, category: Category) {
        println!("\nNo {} found.", category);
    }

    fn show_list_error(&mut self, _category: Category, message: &str) {
        println!("\n{}", message);
    }

    fn highlight(&mut self, category: Category, id: &str) {
        debug!("选中 {}: {}", category, id);
    }

    fn show_document(&mut self, _category: Category, entry: &DocumentEntry) {
        println!("\nPreview of {}: {}", entry.name, entry.url);
    }

    fn show_detail(&mut self, view: &ResultView) {
        println!("\n{}", "=".repeat(60));
        println!("Status: {}", view.badge.label());
        println!("{}", "=".repeat(60));

        for item in &view.items {
            println!("{}  {}", item.label, item.text);
            if let Some(note) = &item.subparts_note {
                println!("    {}", note);
            }
        }
        if let Some(notice) = &view.empty_notice {
            println!("{}", notice);
        }

        println!("\n--- Raw Text ---");
        println!("{}", truncate_text(&view.raw_text, self.raw_text_preview));

        if self.show_json {
            println!("\n--- Raw JSON ---");
            println!("{}", view.json);
        }
    }

    fn show_progress(&mut self, message: &str) {
        println!("{}", message);
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            println!("Uploading...");
        }
    }

    fn alert(&mut self, message: &str) {
        warn!("⚠️ {}", message);
        eprintln!("{}", message);
    }

    fn activate_section(&mut self, section: Section) {
        debug!("切换到分区: {:?}", section);
    }

    fn reveal_saved_results(&mut self) {}

    fn update_dashboard(&mut self, stats: &DashboardStats) {
        if stats.total == 0 {
            println!("No active scans");
            return;
        }
        println!("Total Results: {}", stats.total);
        println!("✓ Completed: {}", stats.completed);
        if stats.failed > 0 {
            println!("✗ Failed: {}", stats.failed);
        }
        if stats.processing > 0 {
            println!("⊙ Processing: {}", stats.processing);
        }
    }
}
