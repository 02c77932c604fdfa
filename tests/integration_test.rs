use std::sync::Arc;

use exam_review::models::{Category, DocumentEntry, Section};
use exam_review::orchestrator::LoadOutcome;
use exam_review::services::result_renderer::{DashboardStats, ListRow, ResultView};
use exam_review::utils::logging;
use exam_review::{Config, HttpApiClient, ReviewController, ReviewView};

/// 只记录列表和错误的视图
#[derive(Default)]
struct CollectingView {
    lists: Vec<(Category, usize)>,
    errors: Vec<String>,
    details: usize,
}

impl ReviewView for CollectingView {
    fn show_list(&mut self, category: Category, rows: &[ListRow]) {
        self.lists.push((category, rows.len()));
    }
    fn show_empty(&mut self, category: Category) {
        self.lists.push((category, 0));
    }
    fn show_list_error(&mut self, _category: Category, message: &str) {
        self.errors.push(message.to_string());
    }
    fn highlight(&mut self, _category: Category, _id: &str) {}
    fn show_document(&mut self, _category: Category, _entry: &DocumentEntry) {}
    fn show_detail(&mut self, _view: &ResultView) {
        self.details += 1;
    }
    fn show_progress(&mut self, _message: &str) {}
    fn set_loading(&mut self, _loading: bool) {}
    fn alert(&mut self, _message: &str) {}
    fn activate_section(&mut self, _section: Section) {}
    fn reveal_saved_results(&mut self) {}
    fn update_dashboard(&mut self, _stats: &DashboardStats) {}
}

fn controller(config: &Config) -> ReviewController<CollectingView> {
    let api = HttpApiClient::new(config).expect("创建客户端失败");
    ReviewController::new(config, Arc::new(api), CollectingView::default())
}

#[tokio::test]
async fn test_unreachable_backend_reports_list_error() {
    let config = Config {
        api_base_url: "http://127.0.0.1:1".to_string(),
        request_timeout_secs: 2,
        ..Config::default()
    };
    let mut ctl = controller(&config);

    assert!(!ctl.check_backend().await);
    assert_eq!(
        ctl.load(Category::QuestionPapers, false).await,
        LoadOutcome::Failed
    );
    assert!(!ctl.documents(Category::QuestionPapers).unwrap().is_loaded());
    assert_eq!(
        ctl.view().errors,
        vec!["Unable to load question papers. Please try again later.".to_string()]
    );
}

#[tokio::test]
#[ignore] // 默认忽略，需要后端运行：cargo test -- --ignored
async fn test_live_backend_lists() {
    logging::init(true);

    let config = Config::from_env().expect("配置无效");
    let mut ctl = controller(&config);

    assert!(ctl.check_backend().await, "后端不可达: {}", config.api_base_url);

    ctl.initialize().await;

    let view = ctl.view();
    assert!(view.errors.is_empty(), "加载失败: {:?}", view.errors);
    for category in Category::ALL {
        assert!(view.lists.iter().any(|(c, _)| *c == category));
    }
}

#[tokio::test]
#[ignore] // 默认忽略，需要后端运行：cargo test -- --ignored
async fn test_live_saved_results_cached() {
    logging::init(true);

    let config = Config::from_env().expect("配置无效");
    let mut ctl = controller(&config);

    let first = ctl.load(Category::SavedResults, false).await;
    assert!(matches!(first, LoadOutcome::Loaded(_) | LoadOutcome::Empty));

    // 窗口内的第二次加载不会请求
    assert_eq!(
        ctl.load(Category::SavedResults, false).await,
        LoadOutcome::Throttled
    );
}

#[test]
fn test_config_file_layers_over_defaults() {
    let path = std::env::temp_dir().join(format!("exam-review-config-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        "saved_results_throttle_ms = 1000\ndefault_question_paper = \"math_2.pdf\"\n",
    )
    .unwrap();

    let config = Config::from_file(&path);
    let _ = std::fs::remove_file(&path);
    let config = config.unwrap();

    assert_eq!(config.saved_results_throttle_ms, 1000);
    assert_eq!(config.default_question_paper, "math_2.pdf");
    assert_eq!(config.poll_interval_ms, 2000);
}

#[test]
fn test_missing_config_file_is_error() {
    let result = Config::load(Some(std::path::Path::new("/nonexistent/exam-review.toml")));
    assert!(result.is_err());
}
