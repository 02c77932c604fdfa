//! 阅卷控制器
//!
//! 持有三个分类的缓存、节流闸门和上传流程，把导航 / 选择 / 上传事件
//! 转换成请求和视图更新。所有请求失败都在这里被消化，不再向上抛。

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::clients::ReviewApi;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{Category, DocumentEntry, ResultPayload, SavedResultSummary, Section};
use crate::services::result_renderer::{
    dashboard_stats, document_rows, render_result, saved_result_rows, DashboardStats,
};
use crate::services::{initial_selection, order_saved_results, CacheState, Poller, ThrottleGate};
use crate::view::ReviewView;
use crate::workflow::{Submission, UploadFlow};

pub const DETAIL_ALERT: &str = "Unable to load result. Please try again.";

/// 一次列表加载的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// 已加载，直接使用缓存
    Cached,
    /// 被节流，未请求
    Throttled,
    /// 请求成功但列表为空
    Empty,
    /// 请求成功，条目数
    Loaded(usize),
    /// 请求失败，已在视图中提示
    Failed,
    /// 返回时已有更新的加载开始，结果被丢弃
    ///
    /// 控制器方法都持有 `&mut self`，同一个控制器上的加载不会重叠，
    /// 所以经由控制器不会出现；票据本身由 `CacheState` 的单元测试覆盖
    Stale,
}

/// 列表加载失败时显示的提示
pub fn list_error_message(category: Category) -> String {
    format!("Unable to load {}. Please try again later.", category)
}

/// 阅卷控制器
pub struct ReviewController<V: ReviewView> {
    api: Arc<dyn ReviewApi>,
    view: V,
    question_papers: CacheState<DocumentEntry>,
    answer_sheets: CacheState<DocumentEntry>,
    saved_results: CacheState<SavedResultSummary>,
    throttle: ThrottleGate,
    upload_flow: UploadFlow,
    default_question_paper: String,
}

impl<V: ReviewView> ReviewController<V> {
    pub fn new(config: &Config, api: Arc<dyn ReviewApi>, view: V) -> Self {
        let poller = Poller::new(api.clone(), Duration::from_millis(config.poll_interval_ms));
        Self {
            upload_flow: UploadFlow::new(api.clone(), poller),
            api,
            view,
            question_papers: CacheState::new(),
            answer_sheets: CacheState::new(),
            saved_results: CacheState::new(),
            throttle: ThrottleGate::from_millis(config.saved_results_throttle_ms),
            default_question_paper: config.default_question_paper.clone(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// 试卷 / 答题卡缓存；已保存结果返回 `None`
    pub fn documents(&self, category: Category) -> Option<&CacheState<DocumentEntry>> {
        match category {
            Category::QuestionPapers => Some(&self.question_papers),
            Category::AnswerSheets => Some(&self.answer_sheets),
            Category::SavedResults => None,
        }
    }

    pub fn saved_results(&self) -> &CacheState<SavedResultSummary> {
        &self.saved_results
    }

    /// 后端连通性检查
    pub async fn check_backend(&self) -> bool {
        let connected = self.api.check_connection().await;
        if connected {
            info!("✓ 后端连接成功");
        } else {
            warn!("⚠️ Backend unreachable. Some features may not work.");
        }
        connected
    }

    /// 启动时的初始加载：显示仪表盘并加载三个列表
    pub async fn initialize(&mut self) {
        self.view.activate_section(Section::Dashboard);
        for category in Category::ALL {
            self.load(category, false).await;
        }
    }

    /// 切换分区，并加载该分区对应的列表
    pub async fn navigate(&mut self, section: Section) -> Option<LoadOutcome> {
        self.view.activate_section(section);
        match section.category() {
            Some(category) => Some(self.load(category, false).await),
            None => None,
        }
    }

    /// 加载某个分类的列表
    pub async fn load(&mut self, category: Category, force_reload: bool) -> LoadOutcome {
        match category {
            Category::SavedResults => self.load_saved_results(force_reload).await,
            _ => self.load_documents(category, force_reload).await,
        }
    }

    /// 作废某个分类的缓存
    pub fn invalidate(&mut self, category: Category) {
        match category {
            Category::SavedResults => self.saved_results.invalidate(),
            _ => self.documents_mut(category).invalidate(),
        }
    }

    /// 选中条目
    ///
    /// 试卷 / 答题卡只显示预览地址；已保存结果会先拉取详情
    pub async fn set_active(&mut self, category: Category, id: &str) -> AppResult<()> {
        match category {
            Category::SavedResults => self.fetch_detail(id).await.map(|_| ()),
            _ => self.select_document(category, id),
        }
    }

    /// 拉取并显示已保存结果详情
    ///
    /// 失败时提示用户，之前显示的详情保持不变
    pub async fn fetch_detail(&mut self, id: &str) -> AppResult<ResultPayload> {
        match self.api.fetch_saved_result(id).await {
            Ok(payload) => {
                if self.saved_results.set_active(id).is_some() {
                    self.view.highlight(Category::SavedResults, id);
                }
                self.view.set_loading(false);
                self.view.show_detail(&render_result(&payload));
                Ok(payload)
            }
            Err(e) => {
                error!("❌ 加载已保存结果 {} 失败: {}", id, e);
                self.view.alert(DETAIL_ALERT);
                Err(e)
            }
        }
    }

    /// 上传文档并等待识别结果
    ///
    /// 终态后：显示结果、切换到结果分区、强制刷新已保存结果、显示已保存结果区域
    pub async fn submit(&mut self, submission: Submission) -> AppResult<ResultPayload> {
        let payload = self.upload_flow.run(&mut self.view, submission).await?;

        self.view.set_loading(false);
        self.view.show_detail(&render_result(&payload));
        self.view.activate_section(Section::Results);
        self.load(Category::SavedResults, true).await;
        self.view.reveal_saved_results();

        Ok(payload)
    }

    // ========== 列表加载 ==========

    async fn load_documents(&mut self, category: Category, force_reload: bool) -> LoadOutcome {
        let default_question_paper = self.default_question_paper.clone();
        let state = self.documents_mut(category);
        if !state.needs_fetch(force_reload) {
            debug!("{} 已缓存，跳过请求", category);
            return LoadOutcome::Cached;
        }
        let ticket = state.begin_load();

        let result = self.api.list_documents(category).await;

        let state = self.documents_mut(category);
        if !state.is_current(ticket) {
            debug!("{} 的旧响应已丢弃", category);
            return LoadOutcome::Stale;
        }

        let items = match result {
            Ok(items) => items,
            Err(e) => {
                log_load_failure(category, &e);
                self.view
                    .show_list_error(category, &list_error_message(category));
                return LoadOutcome::Failed;
            }
        };

        state.finish_load(ticket, items);
        let count = state.items().len();
        if count == 0 {
            self.view.show_empty(category);
            return LoadOutcome::Empty;
        }
        info!("✓ 加载 {} {} 个", category, count);

        let initial = initial_selection(category, state.items(), &default_question_paper);
        if let Some(id) = &initial {
            state.set_active(id);
        }

        let rows = document_rows(state.items(), &state.highlight_flags());
        self.view.show_list(category, &rows);

        if let Some(id) = initial {
            if let Err(e) = self.select_document(category, &id) {
                warn!("初始选中失败: {}", e);
            }
        }

        LoadOutcome::Loaded(count)
    }

    async fn load_saved_results(&mut self, force_reload: bool) -> LoadOutcome {
        let category = Category::SavedResults;

        if !self.throttle.allow(Instant::now(), force_reload) {
            debug!("{} 刷新被节流", category);
            return LoadOutcome::Throttled;
        }
        if !self.saved_results.needs_fetch(force_reload) {
            debug!("{} 已缓存，跳过请求", category);
            return LoadOutcome::Cached;
        }
        let ticket = self.saved_results.begin_load();

        let result = self.api.list_saved_results().await;

        if !self.saved_results.is_current(ticket) {
            debug!("{} 的旧响应已丢弃", category);
            return LoadOutcome::Stale;
        }

        let files = match result {
            Ok(files) => files,
            Err(e) => {
                log_load_failure(category, &e);
                self.view
                    .show_list_error(category, &list_error_message(category));
                return LoadOutcome::Failed;
            }
        };

        if files.is_empty() {
            self.saved_results.finish_load(ticket, Vec::new());
            self.view.show_empty(category);
            self.view.update_dashboard(&DashboardStats::default());
            return LoadOutcome::Empty;
        }

        let stats = dashboard_stats(&files);
        self.saved_results
            .finish_load(ticket, order_saved_results(files));
        let count = self.saved_results.items().len();
        info!("✓ 加载 {} {} 个", category, count);

        let rows = saved_result_rows(self.saved_results.items(), &self.saved_results.highlight_flags());
        self.view.show_list(category, &rows);

        let initial = initial_selection(category, self.saved_results.items(), &self.default_question_paper);
        if let Some(id) = initial {
            // 失败已在 fetch_detail 中提示
            let _ = self.fetch_detail(&id).await;
        }

        self.view.reveal_saved_results();
        self.view.update_dashboard(&stats);

        LoadOutcome::Loaded(count)
    }

    // ========== 选中 ==========

    fn select_document(&mut self, category: Category, id: &str) -> AppResult<()> {
        let entry = self
            .documents_mut(category)
            .set_active(id)
            .cloned()
            .ok_or_else(|| AppError::Precondition(format!("{} 中没有 {}", category, id)))?;

        self.view.highlight(category, id);
        self.view.show_document(category, &entry);
        Ok(())
    }

    // 只在 load_documents / select_document 中调用，已保存结果不会走到这里
    fn documents_mut(&mut self, category: Category) -> &mut CacheState<DocumentEntry> {
        match category {
            Category::AnswerSheets => &mut self.answer_sheets,
            _ => &mut self.question_papers,
        }
    }
}

fn log_load_failure(category: Category, e: &AppError) {
    if e.is_request_failure() {
        error!("❌ 加载 {} 失败（请求失败）: {}", category, e);
    } else {
        error!("❌ 加载 {} 失败: {}", category, e);
    }
}
