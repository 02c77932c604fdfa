//! 测试用的后端 mock

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::BoxFuture;

use super::{ReviewApi, UploadRequest};
use crate::error::{AppError, AppResult};
use crate::models::{Category, DocumentEntry, ResultPayload, ResultStatus, SavedResultSummary};

/// 手写的 [`ReviewApi`] mock
///
/// - 列表响应固定，可随时替换
/// - 轮询响应按顺序弹出，最后一个重复
/// - 每个接口单独计数
#[derive(Default)]
pub struct MockApi {
    pub question_papers: Mutex<Option<Vec<DocumentEntry>>>,
    pub answer_sheets: Mutex<Option<Vec<DocumentEntry>>>,
    pub saved_results: Mutex<Option<Vec<SavedResultSummary>>>,
    pub details: Mutex<Vec<(String, ResultPayload)>>,
    pub poll_sequence: Mutex<VecDeque<AppResult<ResultPayload>>>,
    pub upload_id: Mutex<Option<String>>,

    pub list_calls: Mutex<Vec<Category>>,
    pub detail_calls: AtomicUsize,
    pub upload_calls: AtomicUsize,
    pub poll_calls: AtomicUsize,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_question_papers(self, names: &[&str]) -> Self {
        *self.question_papers.lock().unwrap() = Some(entries(names));
        self
    }

    pub fn with_answer_sheets(self, names: &[&str]) -> Self {
        *self.answer_sheets.lock().unwrap() = Some(entries(names));
        self
    }

    pub fn with_saved_results(self, results: Vec<SavedResultSummary>) -> Self {
        *self.saved_results.lock().unwrap() = Some(results);
        self
    }

    pub fn with_detail(self, id: &str, payload: ResultPayload) -> Self {
        self.details.lock().unwrap().push((id.to_string(), payload));
        self
    }

    pub fn with_upload_id(self, id: &str) -> Self {
        *self.upload_id.lock().unwrap() = Some(id.to_string());
        self
    }

    pub fn with_poll_statuses(self, statuses: &[ResultStatus]) -> Self {
        {
            let mut seq = self.poll_sequence.lock().unwrap();
            for status in statuses {
                seq.push_back(Ok(ResultPayload::with_status(*status)));
            }
        }
        self
    }

    pub fn push_poll(&self, response: AppResult<ResultPayload>) {
        self.poll_sequence.lock().unwrap().push_back(response);
    }

    pub fn list_call_count(&self, category: Category) -> usize {
        self.list_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == category)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.list_calls.lock().unwrap().len()
            + self.detail_calls.load(Ordering::SeqCst)
            + self.upload_calls.load(Ordering::SeqCst)
            + self.poll_calls.load(Ordering::SeqCst)
    }
}

pub fn entries(names: &[&str]) -> Vec<DocumentEntry> {
    names
        .iter()
        .map(|n| DocumentEntry {
            name: n.to_string(),
            url: format!("/pdfs/{}", n),
        })
        .collect()
}

pub fn summary(id: &str, timestamp: &str) -> SavedResultSummary {
    SavedResultSummary {
        id: id.to_string(),
        name: id.trim_end_matches(".json").to_string(),
        status: ResultStatus::Completed,
        doc_type: "question_paper".to_string(),
        timestamp: timestamp.to_string(),
        url: None,
    }
}

fn unavailable(endpoint: &str) -> AppError {
    AppError::network(endpoint, "HTTP 500 Internal Server Error")
}

impl ReviewApi for MockApi {
    fn list_documents(&self, category: Category) -> BoxFuture<'_, AppResult<Vec<DocumentEntry>>> {
        self.list_calls.lock().unwrap().push(category);
        let stored = match category {
            Category::QuestionPapers => self.question_papers.lock().unwrap().clone(),
            Category::AnswerSheets => self.answer_sheets.lock().unwrap().clone(),
            Category::SavedResults => None,
        };
        Box::pin(async move { stored.ok_or_else(|| unavailable(category.list_endpoint())) })
    }

    fn list_saved_results(&self) -> BoxFuture<'_, AppResult<Vec<SavedResultSummary>>> {
        self.list_calls.lock().unwrap().push(Category::SavedResults);
        let stored = self.saved_results.lock().unwrap().clone();
        Box::pin(async move {
            stored.ok_or_else(|| unavailable(Category::SavedResults.list_endpoint()))
        })
    }

    fn fetch_saved_result<'a>(&'a self, id: &'a str) -> BoxFuture<'a, AppResult<ResultPayload>> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let found = self
            .details
            .lock()
            .unwrap()
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, payload)| payload.clone());
        Box::pin(async move {
            found.ok_or_else(|| AppError::network(format!("/api/saved-results/{}", id), "HTTP 404"))
        })
    }

    fn upload(&self, _request: UploadRequest) -> BoxFuture<'_, AppResult<String>> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        let id = self.upload_id.lock().unwrap().clone();
        Box::pin(async move { id.ok_or_else(|| AppError::network("/api/upload", "HTTP 500")) })
    }

    fn fetch_result<'a>(&'a self, id: &'a str) -> BoxFuture<'a, AppResult<ResultPayload>> {
        self.poll_calls.fetch_add(1, Ordering::SeqCst);
        let next = {
            let mut seq = self.poll_sequence.lock().unwrap();
            if seq.len() > 1 {
                seq.pop_front()
            } else {
                // 最后一个响应重复返回
                seq.front().map(|r| match r {
                    Ok(payload) => Ok(payload.clone()),
                    Err(e) => Err(AppError::network(format!("/api/results/{}", id), e.to_string())),
                })
            }
        };
        Box::pin(async move {
            next.unwrap_or_else(|| Err(AppError::network(format!("/api/results/{}", id), "HTTP 404")))
        })
    }

    fn check_connection(&self) -> BoxFuture<'_, bool> {
        let reachable = self.question_papers.lock().unwrap().is_some();
        Box::pin(async move { reachable })
    }
}
