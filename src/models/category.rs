use std::fmt;

use serde::{Deserialize, Serialize};

/// 列表分类：每个分类独立缓存
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    QuestionPapers,
    AnswerSheets,
    SavedResults,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::QuestionPapers,
        Category::AnswerSheets,
        Category::SavedResults,
    ];

    /// 列表接口路径
    pub fn list_endpoint(&self) -> &'static str {
        match self {
            Category::QuestionPapers => "/api/question-papers",
            Category::AnswerSheets => "/api/answer-sheets",
            Category::SavedResults => "/api/saved-results",
        }
    }

    /// 面向用户的名称
    pub fn label(&self) -> &'static str {
        match self {
            Category::QuestionPapers => "question papers",
            Category::AnswerSheets => "answer sheets",
            Category::SavedResults => "saved results",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 界面分区
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    QuestionPapers,
    AnswerSheets,
    Results,
}

impl Section {
    /// 进入该分区时需要加载的列表
    pub fn category(&self) -> Option<Category> {
        match self {
            Section::QuestionPapers => Some(Category::QuestionPapers),
            Section::AnswerSheets => Some(Category::AnswerSheets),
            Section::Dashboard | Section::Results => None,
        }
    }
}

/// 上传文档类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    QuestionPaper,
    AnswerSheet,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::QuestionPaper => "question_paper",
            DocType::AnswerSheet => "answer_sheet",
        }
    }
}

/// 后端支持的 OCR 引擎
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OcrEngine {
    Gemini,
    Tesseract,
    Paddle,
    Qwen,
    Surya,
}

impl OcrEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            OcrEngine::Gemini => "gemini",
            OcrEngine::Tesseract => "tesseract",
            OcrEngine::Paddle => "paddle",
            OcrEngine::Qwen => "qwen",
            OcrEngine::Surya => "surya",
        }
    }
}
