pub mod category;
pub mod document;

pub use category::{Category, DocType, OcrEngine, Section};
pub use document::{
    parse_timestamp, DocumentEntry, FileList, Identified, ParsedItem, ResultPayload, ResultStatus,
    SavedResultSummary, UploadResponse,
};
