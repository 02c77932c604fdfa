pub mod upload_flow;

pub use upload_flow::{Submission, UploadFlow};
