pub mod api_client;
#[cfg(test)]
pub mod mock;

pub use api_client::{HttpApiClient, ReviewApi, UploadRequest};
