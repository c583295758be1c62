use async_trait::async_trait;

use crate::error::Result;

/// Fetches a report page. Transport, timeout and retry policy live behind
/// this seam; the extraction core only sees the returned body.
#[async_trait]
pub trait PageFetchPort: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

#[derive(Clone, Debug)]
pub struct FetchedPage {
    pub status: u16,
    pub body: Vec<u8>,
    pub content_type: String,
}
