use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

use crate::app::ports::{FetchedPage, PageFetchPort};
use crate::config::HttpConfig;
use crate::error::Result;

pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetchPort for ReqwestHttp {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let resp = self.client.get(url).send().await?.error_for_status()?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text/html")
            .to_string();
        let body = resp.bytes().await?.to_vec();
        Ok(FetchedPage {
            status,
            body,
            content_type,
        })
    }
}
