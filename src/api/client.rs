use crate::config::AppConfig;
use crate::error::{ClientError, Result};
use crate::models::{ApiEnvelope, ErrorBody};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// 后端 HTTP 客户端, 每次调用都直接请求服务端 (无缓存、无重试)
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` 形如 `http://localhost:4200`, 末尾斜杠会被去掉
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(&config.backend.base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// 发送请求并解出信封中的 data
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let body = self.execute(req).await?;
        let envelope: ApiEnvelope<T> = serde_json::from_slice(&body)?;
        envelope.into_data()
    }

    /// 只关心成功与否的请求, 空响应体 (204) 也算成功
    pub(crate) async fn fetch_unit(&self, req: RequestBuilder) -> Result<()> {
        let body = self.execute(req).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }
        let envelope: ApiEnvelope<serde::de::IgnoredAny> = serde_json::from_slice(&body)?;
        envelope.into_unit()
    }

    async fn execute(&self, req: RequestBuilder) -> Result<Vec<u8>> {
        let resp = req.send().await.map_err(|e| {
            warn!("Network error: {}", e);
            ClientError::Transport(e)
        })?;
        let status = resp.status();
        let url = resp.url().clone();
        let body = resp.bytes().await?;
        debug!(url = %url, status = status.as_u16(), bytes = body.len(), "backend response");

        if !status.is_success() {
            let detail = ErrorBody::parse(&body).into_message();
            warn!(url = %url, status = status.as_u16(), "API error: {:?}", detail);
            return Err(ClientError::Server {
                status: status.as_u16(),
                detail,
            });
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }
        Ok(body.to_vec())
    }
}
