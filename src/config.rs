use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 默认后端地址
pub const DEFAULT_BASE_URL: &str = "http://localhost:4200";

/// 响应轮询间隔 (固定 30 秒, 调用方可覆盖)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub poller: PollerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollerConfig {
    pub interval_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_secs: 30,
            },
            poller: PollerConfig {
                interval_secs: DEFAULT_POLL_INTERVAL.as_secs(),
            },
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 < rfp-procure.toml < 环境变量 (RFP__BACKEND__BASE_URL 等)
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("backend.base_url", defaults.backend.base_url)?
            .set_default("backend.timeout_secs", defaults.backend.timeout_secs)?
            .set_default("poller.interval_secs", defaults.poller.interval_secs)?
            .add_source(config::File::with_name("rfp-procure").required(false))
            .add_source(
                config::Environment::with_prefix("RFP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// 请求超时
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_secs)
    }

    /// 轮询间隔, 0 视为非法并回退到默认值
    pub fn poll_interval(&self) -> Duration {
        match self.poller.interval_secs {
            0 => DEFAULT_POLL_INTERVAL,
            secs => Duration::from_secs(secs),
        }
    }
}
