use crate::models::RfpStatus;
use crate::service::lifecycle::RfpAction;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// 本地校验失败, 未发出任何请求
    #[error("{0}")]
    Validation(String),
    #[error("cannot {action} an RFP in {status} status")]
    InvalidTransition { status: RfpStatus, action: RfpAction },
    /// 未收到响应 (连接失败、超时等)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },
    /// 信封 success=false
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response envelope carried no data")]
    MissingData,
    /// 视图已销毁
    #[error("view has been closed")]
    Closed,
}

impl ClientError {
    /// 面向用户的提示: 优先使用服务端信息, 否则使用调用方给出的兜底文案
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(_) | Self::InvalidTransition { .. } | Self::Closed => self.to_string(),
            Self::Server {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            Self::Rejected(message) if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// 是否在本地被拦截 (没有产生网络请求)
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidTransition { .. } | Self::Closed
        )
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
