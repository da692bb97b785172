use crate::error::{ClientError, Result};
use serde::Deserialize;

/// 统一响应信封: { success, message, data }
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// success=false 与传输失败同样视为错误
    pub fn into_data(self) -> Result<T> {
        if !self.success {
            return Err(ClientError::Rejected(self.message));
        }
        self.data.ok_or(ClientError::MissingData)
    }

    /// 不关心 data 的调用 (send / delete)
    pub fn into_unit(self) -> Result<()> {
        if !self.success {
            return Err(ClientError::Rejected(self.message));
        }
        Ok(())
    }
}

/// 非 2xx 响应体: FastAPI 的 detail 或 error_response 的 message
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// detail 可能是字符串, 也可能是校验错误列表
    pub fn into_message(self) -> Option<String> {
        let detail = match self.detail {
            Some(serde_json::Value::String(s)) => Some(s),
            Some(serde_json::Value::Array(items)) => {
                let msgs: Vec<String> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .map(str::to_string)
                    .collect();
                (!msgs.is_empty()).then(|| msgs.join("; "))
            }
            Some(serde_json::Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };
        detail
            .or(self.message)
            .filter(|message| !message.trim().is_empty())
    }
}
