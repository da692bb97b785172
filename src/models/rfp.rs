use super::timestamp;
use crate::error::{ClientError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// RFP 描述的最少字符数
pub const MIN_RAW_TEXT_CHARS: usize = 50;

/// RFP 生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RfpStatus {
    Draft,
    Sent,
    Evaluated,
}

impl RfpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Sent => "SENT",
            Self::Evaluated => "EVALUATED",
        }
    }
}

impl fmt::Display for RfpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RFP 主体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rfp {
    pub rfp_id: i64,
    pub rfp_title: String,
    pub rfp_raw_text: String,
    #[serde(default, deserialize_with = "lenient_structured")]
    pub rfp_structured_json: Option<RfpStructuredData>,
    pub rfp_status: RfpStatus,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub rfp_created_at: DateTime<Utc>,
}

/// 解析器输出的结构化数据, 所有字段都可能缺失
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RfpStructuredData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub requirements: Option<Vec<String>>,
    #[serde(default)]
    pub budget_range: Option<BudgetRange>,
    #[serde(default)]
    pub timeline: Option<String>,
    #[serde(default)]
    pub delivery_location: Option<String>,
    #[serde(default)]
    pub evaluation_criteria: Option<EvaluationCriteria>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

/// 评估标准: 解析器可能给出一段文字, 也可能给出列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EvaluationCriteria {
    Text(String),
    List(Vec<String>),
}

impl EvaluationCriteria {
    pub fn items(&self) -> Vec<&str> {
        match self {
            Self::Text(text) => vec![text.as_str()],
            Self::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

impl RfpStructuredData {
    pub fn requirements(&self) -> &[String] {
        self.requirements.as_deref().unwrap_or_default()
    }

    /// 预算区间至少有一端时才有展示意义
    pub fn budget(&self) -> Option<BudgetRange> {
        self.budget_range
            .filter(|range| range.min.is_some() || range.max.is_some())
    }
}

/// 结构化数据格式不符时按缺失处理, 不让整个 RFP 解析失败
fn lenient_structured<'de, D>(deserializer: D) -> std::result::Result<Option<RfpStructuredData>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match serde_json::from_value(value) {
        Ok(data) => Some(data),
        Err(e) => {
            tracing::warn!("Ignoring malformed rfp_structured_json: {}", e);
            None
        }
    }))
}

/// 新建 RFP 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RfpCreate {
    pub rfp_title: String,
    pub rfp_raw_text: String,
}

impl RfpCreate {
    pub fn new(title: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            rfp_title: title.into(),
            rfp_raw_text: raw_text.into(),
        }
    }

    /// 提交前校验, 不合法的请求体不会发出
    pub fn validate(&self) -> Result<()> {
        if self.rfp_title.trim().is_empty() {
            return Err(ClientError::Validation("Title is required".into()));
        }
        if self.rfp_raw_text.trim().is_empty() {
            return Err(ClientError::Validation("Requirements are required".into()));
        }
        if self.rfp_raw_text.chars().count() < MIN_RAW_TEXT_CHARS {
            return Err(ClientError::Validation(format!(
                "Please provide more details (at least {} characters)",
                MIN_RAW_TEXT_CHARS
            )));
        }
        Ok(())
    }
}

/// 发送请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RfpSendRequest {
    pub vendor_ids: Vec<i64>,
}
