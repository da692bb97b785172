use super::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 供应商回复 (只读, 由服务端追加)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorResponse {
    pub id: i64,
    pub fk_rfp_id: i64,
    pub fk_vendor_id: i64,
    #[serde(default)]
    pub vendor_name: Option<String>,
    #[serde(default)]
    pub email_raw_text: String,
    #[serde(default)]
    pub email_parsed_json: Option<ParsedEmail>,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub delivery_days: Option<f64>,
    #[serde(default)]
    pub warranty_years: Option<f64>,
    #[serde(default)]
    pub payment_terms: Option<String>,
    #[serde(default)]
    pub ai_score: Option<f64>,
    #[serde(default)]
    pub ai_recommended: bool,
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub response_created_at: Option<DateTime<Utc>>,
}

/// 邮件解析结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedEmail {
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub delivery_days: Option<f64>,
    #[serde(default)]
    pub warranty_years: Option<f64>,
    #[serde(default)]
    pub payment_terms: Option<String>,
    #[serde(default)]
    pub additional_notes: Option<String>,
}

impl VendorResponse {
    pub fn is_parsed(&self) -> bool {
        self.email_parsed_json.is_some()
    }

    // 顶层字段优先, 缺失时回退到解析结果

    pub fn price(&self) -> Option<f64> {
        self.total_price
            .or_else(|| self.email_parsed_json.as_ref()?.total_price)
    }

    pub fn delivery_days(&self) -> Option<f64> {
        self.delivery_days
            .or_else(|| self.email_parsed_json.as_ref()?.delivery_days)
    }

    pub fn warranty_years(&self) -> Option<f64> {
        self.warranty_years
            .or_else(|| self.email_parsed_json.as_ref()?.warranty_years)
    }

    pub fn payment_terms(&self) -> Option<&str> {
        self.payment_terms
            .as_deref()
            .or_else(|| self.email_parsed_json.as_ref()?.payment_terms.as_deref())
    }

    pub fn notes(&self) -> Option<&str> {
        self.email_parsed_json.as_ref()?.additional_notes.as_deref()
    }

    pub fn display_name(&self) -> &str {
        self.vendor_name.as_deref().unwrap_or("Unknown Vendor")
    }
}
