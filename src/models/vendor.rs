use super::timestamp;
use crate::error::{ClientError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

/// 供应商 (Vendor)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub vendor_id: i64,
    pub vendor_name: String,
    pub vendor_email: String,
    #[serde(default)]
    pub vendor_rating: Option<f64>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub vendor_created_at: DateTime<Utc>,
}

/// 新建供应商请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorCreate {
    pub vendor_name: String,
    pub vendor_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_rating: Option<f64>,
}

/// 更新供应商请求体, 未设置的字段不下发
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_rating: Option<f64>,
}

impl VendorCreate {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.vendor_name)?;
        validate_email(&self.vendor_email)?;
        validate_rating(self.vendor_rating)
    }
}

impl VendorUpdate {
    pub fn is_empty(&self) -> bool {
        self.vendor_name.is_none() && self.vendor_email.is_none() && self.vendor_rating.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.vendor_name {
            validate_name(name)?;
        }
        if let Some(email) = &self.vendor_email {
            validate_email(email)?;
        }
        validate_rating(self.vendor_rating)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ClientError::Validation("Vendor name is required".into()));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<()> {
    if email.trim().is_empty() {
        return Err(ClientError::Validation("Email is required".into()));
    }
    if !is_valid_email(email) {
        return Err(ClientError::Validation("Invalid email address".into()));
    }
    Ok(())
}

fn validate_rating(rating: Option<f64>) -> Result<()> {
    match rating {
        Some(r) if !(MIN_RATING..=MAX_RATING).contains(&r) => Err(ClientError::Validation(
            "Rating must be between 0 and 5".into(),
        )),
        _ => Ok(()),
    }
}

/// local@domain.tld, tld 至少两个字母
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());
    local_ok && host_ok && tld_ok
}
