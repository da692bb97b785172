//! REST 网关: 统一信封、错误面, 以及控制器/轮询器依赖的接口

pub mod client;
pub mod rfps;
pub mod vendors;

pub use client::ApiClient;

use crate::error::Result;
use crate::models::{Evaluation, Rfp, RfpCreate, Vendor, VendorCreate, VendorResponse, VendorUpdate};
use async_trait::async_trait;

/// RFP 相关接口
#[async_trait]
pub trait RfpApi: Send + Sync {
    async fn list_rfps(&self) -> Result<Vec<Rfp>>;
    async fn get_rfp(&self, rfp_id: i64) -> Result<Rfp>;
    async fn create_rfp(&self, req: &RfpCreate) -> Result<Rfp>;
    async fn delete_rfp(&self, rfp_id: i64) -> Result<()>;
    async fn send_rfp(&self, rfp_id: i64, vendor_ids: &[i64]) -> Result<()>;
    async fn list_responses(&self, rfp_id: i64) -> Result<Vec<VendorResponse>>;
    async fn evaluate_rfp(&self, rfp_id: i64) -> Result<Evaluation>;
}

/// 供应商 CRUD
#[async_trait]
pub trait VendorApi: Send + Sync {
    async fn list_vendors(&self) -> Result<Vec<Vendor>>;
    async fn get_vendor(&self, vendor_id: i64) -> Result<Vendor>;
    async fn create_vendor(&self, req: &VendorCreate) -> Result<Vendor>;
    async fn update_vendor(&self, vendor_id: i64, req: &VendorUpdate) -> Result<Vendor>;
    async fn delete_vendor(&self, vendor_id: i64) -> Result<()>;
}
