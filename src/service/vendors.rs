use crate::api::VendorApi;
use crate::error::{ClientError, Result};
use crate::models::{Vendor, VendorCreate, VendorUpdate};
use std::sync::Arc;
use tracing::info;

/// 供应商管理: 表单校验通过后才调用后端
pub struct VendorDirectory {
    api: Arc<dyn VendorApi>,
}

impl VendorDirectory {
    pub fn new(api: Arc<dyn VendorApi>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Vendor>> {
        self.api.list_vendors().await
    }

    pub async fn get(&self, vendor_id: i64) -> Result<Vendor> {
        self.api.get_vendor(vendor_id).await
    }

    pub async fn create(&self, req: VendorCreate) -> Result<Vendor> {
        req.validate()?;
        let vendor = self.api.create_vendor(&req).await?;
        info!("Vendor {} created", vendor.vendor_id);
        Ok(vendor)
    }

    pub async fn update(&self, vendor_id: i64, req: VendorUpdate) -> Result<Vendor> {
        if req.is_empty() {
            return Err(ClientError::Validation("Nothing to update".into()));
        }
        req.validate()?;
        self.api.update_vendor(vendor_id, &req).await
    }

    pub async fn delete(&self, vendor_id: i64) -> Result<()> {
        self.api.delete_vendor(vendor_id).await
    }
}
