use super::{ApiClient, VendorApi};
use crate::error::Result;
use crate::models::{Vendor, VendorCreate, VendorUpdate};
use async_trait::async_trait;
use tracing::info;

const VENDORS: &str = "/vendor_management/vendors";

#[async_trait]
impl VendorApi for ApiClient {
    async fn list_vendors(&self) -> Result<Vec<Vendor>> {
        self.fetch(self.http().get(self.url(VENDORS))).await
    }

    async fn get_vendor(&self, vendor_id: i64) -> Result<Vendor> {
        self.fetch(self.http().get(self.url(&format!("{VENDORS}/{vendor_id}"))))
            .await
    }

    async fn create_vendor(&self, req: &VendorCreate) -> Result<Vendor> {
        info!("Creating vendor '{}'", req.vendor_name);
        self.fetch(self.http().post(self.url(VENDORS)).json(req)).await
    }

    async fn update_vendor(&self, vendor_id: i64, req: &VendorUpdate) -> Result<Vendor> {
        info!("Updating vendor {}", vendor_id);
        self.fetch(
            self.http()
                .put(self.url(&format!("{VENDORS}/{vendor_id}")))
                .json(req),
        )
        .await
    }

    async fn delete_vendor(&self, vendor_id: i64) -> Result<()> {
        info!("Deleting vendor {}", vendor_id);
        self.fetch_unit(self.http().delete(self.url(&format!("{VENDORS}/{vendor_id}"))))
            .await
    }
}
