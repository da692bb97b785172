use super::{ApiClient, RfpApi};
use crate::error::Result;
use crate::models::{Evaluation, Rfp, RfpCreate, RfpSendRequest, VendorResponse};
use async_trait::async_trait;
use tracing::info;

const RFPS: &str = "/rfp_management/rfps";

#[async_trait]
impl RfpApi for ApiClient {
    async fn list_rfps(&self) -> Result<Vec<Rfp>> {
        self.fetch(self.http().get(self.url(RFPS))).await
    }

    async fn get_rfp(&self, rfp_id: i64) -> Result<Rfp> {
        self.fetch(self.http().get(self.url(&format!("{RFPS}/{rfp_id}"))))
            .await
    }

    async fn create_rfp(&self, req: &RfpCreate) -> Result<Rfp> {
        info!("Creating RFP '{}'", req.rfp_title);
        self.fetch(self.http().post(self.url(RFPS)).json(req)).await
    }

    async fn delete_rfp(&self, rfp_id: i64) -> Result<()> {
        info!("Deleting RFP {}", rfp_id);
        self.fetch_unit(self.http().delete(self.url(&format!("{RFPS}/{rfp_id}"))))
            .await
    }

    async fn send_rfp(&self, rfp_id: i64, vendor_ids: &[i64]) -> Result<()> {
        info!("Sending RFP {} to vendors {:?}", rfp_id, vendor_ids);
        let payload = RfpSendRequest {
            vendor_ids: vendor_ids.to_vec(),
        };
        self.fetch_unit(
            self.http()
                .post(self.url(&format!("{RFPS}/{rfp_id}/send")))
                .json(&payload),
        )
        .await
    }

    async fn list_responses(&self, rfp_id: i64) -> Result<Vec<VendorResponse>> {
        self.fetch(
            self.http()
                .get(self.url(&format!("{RFPS}/{rfp_id}/responses"))),
        )
        .await
    }

    async fn evaluate_rfp(&self, rfp_id: i64) -> Result<Evaluation> {
        info!("Requesting evaluation for RFP {}", rfp_id);
        self.fetch(
            self.http()
                .post(self.url(&format!("{RFPS}/{rfp_id}/evaluate"))),
        )
        .await
    }
}
