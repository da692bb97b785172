use crate::api::{RfpApi, VendorApi};
use crate::error::Result;
use crate::models::Dashboard;
use futures::future;

/// 并发拉取供应商与 RFP 列表, 汇总统计并保留最近的 RFP
pub async fn load(vendors: &dyn VendorApi, rfps: &dyn RfpApi) -> Result<Dashboard> {
    let (vendors, rfps) = future::try_join(vendors.list_vendors(), rfps.list_rfps()).await?;
    Ok(Dashboard::from_lists(&vendors, rfps))
}
