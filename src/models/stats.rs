use super::{Rfp, RfpStatus, Vendor};
use serde::Serialize;

/// 首页展示的最近 RFP 条数
pub const RECENT_RFPS: usize = 5;

/// 首页统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_vendors: usize,
    pub total_rfps: usize,
    pub active_rfps: usize,
    pub evaluated_rfps: usize,
}

impl DashboardStats {
    pub fn from_lists(vendors: &[Vendor], rfps: &[Rfp]) -> Self {
        let count = |status: RfpStatus| rfps.iter().filter(|r| r.rfp_status == status).count();
        Self {
            total_vendors: vendors.len(),
            total_rfps: rfps.len(),
            active_rfps: count(RfpStatus::Sent),
            evaluated_rfps: count(RfpStatus::Evaluated),
        }
    }
}

/// 首页: 统计 + 最近的 RFP (后端按创建时间倒序返回, 取前几条)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent_rfps: Vec<Rfp>,
}

impl Dashboard {
    pub fn from_lists(vendors: &[Vendor], mut rfps: Vec<Rfp>) -> Self {
        let stats = DashboardStats::from_lists(vendors, &rfps);
        rfps.truncate(RECENT_RFPS);
        Self {
            stats,
            recent_rfps: rfps,
        }
    }
}
