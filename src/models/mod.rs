pub mod envelope;
pub mod evaluation;
pub mod response;
pub mod rfp;
pub mod stats;
pub mod timestamp;
pub mod vendor;

pub use envelope::{ApiEnvelope, ErrorBody};
pub use evaluation::Evaluation;
pub use response::{ParsedEmail, VendorResponse};
pub use rfp::{
    BudgetRange, EvaluationCriteria, Rfp, RfpCreate, RfpSendRequest, RfpStatus,
    RfpStructuredData, MIN_RAW_TEXT_CHARS,
};
pub use stats::{Dashboard, DashboardStats, RECENT_RFPS};
pub use vendor::{Vendor, VendorCreate, VendorUpdate};
