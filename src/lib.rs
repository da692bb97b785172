pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod service;

pub use api::{ApiClient, RfpApi, VendorApi};
pub use config::AppConfig;
pub use error::ClientError;
pub use service::{RfpController, VendorDirectory};
