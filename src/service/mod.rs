pub mod controller;
pub mod dashboard;
pub mod lifecycle;
pub mod poller;
pub mod vendors;
pub mod view;


pub use controller::RfpController;
pub use lifecycle::RfpAction;
pub use poller::PollHandle;
pub use vendors::VendorDirectory;
