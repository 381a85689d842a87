//! Request and response models

pub mod stake;
pub mod assessment;
pub mod protocol;
pub mod oracle;
pub mod admin;

pub use stake::*;
pub use assessment::*;
pub use protocol::*;
pub use oracle::*;
pub use admin::*;
