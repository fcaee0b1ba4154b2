//! 应用层：对外暴露的房源与用户操作

mod listing_service;
mod user_service;

pub use listing_service::ListingService;
pub use user_service::{INVALID_CREDENTIALS, UserService};
