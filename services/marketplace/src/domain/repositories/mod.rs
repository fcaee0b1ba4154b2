//! Repository 抽象（持久化端口）

mod listing_repository;
mod user_repository;

pub use listing_repository::ListingRepository;
pub use user_repository::UserRepository;
