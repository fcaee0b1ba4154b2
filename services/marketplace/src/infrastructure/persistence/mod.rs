//! 持久化实现

mod postgres_listing_repository;
mod postgres_user_repository;

#[cfg(test)]
pub(crate) mod memory;

pub use postgres_listing_repository::PostgresListingRepository;
pub use postgres_user_repository::PostgresUserRepository;
