//! 服务组装

use std::sync::Arc;

use sharebnb_config::AppConfig;
use sharebnb_errors::AppResult;
use sqlx::PgPool;

use crate::application::{ListingService, UserService};
use crate::domain::services::Argon2PasswordHasher;
use crate::infrastructure::persistence::{PostgresListingRepository, PostgresUserRepository};

/// 基于同一连接池组装的房源与用户服务
#[derive(Clone)]
pub struct Marketplace {
    pub listings: ListingService,
    pub users: UserService,
}

impl Marketplace {
    pub fn new(pool: PgPool, config: &AppConfig) -> AppResult<Self> {
        let hasher = Argon2PasswordHasher::from_config(&config.auth)?;

        Ok(Self {
            listings: ListingService::new(Arc::new(PostgresListingRepository::new(pool.clone()))),
            users: UserService::new(
                Arc::new(PostgresUserRepository::new(pool)),
                Arc::new(hasher),
                config.profile.default_image_url.clone(),
            ),
        })
    }
}
