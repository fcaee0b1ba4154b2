//! 内存实现，供单元测试替换 PostgreSQL

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sharebnb_errors::{AppError, AppResult};

use crate::domain::listing::{Listing, ListingId, NewListing};
use crate::domain::repositories::{ListingRepository, UserRepository};
use crate::domain::user::{NewUser, User, UserCredentials};

#[derive(Default)]
pub struct InMemoryListingRepository {
    rows: Mutex<Vec<Listing>>,
}

impl InMemoryListingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn insert(&self, listing: &NewListing) -> AppResult<Listing> {
        let mut rows = self.rows.lock().unwrap();
        // 模拟 SERIAL，从 1 开始
        let id = ListingId(rows.len() as i32 + 1);
        let listing = listing.clone().with_id(id);
        rows.push(listing.clone());
        Ok(listing)
    }

    async fn find_all(&self) -> AppResult<Vec<Listing>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: ListingId) -> AppResult<Option<Listing>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }
}

/// 以用户名为主键，插入重复用户名时返回 `Conflict`
#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<HashMap<String, UserCredentials>>,
    stale_reads: bool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// `exists_by_username` 始终返回 false，模拟并发注册时预检查读到旧数据
    pub fn with_stale_reads() -> Self {
        Self {
            stale_reads: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// 直接读取存储的哈希字符串
    pub fn stored_hash(&self, username: &str) -> Option<String> {
        self.rows
            .lock()
            .unwrap()
            .get(username)
            .map(|c| c.password_hash.as_str().to_string())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_credentials(&self, username: &str) -> AppResult<Option<UserCredentials>> {
        Ok(self.rows.lock().unwrap().get(username).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(username)
            .map(|c| c.user.clone()))
    }

    async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        if self.stale_reads {
            return Ok(false);
        }
        Ok(self.rows.lock().unwrap().contains_key(username))
    }

    async fn insert(&self, user: &NewUser) -> AppResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&user.username) {
            return Err(AppError::conflict(format!(
                "duplicate key value violates unique constraint \"users_pkey\": {}",
                user.username
            )));
        }

        let public = user.to_user();
        rows.insert(
            user.username.clone(),
            UserCredentials {
                user: public.clone(),
                password_hash: user.password_hash.clone(),
            },
        );
        Ok(public)
    }

    async fn update_image_url(&self, username: &str, image_url: &str) -> AppResult<()> {
        if let Some(credentials) = self.rows.lock().unwrap().get_mut(username) {
            credentials.user.image_url = image_url.to_string();
        }
        Ok(())
    }
}
