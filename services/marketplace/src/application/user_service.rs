//! 用户服务
//!
//! 注册、认证、头像更新与查询。返回值一律是不含密码哈希的 [`User`]。

use std::sync::Arc;

use sharebnb_errors::{AppError, AppResult};
use tracing::{debug, info, instrument, warn};

use crate::domain::repositories::UserRepository;
use crate::domain::services::PasswordHasher;
use crate::domain::user::{NewUser, User};
use crate::domain::value_objects::HashedPassword;

/// 认证失败时的统一提示，不区分用户不存在与密码错误
pub const INVALID_CREDENTIALS: &str = "Invalid username/password";

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    default_image_url: String,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        default_image_url: impl Into<String>,
    ) -> Self {
        Self {
            users,
            hasher,
            default_image_url: default_image_url.into(),
        }
    }

    /// 使用用户名和密码认证
    ///
    /// 用户不存在或密码错误都返回相同的 `Unauthorized` 错误。
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        if let Some(credentials) = self.users.find_credentials(username).await? {
            match self.verify(password, credentials.password_hash.clone()).await {
                Ok(true) => {
                    debug!("User authenticated");
                    return Ok(credentials.into_user());
                }
                Ok(false) => {}
                Err(e) => warn!(error = %e, "Stored password hash could not be verified"),
            }
        }

        warn!("Authentication failed");
        Err(AppError::unauthorized(INVALID_CREDENTIALS))
    }

    /// 注册新用户，头像使用默认地址
    ///
    /// 用户名已存在时返回 `BadRequest`。预检查只是优化，
    /// 插入时的唯一约束冲突同样视为重复。
    #[instrument(skip(self, password, first_name, last_name, email, phone))]
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
    ) -> AppResult<User> {
        if self.users.exists_by_username(username).await? {
            warn!("Duplicate username rejected");
            return Err(duplicate_username(username));
        }

        let password_hash = self.hash(password).await?;

        let new_user = NewUser {
            username: username.to_string(),
            password_hash,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            image_url: self.default_image_url.clone(),
        };

        let user = self.users.insert(&new_user).await.map_err(|e| match e {
            AppError::Conflict(_) => {
                warn!("Duplicate username rejected by unique constraint");
                duplicate_username(username)
            }
            other => other,
        })?;

        info!("User registered");
        Ok(user)
    }

    /// 更新用户头像地址，不检查用户是否存在
    #[instrument(skip(self))]
    pub async fn update_user_img_url(&self, image_url: &str, username: &str) -> AppResult<()> {
        self.users.update_image_url(username, image_url).await
    }

    /// 根据用户名查询用户，不存在时返回 `None`
    pub async fn get_user(&self, username: &str) -> AppResult<Option<User>> {
        self.users.find_by_username(username).await
    }

    async fn hash(&self, password: &str) -> AppResult<HashedPassword> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify(&self, password: &str, hash: HashedPassword) -> AppResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {}", e)))?
    }
}

fn duplicate_username(username: &str) -> AppError {
    AppError::bad_request(format!("Duplicate username: {}", username))
}
