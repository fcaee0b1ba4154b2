//! 用户 Repository trait

use async_trait::async_trait;
use sharebnb_errors::AppResult;

use crate::domain::user::{NewUser, User, UserCredentials};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 根据用户名查找用户及其密码哈希
    async fn find_credentials(&self, username: &str) -> AppResult<Option<UserCredentials>>;

    /// 根据用户名查找用户（不含密码哈希）
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// 检查用户名是否存在
    async fn exists_by_username(&self, username: &str) -> AppResult<bool>;

    /// 插入用户
    ///
    /// 用户名已存在时返回 `AppError::Conflict`。
    async fn insert(&self, user: &NewUser) -> AppResult<User>;

    /// 更新头像地址；用户不存在时不做任何事
    async fn update_image_url(&self, username: &str, image_url: &str) -> AppResult<()>;
}
