//! 用户实体
//!
//! 对外只暴露 [`User`]（不含密码哈希）；[`UserCredentials`] 仅用于认证。

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::HashedPassword;

/// 用户公开视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub image_url: String,
}

/// 用户及其密码哈希，仅在认证流程内部使用
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: HashedPassword,
}

impl UserCredentials {
    /// 丢弃密码哈希，得到公开视图
    pub fn into_user(self) -> User {
        self.user
    }
}

/// 待插入的新用户
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: HashedPassword,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub image_url: String,
}

impl NewUser {
    /// 插入成功后返回的公开视图
    pub fn to_user(&self) -> User {
        User {
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            image_url: self.image_url.clone(),
        }
    }
}
