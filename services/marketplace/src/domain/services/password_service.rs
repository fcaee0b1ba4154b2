//! 密码服务

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sharebnb_config::AuthConfig;
use sharebnb_errors::{AppError, AppResult};

use crate::domain::value_objects::HashedPassword;

/// 单向密码哈希
pub trait PasswordHasher: Send + Sync {
    /// 哈希明文密码
    fn hash(&self, password: &str) -> AppResult<HashedPassword>;

    /// 验证明文密码是否匹配
    ///
    /// 哈希无法解析时返回错误，不匹配时返回 `Ok(false)`。
    fn verify(&self, password: &str, hash: &HashedPassword) -> AppResult<bool>;
}

/// Argon2id 实现
#[derive(Debug, Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Argon2PasswordHasher {
    /// `work_factor` 为迭代次数，`memory_kib` 为内存开销
    pub fn new(work_factor: u32, memory_kib: u32) -> AppResult<Self> {
        let params = Params::new(memory_kib, work_factor, Params::DEFAULT_P_COST, None)
            .map_err(|e| AppError::internal(format!("Invalid password hashing parameters: {}", e)))?;

        Ok(Self { params })
    }

    pub fn from_config(config: &AuthConfig) -> AppResult<Self> {
        Self::new(config.password_work_factor, config.password_memory_kib)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> AppResult<HashedPassword> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(HashedPassword::from_hash(password_hash))
    }

    fn verify(&self, password: &str, hash: &HashedPassword) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash.as_str())
            .map_err(|e| AppError::internal(format!("Invalid password hash: {}", e)))?;

        // 参数取自哈希字符串本身，配置变更不影响旧哈希
        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
