//! sharebnb-config - 配置加载库

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use thiserror::Error;

use secrecy::Secret;

/// 注册时使用的默认头像
pub const DEFAULT_IMAGE_URL: &str =
    "https://cdn.business2community.com/wp-content/uploads/2017/08/blank-profile-picture-973460_640.png";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// 获取连接的超时（秒）
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// 空闲连接回收时间（秒）
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    // 开发环境: 10, 生产环境: 50
    match std::env::var("APP_ENV").as_deref() {
        Ok("production") => 50,
        _ => 10,
    }
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_idle_timeout_secs() -> u64 {
    600
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 是否输出 JSON 日志
    #[serde(default)]
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// 密码哈希配置
///
/// `password_work_factor` 对应 Argon2 的迭代次数（t_cost），
/// `password_memory_kib` 对应内存开销（m_cost）。
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_work_factor")]
    pub password_work_factor: u32,
    #[serde(default = "default_memory_kib")]
    pub password_memory_kib: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_work_factor: default_work_factor(),
            password_memory_kib: default_memory_kib(),
        }
    }
}

fn default_work_factor() -> u32 {
    2
}

fn default_memory_kib() -> u32 {
    19 * 1024
}

/// 用户资料配置
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_image_url")]
    pub default_image_url: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            default_image_url: default_image_url(),
        }
    }
}

fn default_image_url() -> String {
    DEFAULT_IMAGE_URL.to_string()
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    pub app_env: String,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 优先级：`APP_` 前缀环境变量 > `{APP_ENV}.toml` > `default.toml`，
    /// 嵌套字段用 `__` 分隔，例如 `APP_DATABASE__URL`。
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config: Self = Self::figment(config_dir, &env).extract()?;

        Ok(config)
    }

    fn figment(config_dir: &str, env: &str) -> Figment {
        Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("APP_").split("__"))
    }
}

#[cfg(test)]
mod tests;
