//! Marketplace - 房源与用户数据访问层
//!
//! 模块划分：
//! - `domain`: 实体、值对象、Repository trait、密码服务
//! - `application`: `ListingService` / `UserService`
//! - `infrastructure`: PostgreSQL 实现
//! - `migrations`: 内嵌的数据库迁移

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod migrations;

mod marketplace;

pub use marketplace::Marketplace;
