//! 内嵌的数据库迁移

use sharebnb_adapter_postgres::Migration;

/// 按版本排列的全部迁移
pub fn all() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "create_users",
            include_str!("../migrations/0001_create_users.sql"),
        ),
        Migration::new(
            2,
            "create_listings",
            include_str!("../migrations/0002_create_listings.sql"),
        ),
    ]
}
