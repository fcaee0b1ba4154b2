//! Marketplace 数据库初始化入口
//!
//! 加载配置、连接数据库、执行迁移并输出当前状态

use marketplace::{Marketplace, migrations};
use sharebnb_adapter_postgres::{MigrationManager, PostgresConfig, check_connection, create_pool};
use sharebnb_config::AppConfig;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let config = AppConfig::load(&config_dir)?;

    sharebnb_telemetry::init_from_config(&config.telemetry);
    info!(app = %config.app_name, env = %config.app_env, "Starting");

    let pool = create_pool(&PostgresConfig::from_config(&config.database)).await?;
    check_connection(&pool).await?;

    let manager = MigrationManager::new(pool.clone());
    let result = manager.migrate(&migrations::all()).await?;
    if !result.is_success() {
        for e in &result.errors {
            error!(version = e.version, name = %e.name, error = %e.error, "Migration failed");
        }
        return Err("database migration failed".into());
    }
    let schema_version = manager.current_version().await?;
    info!(
        applied = result.applied_count(),
        skipped = result.skipped.len(),
        schema_version = ?schema_version,
        "Migrations complete"
    );

    let marketplace = Marketplace::new(pool.clone(), &config)?;
    let listings = marketplace.listings.get_listings().await?;
    info!(listings = listings.len(), "Marketplace database ready");

    pool.close().await;
    Ok(())
}
