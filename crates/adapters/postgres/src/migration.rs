//! PostgreSQL 迁移管理模块
//!
//! 版本化 SQL 迁移：每个迁移在独立事务中执行，并记录校验和

use sha2::{Digest, Sha256};
use sharebnb_errors::{AppError, AppResult};
use sqlx::PgPool;
use std::collections::HashSet;
use tracing::{info, warn};

/// 迁移记录
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MigrationRecord {
    pub version: i64,
    pub name: String,
    pub applied_at: chrono::DateTime<chrono::Utc>,
    pub checksum: String,
}

/// 迁移定义
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub name: String,
    pub up_sql: String,
    pub checksum: String,
}

impl Migration {
    /// 创建新的迁移
    pub fn new(version: i64, name: impl Into<String>, up_sql: impl Into<String>) -> Self {
        let up_sql = up_sql.into();
        let checksum = Self::calculate_checksum(&up_sql);
        Self {
            version,
            name: name.into(),
            up_sql,
            checksum,
        }
    }

    fn calculate_checksum(sql: &str) -> String {
        hex::encode(Sha256::digest(sql.as_bytes()))
    }
}

/// 迁移记录表
pub const MIGRATIONS_TABLE: &str = "_migrations";

/// 迁移管理器
pub struct MigrationManager {
    pool: PgPool,
}

impl MigrationManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 初始化迁移表
    pub async fn init(&self) -> AppResult<()> {
        let create_sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                version BIGINT PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                checksum VARCHAR(64) NOT NULL
            )
            "#,
            MIGRATIONS_TABLE
        );

        sqlx::query(&create_sql)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create migration table: {}", e)))?;

        info!(table = MIGRATIONS_TABLE, "Migration table initialized");
        Ok(())
    }

    /// 获取已应用的迁移
    pub async fn applied_migrations(&self) -> AppResult<Vec<MigrationRecord>> {
        let sql = format!(
            "SELECT version, name, applied_at, checksum FROM {} ORDER BY version ASC",
            MIGRATIONS_TABLE
        );

        sqlx::query_as::<_, MigrationRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get migrations: {}", e)))
    }

    /// 获取当前版本
    pub async fn current_version(&self) -> AppResult<Option<i64>> {
        let sql = format!("SELECT MAX(version) FROM {}", MIGRATIONS_TABLE);

        let row: (Option<i64>,) = sqlx::query_as(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get current version: {}", e)))?;

        Ok(row.0)
    }

    /// 应用单个迁移
    pub async fn apply(&self, migration: &Migration) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {}", e)))?;

        let check_sql = format!("SELECT version FROM {} WHERE version = $1", MIGRATIONS_TABLE);
        let existing: Option<(i64,)> = sqlx::query_as(&check_sql)
            .bind(migration.version)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to check migration: {}", e)))?;

        if existing.is_some() {
            warn!(
                version = migration.version,
                name = %migration.name,
                "Migration already applied, skipping"
            );
            return Ok(());
        }

        sqlx::raw_sql(&migration.up_sql)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::database(format!(
                    "Failed to apply migration {}: {}",
                    migration.version, e
                ))
            })?;

        let insert_sql = format!(
            "INSERT INTO {} (version, name, checksum) VALUES ($1, $2, $3)",
            MIGRATIONS_TABLE
        );
        sqlx::query(&insert_sql)
            .bind(migration.version)
            .bind(&migration.name)
            .bind(&migration.checksum)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to record migration: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit migration: {}", e)))?;

        info!(
            version = migration.version,
            name = %migration.name,
            "Migration applied successfully"
        );

        Ok(())
    }

    /// 应用所有待处理的迁移
    ///
    /// 遇到第一个失败的迁移即停止；已应用但校验和不一致的迁移记入错误列表。
    pub async fn migrate(&self, migrations: &[Migration]) -> AppResult<MigrationResult> {
        self.init().await?;

        let applied = self.applied_migrations().await?;
        let plan = plan_migrations(&applied, migrations);

        let mut result = MigrationResult {
            applied: Vec::new(),
            skipped: plan.skipped,
            errors: plan.errors,
        };

        for migration in plan.pending {
            match self.apply(migration).await {
                Ok(()) => result.applied.push(migration.version),
                Err(e) => {
                    result.errors.push(MigrationError {
                        version: migration.version,
                        name: migration.name.clone(),
                        error: e.to_string(),
                    });
                    break;
                }
            }
        }

        Ok(result)
    }
}

struct MigrationPlan<'a> {
    pending: Vec<&'a Migration>,
    skipped: Vec<i64>,
    errors: Vec<MigrationError>,
}

/// 对比已应用记录，按版本排序得出待执行迁移
fn plan_migrations<'a>(applied: &[MigrationRecord], migrations: &'a [Migration]) -> MigrationPlan<'a> {
    let applied_versions: HashSet<i64> = applied.iter().map(|m| m.version).collect();

    let mut sorted: Vec<&Migration> = migrations.iter().collect();
    sorted.sort_by_key(|m| m.version);

    let mut plan = MigrationPlan {
        pending: Vec::new(),
        skipped: Vec::new(),
        errors: Vec::new(),
    };

    for migration in sorted {
        if !applied_versions.contains(&migration.version) {
            plan.pending.push(migration);
            continue;
        }

        let modified = applied
            .iter()
            .any(|r| r.version == migration.version && r.checksum != migration.checksum);
        if modified {
            plan.errors.push(MigrationError {
                version: migration.version,
                name: migration.name.clone(),
                error: "Checksum mismatch - migration has been modified".to_string(),
            });
        } else {
            plan.skipped.push(migration.version);
        }
    }

    plan
}

/// 迁移结果
#[derive(Debug, Clone)]
pub struct MigrationResult {
    pub applied: Vec<i64>,
    pub skipped: Vec<i64>,
    pub errors: Vec<MigrationError>,
}

impl MigrationResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }
}

/// 迁移错误
#[derive(Debug, Clone)]
pub struct MigrationError {
    pub version: i64,
    pub name: String,
    pub error: String,
}
