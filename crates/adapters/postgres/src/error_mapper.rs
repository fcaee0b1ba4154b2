//! 数据库错误映射
//!
//! 统一的 SQLx 错误到 AppError 的转换，保留原始错误信息

use sharebnb_errors::AppError;

/// PostgreSQL 唯一约束违规
pub const UNIQUE_VIOLATION: &str = "23505";

/// 将 SQLx 错误转换为 AppError，区分不同错误类型
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::RowNotFound => AppError::not_found("Record not found"),
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    UNIQUE_VIOLATION => AppError::conflict(db_err.message().to_string()),
                    "23503" | "23514" | "23502" | "22001" | "22P02" => {
                        AppError::validation(db_err.message().to_string())
                    }
                    _ => AppError::database(format!("Database error ({}): {}", code, db_err)),
                }
            } else {
                AppError::database(db_err.to_string())
            }
        }
        sqlx::Error::PoolTimedOut => AppError::database("Database connection pool timeout"),
        sqlx::Error::PoolClosed => AppError::database("Database connection pool is closed"),
        _ => AppError::database(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_pool_timeout() {
        let err = map_sqlx_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_other_errors_keep_message() {
        let err = map_sqlx_error(sqlx::Error::Protocol("unexpected message".to_string()));
        match err {
            AppError::Database(msg) => assert!(msg.contains("unexpected message")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
