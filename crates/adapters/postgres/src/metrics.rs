//! 查询监控

use metrics::{counter, histogram};
use std::time::Instant;

/// 慢查询阈值（毫秒）
const SLOW_QUERY_MS: u128 = 100;

/// 查询计时守卫
///
/// 调用 [`QueryTimer::finish`] 记录耗时，调用 [`QueryTimer::fail`] 记录错误。
pub struct QueryTimer {
    start: Instant,
    table: &'static str,
    operation: &'static str,
}

impl QueryTimer {
    pub fn new(table: &'static str, operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            table,
            operation,
        }
    }

    pub fn finish(self) {
        let duration_ms = self.start.elapsed().as_millis();

        histogram!(
            "db_query_duration_ms",
            "table" => self.table,
            "operation" => self.operation
        )
        .record(duration_ms as f64);
        counter!(
            "db_queries_total",
            "table" => self.table,
            "operation" => self.operation
        )
        .increment(1);

        if duration_ms > SLOW_QUERY_MS {
            tracing::warn!(
                table = self.table,
                operation = self.operation,
                duration_ms = %duration_ms,
                "Slow query detected"
            );
            counter!(
                "db_slow_queries_total",
                "table" => self.table,
                "operation" => self.operation
            )
            .increment(1);
        }
    }

    pub fn fail(self) {
        counter!(
            "db_query_errors_total",
            "table" => self.table,
            "operation" => self.operation
        )
        .increment(1);
    }

    /// 根据查询结果结束计时，原样返回结果
    pub fn observe<T, E>(self, result: Result<T, E>) -> Result<T, E> {
        match &result {
            Ok(_) => self.finish(),
            Err(_) => self.fail(),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_passes_result_through() {
        // 未安装 recorder 时 metrics 宏为空操作
        let ok: Result<i32, String> = QueryTimer::new("listings", "select").observe(Ok(7));
        assert_eq!(ok, Ok(7));

        let err: Result<i32, String> =
            QueryTimer::new("listings", "select").observe(Err("boom".to_string()));
        assert_eq!(err, Err("boom".to_string()));
    }
}
