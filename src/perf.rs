// ==========================================
// 舰艇维护期排程核心 - 性能统计
// ==========================================
// PerfGuard: 作用域结束时输出一条 target = "perf" 的日志
//   - elapsed_ms: 作用域耗时
//   - sql_count:  作用域内执行的 SQL 语句数 (需 install_sql_counter)
//   - counters:   调用方记录的规模指标 (如 weeks / rows / bars / rejected)
// ==========================================

use rusqlite::Connection;
use std::cell::Cell;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// SQL 计数开关环境变量
pub const PERF_SQL_ENV: &str = "MP_SCHEDULE_PERF_SQL";

static SQL_COUNTING: AtomicBool = AtomicBool::new(false);

thread_local! {
    static GUARD_DEPTH: Cell<u32> = Cell::new(0);
    static SQL_COUNT: Cell<u64> = Cell::new(0);
}

fn env_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// 在连接上安装语句计数回调
///
/// Debug 构建默认开启，Release 默认关闭；`MP_SCHEDULE_PERF_SQL` 可强制开关。
/// 返回是否开启。
pub fn install_sql_counter(conn: &mut Connection) -> bool {
    let enabled = match std::env::var(PERF_SQL_ENV) {
        Ok(v) => env_flag(&v),
        Err(_) => cfg!(debug_assertions),
    };
    SQL_COUNTING.store(enabled, Ordering::Relaxed);

    if enabled {
        conn.trace(Some(count_statement));
    } else {
        conn.trace(None);
    }
    enabled
}

fn count_statement(_sql: &str) {
    if !SQL_COUNTING.load(Ordering::Relaxed) {
        return;
    }
    // 只统计处于 PerfGuard 作用域内的语句
    if GUARD_DEPTH.with(|d| d.get()) == 0 {
        return;
    }
    SQL_COUNT.with(|c| c.set(c.get().saturating_add(1)));
}

// ==========================================
// PerfGuard
// ==========================================
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    sql_start: u64,
    counters: Vec<(&'static str, usize)>,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        GUARD_DEPTH.with(|d| d.set(d.get().saturating_add(1)));
        Self {
            op,
            start: Instant::now(),
            sql_start: SQL_COUNT.with(|c| c.get()),
            counters: Vec::new(),
        }
    }

    /// 记录规模指标；同名指标后写覆盖先写
    pub fn record(&mut self, name: &'static str, value: usize) {
        match self.counters.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.counters.push((name, value)),
        }
    }

    /// 当前作用域内已执行的 SQL 语句数
    pub fn sql_count(&self) -> u64 {
        SQL_COUNT
            .with(|c| c.get())
            .saturating_sub(self.sql_start)
    }

    /// "weeks=36 rows=2" 形式，按记录顺序
    pub fn counters_text(&self) -> String {
        let mut out = String::new();
        for (i, (name, value)) in self.counters.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{}={}", name, value);
        }
        out
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            sql_count = self.sql_count(),
            counters = %self.counters_text(),
            "done"
        );
        GUARD_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}
