// ==========================================
// 舰艇维护期排程核心 - 配置管理器
// ==========================================
// 职责: 排程参数加载、查询、覆写
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::schedule_config::{
    DerivationConfig, ScheduleConfig, ViewConfig, MAX_PRE_PLANNING_MONTHS, MAX_WINDOW_WEEKS,
};
use crate::db::open_sqlite_connection;
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 配置层 Result
pub type ConfigResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

// ==========================================
// ScheduleConfigReader - 排程参数读取接口
// ==========================================
// 实现者: ConfigManager (config_kv 表) / ScheduleConfig (静态配置，测试用)
pub trait ScheduleConfigReader: Send + Sync {
    fn load_schedule_config(&self) -> ConfigResult<ScheduleConfig>;
}

impl ScheduleConfigReader for ScheduleConfig {
    fn load_schedule_config(&self) -> ConfigResult<ScheduleConfig> {
        Ok(self.clone())
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        crate::db::ensure_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：对传入连接再次应用统一 PRAGMA 与建表（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&guard)?;
            crate::db::ensure_schema(&guard)?;
        }

        Ok(Self { conn })
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入 global scope 的配置值（存在则覆盖）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;

        tracing::info!(key, value, "config updated");
        Ok(())
    }

    /// 获取所有 global 配置的快照（JSON，键有序）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&config_map)?)
    }

    /// 读取 u32 配置，缺失时使用默认值；无法解析时报错
    fn get_u32_or_default(&self, key: &str, default: u32) -> ConfigResult<u32> {
        match self.get_global_config_value(key)? {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| format!("配置值无效: {}='{}' ({})", key, raw, e).into()),
        }
    }

    /// 同 get_u32_or_default，另外要求不超过 max
    fn get_bounded_u32(&self, key: &str, default: u32, max: u32) -> ConfigResult<u32> {
        let value = self.get_u32_or_default(key, default)?;
        if value > max {
            return Err(format!("配置值超出范围: {}={} (上限 {})", key, value, max).into());
        }
        Ok(value)
    }
}

impl ScheduleConfigReader for ConfigManager {
    fn load_schedule_config(&self) -> ConfigResult<ScheduleConfig> {
        let d = DerivationConfig::default();
        let v = ViewConfig::default();

        let config = ScheduleConfig {
            derivation: DerivationConfig {
                planning_lead_weeks: self.get_bounded_u32(
                    config_keys::PLANNING_LEAD_WEEKS,
                    d.planning_lead_weeks,
                    MAX_WINDOW_WEEKS,
                )?,
                log_visit_lead_weeks: self.get_bounded_u32(
                    config_keys::LOG_VISIT_LEAD_WEEKS,
                    d.log_visit_lead_weeks,
                    MAX_WINDOW_WEEKS,
                )?,
                closeout_weeks: self.get_bounded_u32(
                    config_keys::CLOSEOUT_WEEKS,
                    d.closeout_weeks,
                    MAX_WINDOW_WEEKS,
                )?,
                pre_planning_months: self.get_bounded_u32(
                    config_keys::PRE_PLANNING_MONTHS,
                    d.pre_planning_months,
                    MAX_PRE_PLANNING_MONTHS,
                )?,
            },
            view: ViewConfig {
                default_months: self
                    .get_u32_or_default(config_keys::VIEW_DEFAULT_MONTHS, v.default_months)?,
                min_months: self.get_u32_or_default(config_keys::VIEW_MIN_MONTHS, v.min_months)?,
                max_months: self.get_u32_or_default(config_keys::VIEW_MAX_MONTHS, v.max_months)?,
                zoom_step_months: self
                    .get_u32_or_default(config_keys::VIEW_ZOOM_STEP_MONTHS, v.zoom_step_months)?,
            },
        };

        tracing::debug!(?config, "schedule config loaded");
        Ok(config)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 窗口推算
    pub const PLANNING_LEAD_WEEKS: &str = "planning_lead_weeks";
    pub const LOG_VISIT_LEAD_WEEKS: &str = "log_visit_lead_weeks";
    pub const CLOSEOUT_WEEKS: &str = "closeout_weeks";
    pub const PRE_PLANNING_MONTHS: &str = "pre_planning_months";

    // 时间轴视图
    pub const VIEW_DEFAULT_MONTHS: &str = "view_default_months";
    pub const VIEW_MIN_MONTHS: &str = "view_min_months";
    pub const VIEW_MAX_MONTHS: &str = "view_max_months";
    pub const VIEW_ZOOM_STEP_MONTHS: &str = "view_zoom_step_months";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_memory_manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_defaults_when_table_empty() {
        let manager = in_memory_manager();
        let config = manager.load_schedule_config().unwrap();
        assert_eq!(config, ScheduleConfig::default());
    }

    #[test]
    fn test_override_and_snapshot() {
        let manager = in_memory_manager();
        manager
            .set_global_config_value(config_keys::CLOSEOUT_WEEKS, "3")
            .unwrap();
        manager
            .set_global_config_value(config_keys::VIEW_DEFAULT_MONTHS, "12")
            .unwrap();

        let config = manager.load_schedule_config().unwrap();
        assert_eq!(config.derivation.closeout_weeks, 3);
        assert_eq!(config.view.default_months, 12);
        assert_eq!(config.derivation.planning_lead_weeks, 14);

        let snapshot = manager.get_config_snapshot().unwrap();
        assert_eq!(snapshot, r#"{"closeout_weeks":"3","view_default_months":"12"}"#);
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let manager = in_memory_manager();
        manager
            .set_global_config_value(config_keys::PRE_PLANNING_MONTHS, "nine")
            .unwrap();
        assert!(manager.load_schedule_config().is_err());
    }

    #[test]
    fn test_out_of_range_derivation_value_is_an_error() {
        let manager = in_memory_manager();
        manager
            .set_global_config_value(config_keys::PRE_PLANNING_MONTHS, "4000000")
            .unwrap();
        let err = manager.load_schedule_config().unwrap_err();
        assert!(err.to_string().contains("pre_planning_months"));

        manager
            .set_global_config_value(config_keys::PRE_PLANNING_MONTHS, "120")
            .unwrap();
        assert_eq!(
            manager.load_schedule_config().unwrap().derivation.pre_planning_months,
            120
        );
    }
}
