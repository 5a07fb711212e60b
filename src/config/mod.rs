// ==========================================
// 舰艇维护期排程核心 - 配置层
// ==========================================
// 职责: 显示常量 (编译期) + 排程参数 (config_kv 可覆写)
// ==========================================

pub mod config_manager;
pub mod display;
pub mod schedule_config;

// 重导出核心配置
pub use config_manager::{config_keys, ConfigManager, ConfigResult, ScheduleConfigReader};
pub use display::{
    PhaseColor, BAR_HEIGHT, BAR_TOP_PADDING, CELL_WIDTH, HEADER_HEIGHT, LANE_HEIGHT, LANE_PITCH,
    MIN_BAR_WIDTH, ROW_PADDING,
};
pub use schedule_config::{
    DerivationConfig, ScheduleConfig, ViewConfig, MAX_PRE_PLANNING_MONTHS, MAX_WINDOW_WEEKS,
};
