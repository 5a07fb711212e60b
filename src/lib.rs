// ==========================================
// 舰艇维护期排程核心 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 维护期甘特时间轴的阶段解析 / 泳道分配 / 布局计算
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 日历 / 阶段 / 泳道 / 布局
pub mod engine;

// 配置层 - 显示常量与排程参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AssignmentStatus, MpStatus, MpType, Phase};

// 领域实体
pub use domain::{
    Assignment, DomainError, MaintenancePeriod, MaintenancePeriodRecord, ScheduleSnapshot, Ship,
    Team,
};

// 引擎
pub use engine::{
    LaneAllocator, LaneMap, PhaseResolver, PhaseSegment, TimelineLayout, TimelineRenderer,
    TimelineView,
};

// 配置
pub use config::{ScheduleConfig, ScheduleConfigReader};

// API
pub use api::{ApiError, ApiResult, GanttApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "舰艇维护期排程核心";
