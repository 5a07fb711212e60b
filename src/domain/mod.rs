// ==========================================
// 舰艇维护期排程核心 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、日期解析
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod assignment;
pub mod error;
pub mod maintenance_period;
pub mod ship;
pub mod snapshot;
pub mod team;
pub mod types;

// 重导出核心类型
pub use assignment::Assignment;
pub use error::{DomainError, DomainResult};
pub use maintenance_period::{
    is_supported_date, parse_calendar_date, DateOrderIssue, MaintenancePeriod,
    MaintenancePeriodRecord, SUPPORTED_YEARS,
};
pub use ship::{Ship, UNKNOWN_SHIP_CODE, UNKNOWN_SHIP_NAME};
pub use snapshot::{RejectedMp, ResolvedPeriods, ScheduleSnapshot, SnapshotSummary};
pub use team::Team;
pub use types::{AssignmentStatus, MpStatus, MpType, Phase};
