// ==========================================
// 舰艇维护期排程核心 - 引擎层
// ==========================================
// 职责: 日历运算、阶段解析、泳道分配、时间轴布局
// 红线: Engine 不做 I/O、不拼 SQL；同一输入快照的输出确定且可复现
// ==========================================

pub mod calendar;
pub mod lanes;
pub mod phase;
pub mod timeline;
pub mod validation;
pub mod view;
pub mod window_derivation;

// 重导出核心引擎
pub use calendar::{
    bar_width, group_weeks_by_month, iso_week_number, pixel_offset, week_count, week_start,
    weeks_between, MonthGroup,
};
pub use lanes::{lane_of, max_lanes, LaneAllocator, LaneMap};
pub use phase::{phase_at, phase_segments, PhaseResolver, PhaseSegment};
pub use timeline::{
    BarSegment, LegendEntry, MonthHeader, MpBar, TeamRow, TimelineLayout, TimelineRenderer,
    WeekColumn,
};
pub use validation::ValidationViolation;
pub use view::TimelineView;
pub use window_derivation::{derive_windows, DerivedWindows, MaintenancePeriodDraft};
