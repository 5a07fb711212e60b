// ==========================================
// 舰艇维护期排程核心 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供界面层 / 命令行调用
// ==========================================

pub mod error;
pub mod gantt_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use gantt_api::GanttApi;
