// ==========================================
// 舰艇维护期排程核心 - 领域层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 领域层错误类型
///
/// 只描述数据完整性问题；排程核心本身不做 I/O，没有可重试的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// 日期字段无法解析 (空串、格式错误、非法日期)
    #[error("日期格式错误 (mp_id={mp_id}, 字段 {field}): 期望 YYYY-MM-DD 或 ISO-8601，实际 '{value}'")]
    MalformedDate {
        mp_id: String,
        field: &'static str,
        value: String,
    },

    #[error("未知枚举值 ({kind}): '{value}'")]
    UnknownEnumValue { kind: &'static str, value: String },
}

/// Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
