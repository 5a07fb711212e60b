// ==========================================
// 舰艇维护期排程核心 - 输入校验
// ==========================================
// 职责: 新建/导入数据的字段规则校验，一次返回全部违规
// 规则:
//   舰艇名称 1-100 字符，舰艇代码 2-5 字符
//   MP 序号 1-99，年度 2020-2100，start_date ≤ end_date
//   日期年份 1-9999
//   团队名称 1-50 字符
//   分派周数 1-52
// ==========================================

use crate::domain::assignment::Assignment;
use crate::domain::maintenance_period::{
    is_supported_date, parse_calendar_date, MaintenancePeriodRecord, SUPPORTED_YEARS,
};
use crate::domain::ship::Ship;
use crate::domain::team::Team;
use crate::engine::window_derivation::MaintenancePeriodDraft;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const SHIP_NAME_LEN: RangeInclusive<usize> = 1..=100;
pub const SHIP_CODE_LEN: RangeInclusive<usize> = 2..=5;
pub const TEAM_NAME_LEN: RangeInclusive<usize> = 1..=50;
pub const MP_NUMBER_RANGE: RangeInclusive<i32> = 1..=99;
pub const YEAR_RANGE: RangeInclusive<i32> = 2020..=2100;
pub const WEEKS_ALLOCATED_RANGE: RangeInclusive<i32> = 1..=52;

/// 校验违规详情
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub field: String,
    pub message: String,
}

impl ValidationViolation {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

// ==========================================
// 字段规则
// ==========================================

fn check_len(
    violations: &mut Vec<ValidationViolation>,
    field: &str,
    value: &str,
    range: RangeInclusive<usize>,
) {
    let len = value.chars().count();
    if !range.contains(&len) {
        violations.push(ValidationViolation::new(
            field,
            format!(
                "长度须在 {}-{} 个字符之间，实际 {}",
                range.start(),
                range.end(),
                len
            ),
        ));
    }
}

fn check_range(
    violations: &mut Vec<ValidationViolation>,
    field: &str,
    value: i32,
    range: RangeInclusive<i32>,
) {
    if !range.contains(&value) {
        violations.push(ValidationViolation::new(
            field,
            format!("取值须在 {}-{} 之间，实际 {}", range.start(), range.end(), value),
        ));
    }
}

fn check_supported_date(violations: &mut Vec<ValidationViolation>, field: &str, date: NaiveDate) {
    if !is_supported_date(date) {
        violations.push(ValidationViolation::new(
            field,
            format!(
                "日期年份须在 {}-{} 之间，实际 {}",
                SUPPORTED_YEARS.start(),
                SUPPORTED_YEARS.end(),
                date
            ),
        ));
    }
}

fn check_execution_order(
    violations: &mut Vec<ValidationViolation>,
    start_date: NaiveDate,
    end_date: NaiveDate,
) {
    if start_date > end_date {
        violations.push(ValidationViolation::new(
            "end_date",
            format!("执行结束 {} 早于执行开始 {}", end_date, start_date),
        ));
    }
}

// ==========================================
// 实体校验
// ==========================================

pub fn validate_ship(ship: &Ship) -> Vec<ValidationViolation> {
    let mut violations = Vec::new();
    check_len(&mut violations, "name", &ship.name, SHIP_NAME_LEN);
    check_len(&mut violations, "code", &ship.code, SHIP_CODE_LEN);
    violations
}

pub fn validate_team_name(name: &str) -> Vec<ValidationViolation> {
    let mut violations = Vec::new();
    check_len(&mut violations, "name", name, TEAM_NAME_LEN);
    violations
}

pub fn validate_team(team: &Team) -> Vec<ValidationViolation> {
    validate_team_name(&team.name)
}

pub fn validate_weeks_allocated(weeks_allocated: i32) -> Vec<ValidationViolation> {
    let mut violations = Vec::new();
    check_range(
        &mut violations,
        "weeks_allocated",
        weeks_allocated,
        WEEKS_ALLOCATED_RANGE,
    );
    violations
}

pub fn validate_assignment(assignment: &Assignment) -> Vec<ValidationViolation> {
    validate_weeks_allocated(assignment.weeks_allocated)
}

pub fn validate_mp_draft(draft: &MaintenancePeriodDraft) -> Vec<ValidationViolation> {
    let mut violations = Vec::new();
    check_range(&mut violations, "mp_number", draft.mp_number, MP_NUMBER_RANGE);
    check_range(&mut violations, "year", draft.year, YEAR_RANGE);
    check_supported_date(&mut violations, "start_date", draft.start_date);
    check_supported_date(&mut violations, "end_date", draft.end_date);
    check_execution_order(&mut violations, draft.start_date, draft.end_date);
    violations
}

/// 校验完整记录 (导入/写入前)：字段范围 + 四个日期可解析 + 执行区间有序
pub fn validate_mp_record(record: &MaintenancePeriodRecord) -> Vec<ValidationViolation> {
    let mut violations = Vec::new();
    check_range(&mut violations, "mp_number", record.mp_number, MP_NUMBER_RANGE);
    check_range(&mut violations, "year", record.year, YEAR_RANGE);

    let mut parse = |field: &str, raw: &str| {
        let parsed = parse_calendar_date(raw);
        if parsed.is_none() {
            violations.push(ValidationViolation::new(
                field,
                format!("日期格式错误: '{}'", raw),
            ));
        }
        parsed
    };

    let start = parse("start_date", &record.start_date);
    let end = parse("end_date", &record.end_date);
    parse("planning_start", &record.planning_start);
    parse("closeout_end", &record.closeout_end);

    if let (Some(start), Some(end)) = (start, end) {
        check_execution_order(&mut violations, start, end);
    }
    violations
}
