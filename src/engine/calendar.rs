// ==========================================
// 舰艇维护期排程核心 - 日历/周工具
// ==========================================
// 职责: 纯日期运算 (周归整、周数、像素偏移、月份分组、ISO 周号)
// 红线: 全部使用 NaiveDate (无时区)，结果与区域设置无关
// 红线: 月份加减使用真实日历月 (chrono::Months)，禁止 30 天近似
// ==========================================

use crate::config::display::CELL_WIDTH;
use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;

/// 月份分组 (表头使用)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGroup {
    pub year: i32,
    pub month: u32,    // 1-12
    pub label: String, // 月份缩写，如 "Nov"
    pub weeks: usize,  // 该月份包含的周列数
}

/// 包含 `date` 的那一周的周日
///
/// 幂等: `week_start(week_start(d)) == week_start(d)`
///
/// 表示范围最前一周不完整，此时返回 `date` 本身。
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = Duration::days(i64::from(date.weekday().num_days_from_sunday()));
    date.checked_sub_signed(back).unwrap_or(date)
}

/// 前一天；已是 `NaiveDate::MIN` 时保持不变
#[inline]
pub fn prev_day(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}

/// 后一天；已是 `NaiveDate::MAX` 时保持不变
#[inline]
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

/// `[week_start(start), week_start(end)]` 之间的全部周起点（含两端，步长 7 天）
///
/// `end` 早于 `start` 所在周时返回空序列。
pub fn weeks_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let end_week = week_start(end);
    let mut current = week_start(start);
    let mut weeks = Vec::new();

    while current <= end_week {
        weeks.push(current);
        match current.checked_add_signed(Duration::days(7)) {
            Some(next) => current = next,
            None => break,
        }
    }

    weeks
}

/// 从 `start` 所在周到 `end` 所在周的周数（含首周）
///
/// `ceil((week_start(end) - week_start(start)) / 7天) + 1`；两端均为周日，差值恒为 7 的整数倍。
/// `end >= start` 时结果 ≥ 1；`end` 所在周早于 `start` 所在周时结果 ≤ 0。
pub fn week_count(start: NaiveDate, end: NaiveDate) -> i64 {
    let diff_days = (week_start(end) - week_start(start)).num_days();
    diff_days / 7 + 1
}

/// 日期相对时间轴起点的像素偏移，可为负
pub fn pixel_offset(date: NaiveDate, timeline_start: NaiveDate) -> i64 {
    (week_count(timeline_start, date) - 1) * CELL_WIDTH
}

/// 区间的条形宽度（像素）
///
/// 非空区间至少一个周列宽；倒置区间可能为 0 或负，由调用方做 1 像素兜底。
pub fn bar_width(start: NaiveDate, end: NaiveDate) -> i64 {
    week_count(start, end) * CELL_WIDTH
}

/// 把周序列按 (年, 月) 切分为连续分组，保持输入顺序
pub fn group_weeks_by_month(weeks: &[NaiveDate]) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();

    for week in weeks {
        match groups.last_mut() {
            Some(last) if last.year == week.year() && last.month == week.month() => {
                last.weeks += 1;
            }
            _ => groups.push(MonthGroup {
                year: week.year(),
                month: week.month(),
                label: week.format("%b").to_string(),
                weeks: 1,
            }),
        }
    }

    groups
}

/// ISO-8601 周号（周一为一周之始，以周四归属年份）
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// ISO-8601 (周年, 周号)
pub fn iso_week(date: NaiveDate) -> (i32, u32) {
    let w = date.iso_week();
    (w.year(), w.week())
}

/// 减去日历月；目标月份天数不足时取月末（如 3-31 减 1 月 → 2-28/29）
///
/// 超出 NaiveDate 表示范围时饱和到 `NaiveDate::MIN`。
pub fn sub_calendar_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

/// 加上日历月；规则同 [`sub_calendar_months`]，溢出时饱和到 `NaiveDate::MAX`
pub fn add_calendar_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// 按有符号月数平移
pub fn shift_calendar_months(date: NaiveDate, months: i32) -> NaiveDate {
    if months >= 0 {
        add_calendar_months(date, months.unsigned_abs())
    } else {
        sub_calendar_months(date, months.unsigned_abs())
    }
}

/// 当月 1 日
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// 当月最后一天
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    match first_of_month(date).checked_add_months(Months::new(1)) {
        Some(next_month) => prev_day(next_month),
        None => NaiveDate::MAX,
    }
}
