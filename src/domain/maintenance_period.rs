// ==========================================
// 舰艇维护期排程核心 - 维护期 (MP) 领域模型
// ==========================================
// MaintenancePeriodRecord: 存储/接口层的原始记录 (日期为字符串)
// MaintenancePeriod:       校验后的排程输入 (日期为 NaiveDate)
// ==========================================
// 红线: 任何几何计算之前必须完成日期解析，禁止带着非法日期进入引擎
// ==========================================

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::ship::{Ship, UNKNOWN_SHIP_CODE};
use crate::domain::types::{MpStatus, MpType};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use std::ops::RangeInclusive;
use serde::{Deserialize, Serialize};

// ==========================================
// MaintenancePeriodRecord - 原始记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenancePeriodRecord {
    pub id: String,                 // 维护期ID
    pub ship_id: String,            // 关联舰艇
    pub mp_number: i32,             // 序号 (如 03)
    pub year: i32,                  // 年度
    #[serde(rename = "type")]
    pub mp_type: MpType,            // 类型
    #[serde(default)]
    pub status: MpStatus,           // 状态
    pub start_date: String,         // 执行开始 YYYY-MM-DD
    pub end_date: String,           // 执行结束 YYYY-MM-DD
    pub planning_start: String,     // 规划开始 (自动推算)
    pub closeout_end: String,       // 收尾结束 (自动推算)
    #[serde(default)]
    pub has_pre_planning: bool,     // 是否包含预规划阶段
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

// ==========================================
// MaintenancePeriod - 已校验的维护期
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenancePeriod {
    pub id: String,
    pub ship_id: String,
    pub mp_number: i32,
    pub year: i32,
    pub mp_type: MpType,
    pub status: MpStatus,
    pub planning_start: NaiveDate,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub closeout_end: NaiveDate,
    pub has_pre_planning: bool,
}

/// 日期先后约束被违反的字段对 (earlier 应 ≤ later)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateOrderIssue {
    pub earlier: &'static str,
    pub later: &'static str,
}

impl MaintenancePeriod {
    /// 占用区间 [planning_start, closeout_end]，泳道碰撞检测使用
    #[inline]
    pub fn occupied_interval(&self) -> (NaiveDate, NaiveDate) {
        (self.planning_start, self.closeout_end)
    }

    /// 检查 planning_start ≤ start_date ≤ end_date ≤ closeout_end
    ///
    /// 只做报告，不阻断渲染（倒置区间按退化宽度显示）。
    pub fn date_order_issues(&self) -> Vec<DateOrderIssue> {
        let chain = [
            ("planning_start", self.planning_start),
            ("start_date", self.start_date),
            ("end_date", self.end_date),
            ("closeout_end", self.closeout_end),
        ];

        chain
            .windows(2)
            .filter(|pair| pair[0].1 > pair[1].1)
            .map(|pair| DateOrderIssue {
                earlier: pair[0].0,
                later: pair[1].0,
            })
            .collect()
    }

    /// 时间轴标签，如 "SCH MP03-25"；舰艇引用悬空时使用 "???"
    pub fn display_label(&self, ship: Option<&Ship>) -> String {
        let code = ship.map(|s| s.code.as_str()).unwrap_or(UNKNOWN_SHIP_CODE);
        format!(
            "{} MP{:02}-{:02}",
            code,
            self.mp_number,
            self.year.rem_euclid(100)
        )
    }
}

impl TryFrom<&MaintenancePeriodRecord> for MaintenancePeriod {
    type Error = DomainError;

    fn try_from(record: &MaintenancePeriodRecord) -> DomainResult<Self> {
        let field = |name: &'static str, value: &str| parse_mp_date(&record.id, name, value);

        Ok(Self {
            id: record.id.clone(),
            ship_id: record.ship_id.clone(),
            mp_number: record.mp_number,
            year: record.year,
            mp_type: record.mp_type,
            status: record.status,
            planning_start: field("planning_start", &record.planning_start)?,
            start_date: field("start_date", &record.start_date)?,
            end_date: field("end_date", &record.end_date)?,
            closeout_end: field("closeout_end", &record.closeout_end)?,
            has_pre_planning: record.has_pre_planning,
        })
    }
}

impl From<&MaintenancePeriod> for MaintenancePeriodRecord {
    fn from(mp: &MaintenancePeriod) -> Self {
        Self {
            id: mp.id.clone(),
            ship_id: mp.ship_id.clone(),
            mp_number: mp.mp_number,
            year: mp.year,
            mp_type: mp.mp_type,
            status: mp.status,
            start_date: mp.start_date.format("%Y-%m-%d").to_string(),
            end_date: mp.end_date.format("%Y-%m-%d").to_string(),
            planning_start: mp.planning_start.format("%Y-%m-%d").to_string(),
            closeout_end: mp.closeout_end.format("%Y-%m-%d").to_string(),
            has_pre_planning: mp.has_pre_planning,
            created_at: None,
            updated_at: None,
        }
    }
}

// ==========================================
// 日期解析
// ==========================================

/// 可参与排程的年份范围；超出范围的日期按格式错误处理
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

/// 日期是否落在 [`SUPPORTED_YEARS`] 内
#[inline]
pub fn is_supported_date(date: NaiveDate) -> bool {
    SUPPORTED_YEARS.contains(&date.year())
}

/// 解析日历日期
///
/// 接受:
/// - `YYYY-MM-DD`
/// - RFC 3339 (`2025-03-01T00:00:00Z`, `2025-03-01T10:00:00+10:00`)，取其本地日期部分
/// - 无时区的日期时间 (`2025-03-01T00:00:00`, `2025-03-01 00:00:00.000`)
///
/// 年份不在 [`SUPPORTED_YEARS`] 内时返回 None (如 `+262142-12-31`)。
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let parsed = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.naive_local().date())
        })
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        });

    parsed.filter(|d| is_supported_date(*d))
}

fn parse_mp_date(mp_id: &str, field: &'static str, value: &str) -> DomainResult<NaiveDate> {
    parse_calendar_date(value).ok_or_else(|| DomainError::MalformedDate {
        mp_id: mp_id.to_string(),
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(planning_start: &str) -> MaintenancePeriodRecord {
        MaintenancePeriodRecord {
            id: "mp-001".to_string(),
            ship_id: "ship-001".to_string(),
            mp_number: 3,
            year: 2025,
            mp_type: MpType::InWater,
            status: MpStatus::Planned,
            start_date: "2025-03-01".to_string(),
            end_date: "2025-05-30".to_string(),
            planning_start: planning_start.to_string(),
            closeout_end: "2025-06-13".to_string(),
            has_pre_planning: false,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_parse_calendar_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 11, 23).unwrap();
        assert_eq!(parse_calendar_date("2024-11-23"), Some(expected));
        assert_eq!(parse_calendar_date(" 2024-11-23 "), Some(expected));
        assert_eq!(parse_calendar_date("2024-11-23T00:00:00Z"), Some(expected));
        assert_eq!(parse_calendar_date("2024-11-23T00:00:00.000Z"), Some(expected));
        assert_eq!(parse_calendar_date("2024-11-23T23:30:00+10:00"), Some(expected));
        assert_eq!(parse_calendar_date("2024-11-23 08:15:00"), Some(expected));
    }

    #[test]
    fn test_parse_calendar_date_rejects_garbage() {
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("not a date"), None);
        assert_eq!(parse_calendar_date("2025-02-30"), None);
        assert_eq!(parse_calendar_date("23/11/2024"), None);
    }

    #[test]
    fn test_parse_calendar_date_rejects_unsupported_years() {
        assert_eq!(parse_calendar_date("+262142-12-31"), None);
        assert_eq!(parse_calendar_date("-0005-01-01"), None);
        assert_eq!(parse_calendar_date("0000-12-31"), None);
        assert!(parse_calendar_date("0001-01-01").is_some());
        assert!(parse_calendar_date("9999-12-31").is_some());
        assert_eq!(parse_calendar_date("10000-01-01"), None);
    }

    #[test]
    fn test_try_from_record_reports_field() {
        let err = MaintenancePeriod::try_from(&record("garbage")).unwrap_err();
        assert_eq!(
            err,
            DomainError::MalformedDate {
                mp_id: "mp-001".to_string(),
                field: "planning_start",
                value: "garbage".to_string(),
            }
        );
    }

    #[test]
    fn test_round_trip_through_record() {
        let mp = MaintenancePeriod::try_from(&record("2024-11-23T00:00:00.000Z")).unwrap();
        assert_eq!(mp.planning_start, NaiveDate::from_ymd_opt(2024, 11, 23).unwrap());
        assert!(mp.date_order_issues().is_empty());

        let back = MaintenancePeriodRecord::from(&mp);
        assert_eq!(back.planning_start, "2024-11-23");
    }

    #[test]
    fn test_date_order_issues() {
        let mut r = record("2024-11-23");
        r.end_date = "2025-02-01".to_string();
        let mp = MaintenancePeriod::try_from(&r).unwrap();
        let issues = mp.date_order_issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].earlier, "start_date");
        assert_eq!(issues[0].later, "end_date");
    }

    #[test]
    fn test_display_label() {
        let mp = MaintenancePeriod::try_from(&record("2024-11-23")).unwrap();
        let ship = Ship::new("ship-001", "Cape Schanck", "SCH");
        assert_eq!(mp.display_label(Some(&ship)), "SCH MP03-25");
        assert_eq!(mp.display_label(None), "??? MP03-25");
    }
}
