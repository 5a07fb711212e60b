// ==========================================
// 舰艇维护期排程核心 - 规划/收尾窗口推算
// ==========================================
// 职责: 由执行区间推算 planning_start / closeout_end (/ 预规划起点)
// 规则 (默认值，可由 DerivationConfig 覆盖):
//   在水维护 / 进坞: planning_start = start_date - 14 周
//   后勤访问:        planning_start = start_date - 4 周
//   closeout_end = end_date + 2 周
//   预规划起点 = planning_start - 9 个日历月 (仅 has_pre_planning)
// ==========================================

use crate::config::schedule_config::DerivationConfig;
use crate::domain::maintenance_period::MaintenancePeriodRecord;
use crate::domain::types::{MpStatus, MpType};
use crate::engine::calendar::sub_calendar_months;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// 推算结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedWindows {
    pub planning_start: NaiveDate,
    pub closeout_end: NaiveDate,
    pub pre_planning_start: Option<NaiveDate>,
}

/// 规划提前量 (周)
pub fn planning_lead_weeks(mp_type: MpType, config: &DerivationConfig) -> u32 {
    match mp_type {
        MpType::InWater | MpType::Docking => config.planning_lead_weeks,
        MpType::LogVisit => config.log_visit_lead_weeks,
    }
}

/// 推算规划/收尾窗口
///
/// 参数先截断到上限；结果超出日期表示范围时饱和到 `NaiveDate::MIN` / `MAX`，
/// 由记录校验拒绝。
pub fn derive_windows(
    mp_type: MpType,
    start_date: NaiveDate,
    end_date: NaiveDate,
    has_pre_planning: bool,
    config: &DerivationConfig,
) -> DerivedWindows {
    let config = config.bounded();
    let lead = Duration::weeks(i64::from(planning_lead_weeks(mp_type, &config)));
    let planning_start = start_date
        .checked_sub_signed(lead)
        .unwrap_or(NaiveDate::MIN);
    let closeout_end = end_date
        .checked_add_signed(Duration::weeks(i64::from(config.closeout_weeks)))
        .unwrap_or(NaiveDate::MAX);

    DerivedWindows {
        planning_start,
        closeout_end,
        pre_planning_start: has_pre_planning
            .then(|| sub_calendar_months(planning_start, config.pre_planning_months)),
    }
}

// ==========================================
// MaintenancePeriodDraft - 新建维护期表单
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenancePeriodDraft {
    pub ship_id: String,
    pub mp_number: i32,
    pub year: i32,
    #[serde(rename = "type")]
    pub mp_type: MpType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub has_pre_planning: bool,
}

impl MaintenancePeriodDraft {
    pub fn windows(&self, config: &DerivationConfig) -> DerivedWindows {
        derive_windows(
            self.mp_type,
            self.start_date,
            self.end_date,
            self.has_pre_planning,
            config,
        )
    }

    /// 生成完整记录 (状态 planned)；ID 与时间戳由调用方提供
    pub fn to_record(
        &self,
        id: impl Into<String>,
        timestamp: Option<String>,
        config: &DerivationConfig,
    ) -> MaintenancePeriodRecord {
        let windows = self.windows(config);
        MaintenancePeriodRecord {
            id: id.into(),
            ship_id: self.ship_id.clone(),
            mp_number: self.mp_number,
            year: self.year,
            mp_type: self.mp_type,
            status: MpStatus::Planned,
            start_date: format_date(self.start_date),
            end_date: format_date(self.end_date),
            planning_start: format_date(windows.planning_start),
            closeout_end: format_date(windows.closeout_end),
            has_pre_planning: self.has_pre_planning,
            created_at: timestamp.clone(),
            updated_at: timestamp,
        }
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
