// ==========================================
// 舰艇维护期排程核心 - 排程输入快照
// ==========================================
// 职责: 一次渲染所需的只读数据集合 (舰艇/维护期/团队/分派)
// 红线: 快照只读；派生数据 (阶段、泳道、像素) 每次渲染重新计算，不回写
// ==========================================

use crate::domain::assignment::Assignment;
use crate::domain::maintenance_period::{MaintenancePeriod, MaintenancePeriodRecord};
use crate::domain::ship::Ship;
use crate::domain::team::Team;
use crate::domain::types::MpStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    pub ships: Vec<Ship>,
    pub mps: Vec<MaintenancePeriodRecord>,
    pub teams: Vec<Team>,
    pub assignments: Vec<Assignment>,
}

/// 无法进入排程的维护期 (日期非法等)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedMp {
    pub mp_id: String,
    pub reason: String,
}

/// 快照解析结果: 合法的维护期 + 被拒绝的维护期
#[derive(Debug, Clone, Default)]
pub struct ResolvedPeriods {
    pub periods: Vec<MaintenancePeriod>,
    pub rejected: Vec<RejectedMp>,
}

/// 驾驶舱汇总
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotSummary {
    pub ship_count: usize,
    pub mp_count: usize,
    pub team_count: usize,
    pub planned_mp_count: usize,
    pub active_mp_count: usize,
    pub completed_mp_count: usize,
    pub total_weeks_allocated: i64,
}

impl ScheduleSnapshot {
    pub fn ship(&self, ship_id: &str) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id == ship_id)
    }

    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    pub fn mp_record(&self, mp_id: &str) -> Option<&MaintenancePeriodRecord> {
        self.mps.iter().find(|m| m.id == mp_id)
    }

    /// 逐条解析维护期记录；单条失败不影响其他记录
    pub fn resolve_periods(&self) -> ResolvedPeriods {
        let mut resolved = ResolvedPeriods::default();

        for record in &self.mps {
            match MaintenancePeriod::try_from(record) {
                Ok(mp) => resolved.periods.push(mp),
                Err(e) => resolved.rejected.push(RejectedMp {
                    mp_id: record.id.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        resolved
    }

    pub fn summary(&self) -> SnapshotSummary {
        let count_status = |status: MpStatus| self.mps.iter().filter(|m| m.status == status).count();

        SnapshotSummary {
            ship_count: self.ships.len(),
            mp_count: self.mps.len(),
            team_count: self.teams.len(),
            planned_mp_count: count_status(MpStatus::Planned),
            active_mp_count: count_status(MpStatus::Active),
            completed_mp_count: count_status(MpStatus::Completed),
            total_weeks_allocated: self
                .assignments
                .iter()
                .map(|a| i64::from(a.weeks_allocated))
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::MpType;

    fn record(id: &str, start: &str, status: MpStatus) -> MaintenancePeriodRecord {
        MaintenancePeriodRecord {
            id: id.to_string(),
            ship_id: "ship-001".to_string(),
            mp_number: 1,
            year: 2025,
            mp_type: MpType::Docking,
            status,
            start_date: start.to_string(),
            end_date: "2025-05-30".to_string(),
            planning_start: "2024-11-23".to_string(),
            closeout_end: "2025-06-13".to_string(),
            has_pre_planning: false,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_resolve_periods_isolates_bad_records() {
        let snapshot = ScheduleSnapshot {
            mps: vec![
                record("mp-1", "2025-03-01", MpStatus::Planned),
                record("mp-2", "03/01/2025", MpStatus::Planned),
                record("mp-3", "2025-03-08", MpStatus::Active),
            ],
            ..Default::default()
        };

        let resolved = snapshot.resolve_periods();
        let ids: Vec<&str> = resolved.periods.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["mp-1", "mp-3"]);
        assert_eq!(resolved.rejected.len(), 1);
        assert_eq!(resolved.rejected[0].mp_id, "mp-2");
        assert!(resolved.rejected[0].reason.contains("start_date"));
    }

    #[test]
    fn test_summary_counts() {
        let snapshot = ScheduleSnapshot {
            ships: vec![Ship::new("ship-001", "Cape Schanck", "SCH")],
            mps: vec![
                record("mp-1", "2025-03-01", MpStatus::Planned),
                record("mp-2", "2025-03-01", MpStatus::Active),
            ],
            teams: vec![Team::new("t1", "Alpha")],
            assignments: vec![
                Assignment::new("a1", "mp-1", "t1", 16),
                Assignment::new("a2", "mp-2", "t1", 20),
            ],
        };

        let summary = snapshot.summary();
        assert_eq!(summary.mp_count, 2);
        assert_eq!(summary.planned_mp_count, 1);
        assert_eq!(summary.active_mp_count, 1);
        assert_eq!(summary.total_weeks_allocated, 36);
    }
}
