// ==========================================
// 舰艇维护期排程核心 - 阶段解析器
// ==========================================
// 职责: 由 MP 的四个关键日期 (+ 预规划标志) 推导有序阶段段
// 输入: MaintenancePeriod + 时间轴起点
// 输出: [预规划?, 规划, 执行, 收尾] 的日期区间与像素几何
// ==========================================
// 区间约定 (含两端):
//   预规划 [planning_start - 9 个日历月, planning_start - 1 天]
//   规划   [planning_start, start_date - 1 天]
//   执行   [start_date, end_date]
//   收尾   [end_date + 1 天, closeout_end]
// 红线: 规划/执行/收尾三段必出，即使退化；只有预规划可缺省
// ==========================================

use crate::config::display::MIN_BAR_WIDTH;
use crate::config::schedule_config::DerivationConfig;
use crate::domain::maintenance_period::MaintenancePeriod;
use crate::domain::types::Phase;
use crate::engine::calendar::{bar_width, next_day, pixel_offset, prev_day, sub_calendar_months};
use chrono::NaiveDate;
use serde::Serialize;

/// 一个阶段段 (日期区间 + 相对时间轴起点的像素几何)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseSegment {
    pub phase: Phase,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub start_offset: i64, // 像素，可为负
    pub width: i64,        // 像素，倒置区间可能 ≤ 0
}

impl PhaseSegment {
    /// 渲染宽度：至少 1 像素，避免条形不可见
    #[inline]
    pub fn display_width(&self) -> i64 {
        self.width.max(MIN_BAR_WIDTH)
    }

    /// 区间是否倒置 (end < start)
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.end < self.start
    }
}

// ==========================================
// PhaseResolver - 阶段解析器
// ==========================================
#[derive(Debug, Clone)]
pub struct PhaseResolver {
    pre_planning_months: u32,
}

impl Default for PhaseResolver {
    fn default() -> Self {
        Self::new(&DerivationConfig::default())
    }
}

impl PhaseResolver {
    pub fn new(config: &DerivationConfig) -> Self {
        Self {
            pre_planning_months: config.bounded().pre_planning_months,
        }
    }

    /// 预规划开始日期 (以 planning_start 为锚点减日历月)；未启用预规划时为 None
    pub fn pre_planning_start(&self, mp: &MaintenancePeriod) -> Option<NaiveDate> {
        mp.has_pre_planning
            .then(|| sub_calendar_months(mp.planning_start, self.pre_planning_months))
    }

    /// 各阶段日期区间 (固定顺序，含两端)
    pub fn phase_intervals(&self, mp: &MaintenancePeriod) -> Vec<(Phase, NaiveDate, NaiveDate)> {
        let mut intervals = Vec::with_capacity(4);

        if let Some(pre_start) = self.pre_planning_start(mp) {
            intervals.push((Phase::PrePlanning, pre_start, prev_day(mp.planning_start)));
        }

        intervals.push((Phase::Planning, mp.planning_start, prev_day(mp.start_date)));
        intervals.push((Phase::Active, mp.start_date, mp.end_date));
        intervals.push((Phase::Closeout, next_day(mp.end_date), mp.closeout_end));

        intervals
    }

    /// 计算阶段段几何
    pub fn phase_segments(
        &self,
        mp: &MaintenancePeriod,
        timeline_start: NaiveDate,
    ) -> Vec<PhaseSegment> {
        self.phase_intervals(mp)
            .into_iter()
            .map(|(phase, start, end)| {
                let segment = PhaseSegment {
                    phase,
                    start,
                    end,
                    start_offset: pixel_offset(start, timeline_start),
                    width: bar_width(start, end),
                };
                if segment.is_degenerate() {
                    tracing::debug!(
                        mp_id = %mp.id,
                        phase = %phase,
                        start = %start,
                        end = %end,
                        "degenerate phase interval"
                    );
                }
                segment
            })
            .collect()
    }

    /// 单点查询：日期所处阶段；落在整个包络之外时为 None
    ///
    /// 判定边界与 [`Self::phase_intervals`] 完全一致。
    pub fn phase_at(&self, mp: &MaintenancePeriod, date: NaiveDate) -> Option<Phase> {
        if date < mp.planning_start {
            return match self.pre_planning_start(mp) {
                Some(pre_start) if date >= pre_start => Some(Phase::PrePlanning),
                _ => None,
            };
        }
        if date < mp.start_date {
            return Some(Phase::Planning);
        }
        if date <= mp.end_date {
            return Some(Phase::Active);
        }
        if date <= mp.closeout_end {
            return Some(Phase::Closeout);
        }
        None
    }
}

/// 使用默认参数 (预规划 9 个月) 计算阶段段
pub fn phase_segments(mp: &MaintenancePeriod, timeline_start: NaiveDate) -> Vec<PhaseSegment> {
    PhaseResolver::default().phase_segments(mp, timeline_start)
}

/// 使用默认参数查询日期所处阶段
pub fn phase_at(mp: &MaintenancePeriod, date: NaiveDate) -> Option<Phase> {
    PhaseResolver::default().phase_at(mp, date)
}
