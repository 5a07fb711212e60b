// ==========================================
// 舰艇维护期排程核心 - 时间轴渲染布局
// ==========================================
// 职责: 把 周序列 + 泳道分配 + 阶段段 组合为绝对定位几何
// 输入: ScheduleSnapshot (只读) + 可见窗口 [window_start, window_end]
// 输出: TimelineLayout (周列、月表头、团队行、MP 条形、图例)
// ==========================================
// 几何约定:
//   周列 left = 下标 × CELL_WIDTH
//   团队行高 = max(LANE_HEIGHT, 泳道数 × LANE_PITCH + ROW_PADDING)
//   团队行 top = HEADER_HEIGHT + 之前各行高度之和
//   条形 top (行内) = 泳道 × LANE_PITCH + BAR_TOP_PADDING
// 红线: 纯函数；不缓存、不增量；日期非法的 MP 单独剔除，其余照常渲染
// ==========================================

use crate::config::display::{
    PhaseColor, ACTIVE_CAPTION_MIN_WIDTH, BAR_HEIGHT, BAR_TOP_PADDING, CELL_WIDTH, HEADER_HEIGHT,
    LANE_HEIGHT, LANE_PITCH, PHASE_CAPTION_MIN_WIDTH, ROW_PADDING,
};
use crate::config::schedule_config::DerivationConfig;
use crate::domain::maintenance_period::MaintenancePeriod;
use crate::domain::ship::UNKNOWN_SHIP_NAME;
use crate::domain::snapshot::{RejectedMp, ScheduleSnapshot, SnapshotSummary};
use crate::domain::team::Team;
use crate::domain::types::{MpType, Phase};
use crate::engine::calendar::{group_weeks_by_month, iso_week_number, weeks_between};
use crate::engine::lanes::LaneAllocator;
use crate::engine::phase::{PhaseResolver, PhaseSegment};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::instrument;

// ==========================================
// 布局输出类型
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekColumn {
    pub week_start: NaiveDate,
    pub iso_week: u32,
    pub left: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthHeader {
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub weeks: usize,
    pub left: i64,
    pub width: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarSegment {
    pub phase: Phase,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub left: i64,
    pub width: i64, // 已做 1 像素兜底
    pub color: PhaseColor,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MpBar {
    pub mp_id: String,
    pub lane: usize,
    pub top: i64,
    pub height: i64,
    pub label: String,      // "SCH MP03-25"
    pub type_label: String, // IW / DOCK / LV
    pub mp_type: MpType,
    pub ship_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub segments: Vec<BarSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRow {
    pub team_id: String,
    pub team_name: String,
    pub mp_count: usize,
    pub lane_count: usize,
    pub top: i64,
    pub height: i64,
    pub bars: Vec<MpBar>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub phase: Phase,
    pub label: &'static str,
    pub color: PhaseColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineLayout {
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub weeks: Vec<WeekColumn>,
    pub months: Vec<MonthHeader>,
    pub grid_width: i64,
    pub header_height: i64,
    pub total_height: i64,
    pub rows: Vec<TeamRow>,
    pub legend: Vec<LegendEntry>,
    pub summary: SnapshotSummary,
    pub rejected: Vec<RejectedMp>,
}

impl TimelineLayout {
    pub fn row(&self, team_id: &str) -> Option<&TeamRow> {
        self.rows.iter().find(|r| r.team_id == team_id)
    }

    /// 按 MP 查找条形 (同一 MP 分派给多个团队时返回第一个)
    pub fn bar(&self, mp_id: &str) -> Option<&MpBar> {
        self.rows
            .iter()
            .flat_map(|r| r.bars.iter())
            .find(|b| b.mp_id == mp_id)
    }
}

/// 团队行高度
pub fn row_height(lane_count: usize) -> i64 {
    let lanes = i64::try_from(lane_count).unwrap_or(i64::MAX / LANE_PITCH);
    LANE_HEIGHT.max(lanes * LANE_PITCH + ROW_PADDING)
}

/// 条形在团队行内的 top
pub fn bar_top(lane: usize) -> i64 {
    let lane = i64::try_from(lane).unwrap_or(i64::MAX / LANE_PITCH);
    lane * LANE_PITCH + BAR_TOP_PADDING
}

/// 图例 (固定阶段顺序)
pub fn legend() -> Vec<LegendEntry> {
    Phase::ALL
        .iter()
        .map(|&phase| LegendEntry {
            phase,
            label: phase.legend_label(),
            color: PhaseColor::for_phase(phase),
        })
        .collect()
}

// ==========================================
// TimelineRenderer - 时间轴渲染器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct TimelineRenderer {
    resolver: PhaseResolver,
    allocator: LaneAllocator,
}

impl TimelineRenderer {
    pub fn new(config: &DerivationConfig) -> Self {
        Self {
            resolver: PhaseResolver::new(config),
            allocator: LaneAllocator::new(),
        }
    }

    /// 计算完整布局
    #[instrument(
        skip(self, snapshot),
        fields(
            teams = snapshot.teams.len(),
            mps = snapshot.mps.len(),
            assignments = snapshot.assignments.len()
        )
    )]
    pub fn render(
        &self,
        snapshot: &ScheduleSnapshot,
        window_start: NaiveDate,
        window_end: NaiveDate,
    ) -> TimelineLayout {
        let resolved = snapshot.resolve_periods();
        for rejected in &resolved.rejected {
            tracing::warn!(mp_id = %rejected.mp_id, reason = %rejected.reason, "maintenance period excluded from timeline");
        }
        for mp in &resolved.periods {
            let issues = mp.date_order_issues();
            if !issues.is_empty() {
                tracing::debug!(mp_id = %mp.id, ?issues, "maintenance period dates out of order");
            }
        }

        let week_starts = weeks_between(window_start, window_end);
        let weeks = week_columns(&week_starts);
        let months = month_headers(&week_starts);
        let grid_width = weeks.len() as i64 * CELL_WIDTH;

        let mut rows = Vec::with_capacity(snapshot.teams.len());
        let mut top = HEADER_HEIGHT;
        for team in &snapshot.teams {
            let row = self.team_row(snapshot, team, &resolved.periods, window_start, top);
            top += row.height;
            rows.push(row);
        }

        tracing::debug!(
            weeks = weeks.len(),
            rows = rows.len(),
            rejected = resolved.rejected.len(),
            "timeline layout computed"
        );

        TimelineLayout {
            window_start,
            window_end,
            weeks,
            months,
            grid_width,
            header_height: HEADER_HEIGHT,
            total_height: top,
            rows,
            legend: legend(),
            summary: snapshot.summary(),
            rejected: resolved.rejected,
        }
    }

    fn team_row(
        &self,
        snapshot: &ScheduleSnapshot,
        team: &Team,
        periods: &[MaintenancePeriod],
        timeline_start: NaiveDate,
        top: i64,
    ) -> TeamRow {
        let lane_map = self.allocator.allocate(&team.id, periods, &snapshot.assignments);
        let lane_count = lane_map.max_lanes();

        let bars: Vec<MpBar> = self
            .allocator
            .team_periods(&team.id, periods, &snapshot.assignments)
            .into_iter()
            .map(|mp| {
                let lane = lane_map.lane_of(&mp.id).unwrap_or(0);
                self.mp_bar(snapshot, mp, lane, timeline_start)
            })
            .collect();

        TeamRow {
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            mp_count: bars.len(),
            lane_count,
            top,
            height: row_height(lane_count),
            bars,
        }
    }

    fn mp_bar(
        &self,
        snapshot: &ScheduleSnapshot,
        mp: &MaintenancePeriod,
        lane: usize,
        timeline_start: NaiveDate,
    ) -> MpBar {
        let ship = snapshot.ship(&mp.ship_id);
        let label = mp.display_label(ship);
        let segments = self
            .resolver
            .phase_segments(mp, timeline_start)
            .iter()
            .map(|segment| bar_segment(segment, &label))
            .collect();

        MpBar {
            mp_id: mp.id.clone(),
            lane,
            top: bar_top(lane),
            height: BAR_HEIGHT,
            type_label: mp.mp_type.short_label().to_string(),
            mp_type: mp.mp_type,
            ship_name: ship
                .map(|s| s.name.clone())
                .unwrap_or_else(|| UNKNOWN_SHIP_NAME.to_string()),
            start_date: mp.start_date,
            end_date: mp.end_date,
            label,
            segments,
        }
    }
}

fn week_columns(week_starts: &[NaiveDate]) -> Vec<WeekColumn> {
    week_starts
        .iter()
        .enumerate()
        .map(|(i, &week_start)| WeekColumn {
            week_start,
            iso_week: iso_week_number(week_start),
            left: i as i64 * CELL_WIDTH,
        })
        .collect()
}

fn month_headers(week_starts: &[NaiveDate]) -> Vec<MonthHeader> {
    let mut left = 0;
    group_weeks_by_month(week_starts)
        .into_iter()
        .map(|group| {
            let width = group.weeks as i64 * CELL_WIDTH;
            let header = MonthHeader {
                label: group.label,
                year: group.year,
                month: group.month,
                weeks: group.weeks,
                left,
                width,
            };
            left += width;
            header
        })
        .collect()
}

fn bar_segment(segment: &PhaseSegment, mp_label: &str) -> BarSegment {
    // 标注判定使用未兜底的原始宽度
    let caption = match segment.phase {
        Phase::Active if segment.width > ACTIVE_CAPTION_MIN_WIDTH => Some(mp_label.to_string()),
        Phase::Active => None,
        phase if segment.width > PHASE_CAPTION_MIN_WIDTH => Some(phase.as_str().to_string()),
        _ => None,
    };

    BarSegment {
        phase: segment.phase,
        start: segment.start,
        end: segment.end,
        left: segment.start_offset,
        width: segment.display_width(),
        color: PhaseColor::for_phase(segment.phase),
        caption,
    }
}
