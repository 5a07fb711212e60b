// ==========================================
// 舰艇维护期排程核心 - 泳道分配器
// ==========================================
// 职责: 为某团队名下的 MP 分配互不重叠的垂直泳道
// 占用区间: [planning_start, closeout_end] (完整可视足迹，与当前阶段无关)
// ==========================================
// 算法 (贪心区间划分，单遍):
// 1) 过滤出至少有一条分派指向该团队的 MP
// 2) 按 planning_start 升序稳定排序 (并列保持输入顺序)
// 3) 依次扫描泳道，放入第一条 "结束日期 < 本 MP planning_start" 的泳道；
//    没有则新开一条；该泳道结束日期更新为本 MP 的 closeout_end
// 红线: 并列规则 (稳定排序 + 按泳道下标首次适配) 决定可复现的显示结果，禁止改动
// ==========================================

use crate::domain::assignment::Assignment;
use crate::domain::maintenance_period::MaintenancePeriod;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::instrument;

// ==========================================
// LaneMap - MP → 泳道下标
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LaneMap {
    lanes: BTreeMap<String, usize>,
    lane_count: usize,
}

impl LaneMap {
    pub fn lane_of(&self, mp_id: &str) -> Option<usize> {
        self.lanes.get(mp_id).copied()
    }

    /// 实际开出的泳道数 (无 MP 时为 0)
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// 团队行所需泳道数: max(泳道下标) + 1，最少为 1
    pub fn max_lanes(&self) -> usize {
        self.lane_count.max(1)
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// 按 MP ID 有序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.lanes.iter().map(|(id, lane)| (id.as_str(), *lane))
    }
}

// ==========================================
// LaneAllocator - 泳道分配器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct LaneAllocator;

impl LaneAllocator {
    pub fn new() -> Self {
        Self
    }

    /// 该团队名下的 MP (保持 mps 输入顺序)
    ///
    /// 指向不存在 MP 的分派被忽略。
    pub fn team_periods<'a>(
        &self,
        team_id: &str,
        mps: &'a [MaintenancePeriod],
        assignments: &[Assignment],
    ) -> Vec<&'a MaintenancePeriod> {
        let assigned: HashSet<&str> = assignments
            .iter()
            .filter(|a| a.team_id == team_id)
            .map(|a| a.mp_id.as_str())
            .collect();

        mps.iter()
            .filter(|mp| assigned.contains(mp.id.as_str()))
            .collect()
    }

    /// 分配泳道
    #[instrument(skip(self, mps, assignments), fields(mp_total = mps.len()))]
    pub fn allocate(
        &self,
        team_id: &str,
        mps: &[MaintenancePeriod],
        assignments: &[Assignment],
    ) -> LaneMap {
        let mut team_mps = self.team_periods(team_id, mps, assignments);
        // sort_by_key 为稳定排序
        team_mps.sort_by_key(|mp| mp.occupied_interval().0);

        let mut lane_ends: Vec<NaiveDate> = Vec::new();
        let mut lanes = BTreeMap::new();

        for mp in team_mps {
            let (occupied_from, occupied_to) = mp.occupied_interval();
            let lane = lane_ends
                .iter()
                .position(|end| *end < occupied_from)
                .unwrap_or(lane_ends.len());

            if lane == lane_ends.len() {
                lane_ends.push(occupied_to);
            } else {
                lane_ends[lane] = occupied_to;
            }

            tracing::debug!(
                mp_id = %mp.id,
                lane,
                occupied_from = %occupied_from,
                occupied_to = %occupied_to,
                "lane assigned"
            );
            lanes.insert(mp.id.clone(), lane);
        }

        LaneMap {
            lanes,
            lane_count: lane_ends.len(),
        }
    }

    /// 团队行所需泳道数 (≥ 1)
    pub fn max_lanes(
        &self,
        team_id: &str,
        mps: &[MaintenancePeriod],
        assignments: &[Assignment],
    ) -> usize {
        self.allocate(team_id, mps, assignments).max_lanes()
    }
}

/// MP ID → 泳道下标
pub fn lane_of(team_id: &str, mps: &[MaintenancePeriod], assignments: &[Assignment]) -> LaneMap {
    LaneAllocator::new().allocate(team_id, mps, assignments)
}

/// 团队行所需泳道数 (≥ 1)
pub fn max_lanes(team_id: &str, mps: &[MaintenancePeriod], assignments: &[Assignment]) -> usize {
    LaneAllocator::new().max_lanes(team_id, mps, assignments)
}
