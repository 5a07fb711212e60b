// ==========================================
// 舰艇维护期排程核心 - 时间轴显示常量
// ==========================================
// 红线: 显示常量为编译期常量，排程核心不在运行时修改
// ==========================================

use crate::domain::types::Phase;
use serde::Serialize;

/// 每周一列的像素宽度
pub const CELL_WIDTH: i64 = 40;

/// 团队行最小高度
pub const LANE_HEIGHT: i64 = 60;

/// 相邻泳道的垂直间距 (LANE_HEIGHT - 10)
pub const LANE_PITCH: i64 = LANE_HEIGHT - 10;

/// 时间轴表头高度 (月份行 + 周行各占一半)
pub const HEADER_HEIGHT: i64 = 60;

/// 条形图距泳道顶部的偏移
pub const BAR_TOP_PADDING: i64 = 8;

/// 团队行底部留白
pub const ROW_PADDING: i64 = 16;

/// 条形图高度
pub const BAR_HEIGHT: i64 = 40;

/// 退化区间 (零宽/倒置) 的最小可见宽度
pub const MIN_BAR_WIDTH: i64 = 1;

/// 执行阶段显示 MP 标签的最小宽度
pub const ACTIVE_CAPTION_MIN_WIDTH: i64 = 80;

/// 其他阶段显示阶段名的最小宽度
pub const PHASE_CAPTION_MIN_WIDTH: i64 = 60;

// ==========================================
// PhaseColor - 阶段配色
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseColor {
    pub fill: &'static str,      // 浅色主题填充
    pub fill_dark: &'static str, // 深色主题填充
}

impl PhaseColor {
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::PrePlanning => PhaseColor {
                fill: "#e5e7eb",
                fill_dark: "#374151",
            },
            Phase::Planning => PhaseColor {
                fill: "#bfdbfe",
                fill_dark: "#1e40af",
            },
            Phase::Active => PhaseColor {
                fill: "#4ade80",
                fill_dark: "#16a34a",
            },
            Phase::Closeout => PhaseColor {
                fill: "#fde68a",
                fill_dark: "#b45309",
            },
        }
    }

    pub fn fill_for(&self, dark: bool) -> &'static str {
        if dark {
            self.fill_dark
        } else {
            self.fill
        }
    }
}
