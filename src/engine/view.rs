// ==========================================
// 舰艇维护期排程核心 - 时间轴视图状态
// ==========================================
// 职责: 维护可见窗口 (锚点月 + 偏移 + 显示月数)，提供平移/缩放
// 窗口: [偏移后月份 1 日, 其后 (months_to_show - 1) 个月的月末]
// 红线: 视图只产生窗口，不缓存任何几何；每次变化后整体重算
// ==========================================

use crate::config::schedule_config::ViewConfig;
use crate::engine::calendar::{first_of_month, last_of_month, shift_calendar_months};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineView {
    pub anchor: NaiveDate,         // 锚点日期 (通常为今天)
    pub start_offset_months: i32,  // 相对锚点月的平移量
    pub months_to_show: u32,       // 可见月数
    #[serde(default)]
    pub limits: ViewConfig,        // 缩放范围与步长
}

impl TimelineView {
    /// 以锚点所在月为起点，使用默认可见月数
    pub fn new(anchor: NaiveDate, limits: ViewConfig) -> Self {
        let months_to_show = limits
            .default_months
            .clamp(limits.min_months, limits.max_months.max(limits.min_months));
        Self {
            anchor,
            start_offset_months: 0,
            months_to_show,
            limits,
        }
    }

    /// 可见窗口 (含两端)
    pub fn window(&self) -> (NaiveDate, NaiveDate) {
        let start = first_of_month(shift_calendar_months(self.anchor, self.start_offset_months));
        let span = self.months_to_show.max(1).saturating_sub(1);
        let end = last_of_month(shift_calendar_months(start, span as i32));
        (start, end)
    }

    pub fn window_start(&self) -> NaiveDate {
        self.window().0
    }

    pub fn window_end(&self) -> NaiveDate {
        self.window().1
    }

    /// 向前平移一个月
    pub fn pan_left(&mut self) {
        self.start_offset_months -= 1;
    }

    /// 向后平移一个月
    pub fn pan_right(&mut self) {
        self.start_offset_months += 1;
    }

    /// 回到锚点所在月
    pub fn go_to_today(&mut self) {
        self.start_offset_months = 0;
    }

    /// 重新设置锚点并回到锚点所在月
    pub fn go_to(&mut self, anchor: NaiveDate) {
        self.anchor = anchor;
        self.start_offset_months = 0;
    }

    /// 放大 (显示更少月份)，不低于下限
    pub fn zoom_in(&mut self) {
        self.months_to_show = self
            .months_to_show
            .saturating_sub(self.limits.zoom_step_months)
            .max(self.limits.min_months);
    }

    /// 缩小 (显示更多月份)，不超过上限
    pub fn zoom_out(&mut self) {
        self.months_to_show = self
            .months_to_show
            .saturating_add(self.limits.zoom_step_months)
            .min(self.limits.max_months);
    }

    pub fn can_zoom_in(&self) -> bool {
        self.months_to_show > self.limits.min_months
    }

    pub fn can_zoom_out(&self) -> bool {
        self.months_to_show < self.limits.max_months
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_default_window_spans_six_months() {
        let view = TimelineView::new(d(2025, 3, 17), ViewConfig::default());
        assert_eq!(view.months_to_show, 6);
        assert_eq!(view.window(), (d(2025, 3, 1), d(2025, 8, 31)));
    }

    #[test]
    fn test_pan_crosses_year_boundary() {
        let mut view = TimelineView::new(d(2025, 1, 31), ViewConfig::default());
        view.pan_left();
        view.pan_left();
        assert_eq!(view.window(), (d(2024, 11, 1), d(2025, 4, 30)));

        view.go_to_today();
        view.pan_right();
        assert_eq!(view.window_start(), d(2025, 2, 1));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut view = TimelineView::new(d(2025, 3, 17), ViewConfig::default());
        view.zoom_in();
        assert_eq!(view.months_to_show, 3);
        view.zoom_in();
        assert_eq!(view.months_to_show, 3);
        assert!(!view.can_zoom_in());
        assert_eq!(view.window(), (d(2025, 3, 1), d(2025, 5, 31)));

        for _ in 0..10 {
            view.zoom_out();
        }
        assert_eq!(view.months_to_show, 24);
        assert!(!view.can_zoom_out());
        assert_eq!(view.window_end(), d(2027, 2, 28));
    }
}
