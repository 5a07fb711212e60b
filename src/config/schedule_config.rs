use serde::{Deserialize, Serialize};

/// 排程参数（可持久化到 config_kv，缺省值即业务默认规则）
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub derivation: DerivationConfig,

    #[serde(default)]
    pub view: ViewConfig,
}

/// 规划/收尾窗口推算参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationConfig {
    /// 在水维护 / 进坞: 规划开始 = 执行开始 - N 周
    #[serde(default = "default_planning_lead_weeks")]
    pub planning_lead_weeks: u32,

    /// 后勤访问: 规划开始 = 执行开始 - N 周
    #[serde(default = "default_log_visit_lead_weeks")]
    pub log_visit_lead_weeks: u32,

    /// 收尾结束 = 执行结束 + N 周
    #[serde(default = "default_closeout_weeks")]
    pub closeout_weeks: u32,

    /// 预规划开始 = 规划开始 - N 个日历月
    #[serde(default = "default_pre_planning_months")]
    pub pre_planning_months: u32,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            planning_lead_weeks: default_planning_lead_weeks(),
            log_visit_lead_weeks: default_log_visit_lead_weeks(),
            closeout_weeks: default_closeout_weeks(),
            pre_planning_months: default_pre_planning_months(),
        }
    }
}

/// 规划/收尾提前量上限 (周)
pub const MAX_WINDOW_WEEKS: u32 = 520;

/// 预规划回推上限 (日历月)
pub const MAX_PRE_PLANNING_MONTHS: u32 = 120;

impl DerivationConfig {
    /// 各参数截断到上限内，保证日期推算不越界
    pub fn bounded(&self) -> Self {
        Self {
            planning_lead_weeks: self.planning_lead_weeks.min(MAX_WINDOW_WEEKS),
            log_visit_lead_weeks: self.log_visit_lead_weeks.min(MAX_WINDOW_WEEKS),
            closeout_weeks: self.closeout_weeks.min(MAX_WINDOW_WEEKS),
            pre_planning_months: self.pre_planning_months.min(MAX_PRE_PLANNING_MONTHS),
        }
    }
}

/// 时间轴视图参数（缩放范围与步长，单位: 月）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_months_to_show")]
    pub default_months: u32,

    #[serde(default = "default_min_months")]
    pub min_months: u32,

    #[serde(default = "default_max_months")]
    pub max_months: u32,

    #[serde(default = "default_zoom_step_months")]
    pub zoom_step_months: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_months: default_months_to_show(),
            min_months: default_min_months(),
            max_months: default_max_months(),
            zoom_step_months: default_zoom_step_months(),
        }
    }
}

fn default_planning_lead_weeks() -> u32 {
    14
}

fn default_log_visit_lead_weeks() -> u32 {
    4
}

fn default_closeout_weeks() -> u32 {
    2
}

fn default_pre_planning_months() -> u32 {
    9
}

fn default_months_to_show() -> u32 {
    6
}

fn default_min_months() -> u32 {
    3
}

fn default_max_months() -> u32 {
    24
}

fn default_zoom_step_months() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let cfg: ScheduleConfig =
            serde_json::from_str(r#"{"derivation":{"closeout_weeks":3}}"#).unwrap();
        assert_eq!(cfg.derivation.closeout_weeks, 3);
        assert_eq!(cfg.derivation.planning_lead_weeks, 14);
        assert_eq!(cfg.view, ViewConfig::default());
    }

    #[test]
    fn test_bounded_caps_each_field() {
        let cfg = DerivationConfig {
            planning_lead_weeks: 10_000,
            log_visit_lead_weeks: 4,
            closeout_weeks: u32::MAX,
            pre_planning_months: 4_000_000,
        };
        let b = cfg.bounded();
        assert_eq!(b.planning_lead_weeks, MAX_WINDOW_WEEKS);
        assert_eq!(b.log_visit_lead_weeks, 4);
        assert_eq!(b.closeout_weeks, MAX_WINDOW_WEEKS);
        assert_eq!(b.pre_planning_months, MAX_PRE_PLANNING_MONTHS);
        assert_eq!(DerivationConfig::default().bounded(), DerivationConfig::default());
    }
}
