// ==========================================
// 舰艇维护期排程核心 - 团队分派领域模型
// ==========================================
// MP 与 Team 的多对多关联；一个 MP 可由多个团队承担
// ==========================================

use crate::domain::types::AssignmentStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,                 // 分派ID
    pub mp_id: String,              // 关联维护期
    pub team_id: String,            // 关联团队
    pub weeks_allocated: i32,       // 分配周数
    #[serde(default)]
    pub status: AssignmentStatus,   // 分派状态
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Assignment {
    pub fn new(
        id: impl Into<String>,
        mp_id: impl Into<String>,
        team_id: impl Into<String>,
        weeks_allocated: i32,
    ) -> Self {
        Self {
            id: id.into(),
            mp_id: mp_id.into(),
            team_id: team_id.into(),
            weeks_allocated,
            status: AssignmentStatus::Allocated,
            created_at: None,
            updated_at: None,
        }
    }

    /// 是否把指定 MP 分派给了指定团队
    #[inline]
    pub fn links(&self, mp_id: &str, team_id: &str) -> bool {
        self.mp_id == mp_id && self.team_id == team_id
    }
}
