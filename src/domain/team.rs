// ==========================================
// 舰艇维护期排程核心 - 团队领域模型
// ==========================================
// 人员 (personnel) 明细不在排程核心范围内
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Team - 团队
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,                 // 团队ID
    pub name: String,               // 团队名称 (唯一)
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at: None,
            updated_at: None,
        }
    }
}
