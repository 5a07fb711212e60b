// ==========================================
// 舰艇维护期排程核心 - 舰艇领域模型
// ==========================================
// 说明: 仅用于时间轴显示 (舰名、代号)，不参与排程计算
// ==========================================

use serde::{Deserialize, Serialize};

/// 悬空引用时的显示占位
pub const UNKNOWN_SHIP_NAME: &str = "Unknown Ship";
pub const UNKNOWN_SHIP_CODE: &str = "???";

// ==========================================
// Ship - 舰艇
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub id: String,                 // 舰艇ID
    pub name: String,               // 舰名 (如 Cape Schanck)
    pub code: String,               // 代号 (如 SCH)
    #[serde(default)]
    pub created_at: Option<String>, // 创建时间
}

impl Ship {
    pub fn new(id: impl Into<String>, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: code.into(),
            created_at: None,
        }
    }
}
