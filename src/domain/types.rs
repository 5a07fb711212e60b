// ==========================================
// 舰艇维护期排程核心 - 领域类型定义
// ==========================================
// 序列化格式与存储层保持一致 (mps.type / mps.status / assignments.status)
// ==========================================

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 维护期类型 (MP Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MpType {
    #[serde(rename = "In Water")]
    InWater, // 在水维护
    #[serde(rename = "Docking")]
    Docking, // 进坞
    #[serde(rename = "Log Visit")]
    LogVisit, // 后勤访问
}

impl MpType {
    /// 时间轴上的类型缩写
    pub fn short_label(&self) -> &'static str {
        match self {
            MpType::InWater => "IW",
            MpType::Docking => "DOCK",
            MpType::LogVisit => "LV",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MpType::InWater => "In Water",
            MpType::Docking => "Docking",
            MpType::LogVisit => "Log Visit",
        }
    }
}

impl fmt::Display for MpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MpType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "In Water" => Ok(MpType::InWater),
            "Docking" => Ok(MpType::Docking),
            "Log Visit" => Ok(MpType::LogVisit),
            other => Err(DomainError::UnknownEnumValue {
                kind: "MpType",
                value: other.to_string(),
            }),
        }
    }
}

// ==========================================
// 维护期状态 (MP Status)
// ==========================================
// 流转: planned -> active -> completed (由外部驱动，排程核心只读)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MpStatus {
    Planned,   // 已计划
    Active,    // 进行中
    Completed, // 已完成
}

impl MpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MpStatus::Planned => "planned",
            MpStatus::Active => "active",
            MpStatus::Completed => "completed",
        }
    }
}

impl Default for MpStatus {
    fn default() -> Self {
        MpStatus::Planned
    }
}

impl fmt::Display for MpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MpStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "planned" => Ok(MpStatus::Planned),
            "active" => Ok(MpStatus::Active),
            "completed" => Ok(MpStatus::Completed),
            _ => Err(DomainError::UnknownEnumValue {
                kind: "MpStatus",
                value: s.to_string(),
            }),
        }
    }
}

// ==========================================
// 分派状态 (Assignment Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentStatus {
    Allocated,  // 已分配
    InProgress, // 执行中
    Completed,  // 已完成
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Allocated => "allocated",
            AssignmentStatus::InProgress => "in-progress",
            AssignmentStatus::Completed => "completed",
        }
    }
}

impl Default for AssignmentStatus {
    fn default() -> Self {
        AssignmentStatus::Allocated
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssignmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "allocated" => Ok(AssignmentStatus::Allocated),
            "in-progress" => Ok(AssignmentStatus::InProgress),
            "completed" => Ok(AssignmentStatus::Completed),
            _ => Err(DomainError::UnknownEnumValue {
                kind: "AssignmentStatus",
                value: s.to_string(),
            }),
        }
    }
}

// ==========================================
// 生命周期阶段 (Phase)
// ==========================================
// 顺序固定: PrePlanning < Planning < Active < Closeout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    PrePlanning, // 预规划 (可选)
    Planning,    // 规划
    Active,      // 执行
    Closeout,    // 收尾
}

impl Phase {
    /// 全部阶段 (渲染图例顺序)
    pub const ALL: [Phase; 4] = [
        Phase::PrePlanning,
        Phase::Planning,
        Phase::Active,
        Phase::Closeout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::PrePlanning => "pre-planning",
            Phase::Planning => "planning",
            Phase::Active => "active",
            Phase::Closeout => "closeout",
        }
    }

    /// 图例显示名
    pub fn legend_label(&self) -> &'static str {
        match self {
            Phase::PrePlanning => "Pre-Planning",
            Phase::Planning => "Planning",
            Phase::Active => "Active",
            Phase::Closeout => "Closeout",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
