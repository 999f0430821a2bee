//! # Roster Core
//!
//! 核心資料模型與類型定義

pub mod config;
pub mod demand;
pub mod policy;
pub mod schedule;
pub mod shift;
pub mod source;

// Re-export 主要類型
pub use config::OptimizerConfig;
pub use demand::{DemandRecord, Horizon};
pub use policy::PolicyConstraints;
pub use schedule::{Schedule, ScheduleOutcome, ShortfallEntry};
pub use shift::{interval_label, ShiftCatalog, ShiftDefinition, ShiftType, INTERVALS_PER_DAY};
pub use source::{DemandSource, InMemorySource, JsonFileSource, PolicySource, ShiftCatalogSource};

/// 排班錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("班別目錄為空")]
    EmptyCatalog,

    #[error("找不到休假班別（Leave）")]
    MissingLeaveShift,

    #[error("休假班別必須唯一，實際有 {0} 個")]
    DuplicateLeaveShift(usize),

    #[error("重複的班別ID: {0}")]
    DuplicateShiftId(u32),

    #[error("向量長度不符: {0}")]
    LengthMismatch(String),

    #[error("無效的客服人數: {0}")]
    InvalidRosterSize(usize),

    #[error("無效的排班期間: {0}")]
    InvalidHorizon(String),

    #[error("無效的政策限制: {0}")]
    InvalidPolicy(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("資料完整性錯誤: {0}")]
    Integrity(String),

    #[error("無法解析排班結果: {0}")]
    InvalidOutcome(String),

    #[error("資料來源錯誤: {0}")]
    Source(String),

    #[error("讀寫錯誤: {0}")]
    Io(#[from] std::io::Error),

    #[error("序列化錯誤: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ScheduleError {
    /// 是否為輸入資料/配置錯誤（建模前即可偵測，不重試）
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ScheduleError::EmptyCatalog
                | ScheduleError::MissingLeaveShift
                | ScheduleError::DuplicateLeaveShift(_)
                | ScheduleError::DuplicateShiftId(_)
                | ScheduleError::LengthMismatch(_)
                | ScheduleError::InvalidRosterSize(_)
                | ScheduleError::InvalidHorizon(_)
                | ScheduleError::InvalidPolicy(_)
                | ScheduleError::InvalidConfig(_)
        )
    }

    /// 是否為內部完整性錯誤（視為致命缺陷）
    pub fn is_integrity_error(&self) -> bool {
        matches!(self, ScheduleError::Integrity(_))
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
