//! 班別定義與班別目錄

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{Result, ScheduleError};

/// 每日時段數（09:00-21:00，每 30 分鐘一段）
pub const INTERVALS_PER_DAY: usize = 24;

/// 第一個時段的起始時間（自午夜起算的分鐘數）
const DAY_START_MINUTES: usize = 9 * 60;

/// 每個時段的長度（分鐘）
const INTERVAL_MINUTES: usize = 30;

/// 時段標籤，例如 `09:00-09:30`
pub fn interval_label(interval: usize) -> String {
    let start = DAY_START_MINUTES + interval * INTERVAL_MINUTES;
    let end = start + INTERVAL_MINUTES;
    format!(
        "{:02}:{:02}-{:02}:{:02}",
        start / 60,
        start % 60,
        end / 60,
        end % 60
    )
}

/// 班別類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftType {
    /// 早班
    Morning,
    /// 午班
    Afternoon,
    /// 晚班
    Night,
    /// 休假
    Leave,
}

/// 班別定義（班別原型）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftDefinition {
    /// 班別ID
    pub id: u32,

    /// 班別類型
    #[serde(rename = "type")]
    pub shift_type: ShiftType,

    /// 班別名稱（輸出排班表時使用）
    pub name: String,

    /// 時段覆蓋（每個 30 分鐘時段一個旗標）
    pub coverage: Vec<bool>,
}

impl ShiftDefinition {
    /// 創建新的班別定義
    pub fn new(id: u32, shift_type: ShiftType, name: String, coverage: Vec<bool>) -> Self {
        Self {
            id,
            shift_type,
            name,
            coverage,
        }
    }

    /// 創建休假班別（不覆蓋任何時段）
    pub fn leave(id: u32, name: String) -> Self {
        Self::new(id, ShiftType::Leave, name, vec![false; INTERVALS_PER_DAY])
    }

    /// 以區間 `[start, end)` 建立連續覆蓋的班別
    pub fn spanning(id: u32, shift_type: ShiftType, name: String, start: usize, end: usize) -> Self {
        let coverage = (0..INTERVALS_PER_DAY).map(|t| t >= start && t < end).collect();
        Self::new(id, shift_type, name, coverage)
    }

    /// 檢查是否覆蓋某時段
    pub fn covers(&self, interval: usize) -> bool {
        self.coverage.get(interval).copied().unwrap_or(false)
    }

    /// 覆蓋的時段數
    pub fn covered_intervals(&self) -> usize {
        self.coverage.iter().filter(|&&c| c).count()
    }
}

/// 班別目錄
///
/// 建立時將班別ID對應到連續索引，並依類型標籤選出唯一的休假班別。
/// 之後所有模型與輸出都只使用索引。
#[derive(Debug, Clone)]
pub struct ShiftCatalog {
    definitions: Vec<ShiftDefinition>,
    id_to_index: HashMap<u32, usize>,
    leave_index: usize,
    morning: Vec<usize>,
    afternoon: Vec<usize>,
    night: Vec<usize>,
}

impl ShiftCatalog {
    /// 驗證並建立班別目錄
    pub fn new(definitions: Vec<ShiftDefinition>) -> Result<Self> {
        if definitions.is_empty() {
            return Err(ScheduleError::EmptyCatalog);
        }

        let mut id_to_index = HashMap::with_capacity(definitions.len());
        for (index, definition) in definitions.iter().enumerate() {
            if definition.coverage.len() != INTERVALS_PER_DAY {
                return Err(ScheduleError::LengthMismatch(format!(
                    "班別 {} 的覆蓋向量長度為 {}，應為 {}",
                    definition.name,
                    definition.coverage.len(),
                    INTERVALS_PER_DAY
                )));
            }
            if id_to_index.insert(definition.id, index).is_some() {
                return Err(ScheduleError::DuplicateShiftId(definition.id));
            }
        }

        let leaves = Self::collect_indices(&definitions, ShiftType::Leave);
        let leave_index = match leaves.as_slice() {
            [] => return Err(ScheduleError::MissingLeaveShift),
            [index] => *index,
            many => return Err(ScheduleError::DuplicateLeaveShift(many.len())),
        };
        if definitions[leave_index].covered_intervals() > 0 {
            return Err(ScheduleError::InvalidConfig(format!(
                "休假班別 {} 不得覆蓋任何時段",
                definitions[leave_index].name
            )));
        }

        let morning = Self::collect_indices(&definitions, ShiftType::Morning);
        let afternoon = Self::collect_indices(&definitions, ShiftType::Afternoon);
        let night = Self::collect_indices(&definitions, ShiftType::Night);

        Ok(Self {
            definitions,
            id_to_index,
            leave_index,
            morning,
            afternoon,
            night,
        })
    }

    fn collect_indices(definitions: &[ShiftDefinition], shift_type: ShiftType) -> Vec<usize> {
        definitions
            .iter()
            .enumerate()
            .filter(|(_, d)| d.shift_type == shift_type)
            .map(|(index, _)| index)
            .collect()
    }

    /// 班別數量
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// 所有班別定義（依索引排序）
    pub fn definitions(&self) -> &[ShiftDefinition] {
        &self.definitions
    }

    /// 班別ID對應的連續索引
    pub fn index_of(&self, id: u32) -> Option<usize> {
        self.id_to_index.get(&id).copied()
    }

    /// 休假班別索引
    pub fn leave_index(&self) -> usize {
        self.leave_index
    }

    /// 某類型班別的所有索引
    pub fn indices_of(&self, shift_type: ShiftType) -> &[usize] {
        match shift_type {
            ShiftType::Morning => &self.morning,
            ShiftType::Afternoon => &self.afternoon,
            ShiftType::Night => &self.night,
            ShiftType::Leave => std::slice::from_ref(&self.leave_index),
        }
    }

    /// 索引對應的班別名稱
    pub fn name(&self, index: usize) -> Option<&str> {
        self.definitions.get(index).map(|d| d.name.as_str())
    }

    /// 依名稱找回班別
    pub fn find_by_name(&self, name: &str) -> Option<&ShiftDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }
}
