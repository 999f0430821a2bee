//! 排班結果模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ScheduleError;

/// 排班結果狀態
///
/// 三種狀態對應不同的處置：調整政策、增加人力、或無需處理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleOutcome {
    /// 所有需求都被滿足
    Optimal,
    /// 政策內最佳解仍無法滿足全部需求
    Suboptimal {
        /// 超過容差的人力缺口總和
        total_lack: Decimal,
    },
    /// 政策限制與需求無法同時成立
    Infeasible,
}

impl ScheduleOutcome {
    /// 是否產生了排班表
    pub fn has_schedule(&self) -> bool {
        !matches!(self, ScheduleOutcome::Infeasible)
    }

    /// 人力缺口總和（僅 Suboptimal 有值）
    pub fn total_lack(&self) -> Option<Decimal> {
        match self {
            ScheduleOutcome::Suboptimal { total_lack } => Some(*total_lack),
            _ => None,
        }
    }
}

impl fmt::Display for ScheduleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleOutcome::Optimal => write!(f, "OPTIMAL"),
            ScheduleOutcome::Suboptimal { total_lack } => write!(f, "SUBOPTIMAL:{}", total_lack),
            ScheduleOutcome::Infeasible => write!(f, "INFEASIBLE"),
        }
    }
}

impl FromStr for ScheduleOutcome {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "OPTIMAL" => Ok(ScheduleOutcome::Optimal),
            "INFEASIBLE" => Ok(ScheduleOutcome::Infeasible),
            other => {
                let lack = other
                    .strip_prefix("SUBOPTIMAL:")
                    .ok_or_else(|| ScheduleError::InvalidOutcome(other.to_string()))?;
                let total_lack = Decimal::from_str(lack.trim())
                    .map_err(|_| ScheduleError::InvalidOutcome(other.to_string()))?;
                Ok(ScheduleOutcome::Suboptimal { total_lack })
            }
        }
    }
}

/// 單一時段的人力缺口
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortfallEntry {
    /// 日索引
    pub day: usize,
    /// 日期
    pub date: NaiveDate,
    /// 時段索引
    pub interval: usize,
    /// 缺口人數
    pub amount: Decimal,
}

/// 排班表：客服 × 日期 → 班別名稱
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// 排班期間的日期
    pub dates: Vec<NaiveDate>,

    /// 每位客服依日期排序的班別名稱
    pub rows: Vec<Vec<String>>,
}

impl Schedule {
    /// 創建新的排班表
    pub fn new(dates: Vec<NaiveDate>, rows: Vec<Vec<String>>) -> Self {
        Self { dates, rows }
    }

    /// 客服人數
    pub fn representative_count(&self) -> usize {
        self.rows.len()
    }

    /// 天數
    pub fn day_count(&self) -> usize {
        self.dates.len()
    }

    /// 某位客服某日的班別名稱
    pub fn shift_name(&self, representative: usize, day: usize) -> Option<&str> {
        self.rows
            .get(representative)
            .and_then(|row| row.get(day))
            .map(String::as_str)
    }

    /// 某位客服整月的班別
    pub fn row(&self, representative: usize) -> Option<&[String]> {
        self.rows.get(representative).map(Vec::as_slice)
    }

    /// 某位客服排到某班別的天數
    pub fn count_for(&self, representative: usize, shift_name: &str) -> usize {
        self.row(representative)
            .map(|row| row.iter().filter(|name| name.as_str() == shift_name).count())
            .unwrap_or(0)
    }

    /// 某日排到某班別的人數
    pub fn headcount_on(&self, day: usize, shift_name: &str) -> usize {
        self.rows
            .iter()
            .filter(|row| row.get(day).map(String::as_str) == Some(shift_name))
            .count()
    }
}
