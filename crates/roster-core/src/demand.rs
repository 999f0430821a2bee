//! 人力需求預測與排班期間

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::shift::INTERVALS_PER_DAY;
use crate::{Result, ScheduleError};

/// 單日人力需求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandRecord {
    /// 需求日期
    pub date: NaiveDate,

    /// 各時段需要的客服人數
    pub demand: Vec<u32>,
}

impl DemandRecord {
    /// 創建新的需求記錄
    pub fn new(date: NaiveDate, demand: Vec<u32>) -> Self {
        Self { date, demand }
    }

    /// 全日無需求
    pub fn empty(date: NaiveDate) -> Self {
        Self::new(date, vec![0; INTERVALS_PER_DAY])
    }

    /// 建構器模式：設置單一時段需求
    pub fn with_interval(mut self, interval: usize, headcount: u32) -> Self {
        if let Some(slot) = self.demand.get_mut(interval) {
            *slot = headcount;
        }
        self
    }

    /// 全日總需求（人次·時段）
    pub fn total(&self) -> u64 {
        self.demand.iter().map(|&d| u64::from(d)).sum()
    }
}

/// 排班期間
///
/// 依日期排序後的連續日期序列，限定在同一個月份內。
/// 日索引 `d` 對應第 `d` 筆需求記錄。
#[derive(Debug, Clone)]
pub struct Horizon {
    records: Vec<DemandRecord>,
}

impl Horizon {
    /// 從需求記錄建立排班期間
    pub fn from_records(mut records: Vec<DemandRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(ScheduleError::InvalidHorizon("沒有任何需求記錄".to_string()));
        }

        records.sort_by_key(|r| r.date);

        for record in &records {
            if record.demand.len() != INTERVALS_PER_DAY {
                return Err(ScheduleError::LengthMismatch(format!(
                    "{} 的需求向量長度為 {}，應為 {}",
                    record.date,
                    record.demand.len(),
                    INTERVALS_PER_DAY
                )));
            }
        }

        let first = records[0].date;
        for pair in records.windows(2) {
            let (prev, next) = (pair[0].date, pair[1].date);
            if prev == next {
                return Err(ScheduleError::InvalidHorizon(format!("重複的需求日期: {}", next)));
            }
            if prev.succ_opt() != Some(next) {
                return Err(ScheduleError::InvalidHorizon(format!(
                    "需求日期不連續: {} 之後為 {}",
                    prev, next
                )));
            }
            if next.month() != first.month() || next.year() != first.year() {
                return Err(ScheduleError::InvalidHorizon(format!(
                    "排班期間跨月: {} 至 {}",
                    first, next
                )));
            }
        }

        Ok(Self { records })
    }

    /// 天數
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 第一天
    pub fn start_date(&self) -> NaiveDate {
        self.records[0].date
    }

    /// 最後一天
    pub fn end_date(&self) -> NaiveDate {
        self.records[self.records.len() - 1].date
    }

    /// 日索引對應的日期
    pub fn date(&self, day: usize) -> Option<NaiveDate> {
        self.records.get(day).map(|r| r.date)
    }

    /// 某日某時段的需求人數
    pub fn demand(&self, day: usize, interval: usize) -> u32 {
        self.records
            .get(day)
            .and_then(|r| r.demand.get(interval))
            .copied()
            .unwrap_or(0)
    }

    /// 所有需求記錄（依日期排序）
    pub fn records(&self) -> &[DemandRecord] {
        &self.records
    }

    /// 整個期間的總需求
    pub fn total_demand(&self) -> u64 {
        self.records.iter().map(DemandRecord::total).sum()
    }
}
