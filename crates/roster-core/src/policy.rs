//! 勞動政策限制

use serde::{Deserialize, Serialize};

use crate::{Result, ScheduleError};

/// 勞動政策限制（單一記錄）
///
/// 模型只使用休假天數、晚班/午班輪替上限與最短休息週期六個欄位，
/// 其餘欄位隨記錄保存並驗證，但不列入模型。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConstraints {
    /// 記錄ID
    #[serde(default)]
    pub id: u32,

    // 休假
    #[serde(default)]
    pub min_days_off: Option<u32>,
    #[serde(default)]
    pub max_days_off: Option<u32>,
    #[serde(default)]
    pub min_days_off_in_period: Option<u32>,
    /// 最短休息週期（天）：每連續這麼多天至少休一天
    pub max_days_off_in_period: u32,
    /// 每月固定休假天數
    pub exact_days_off_per_month: u32,

    // 早班
    #[serde(default)]
    pub min_morning_shifts: Option<u32>,
    #[serde(default)]
    pub max_morning_shifts: Option<u32>,
    #[serde(default)]
    pub min_morning_shifts_in_period: Option<u32>,
    #[serde(default)]
    pub max_morning_shifts_in_period: Option<u32>,

    // 午班
    #[serde(default)]
    pub min_afternoon_shifts: Option<u32>,
    /// 週期內午班上限
    pub max_afternoon_shifts: u32,
    #[serde(default)]
    pub min_afternoon_shifts_in_period: Option<u32>,
    /// 午班輪替週期（天）
    pub max_afternoon_shifts_in_period: u32,

    // 晚班
    #[serde(default)]
    pub min_night_shifts: Option<u32>,
    /// 週期內晚班上限
    pub max_night_shifts: u32,
    #[serde(default)]
    pub min_night_shifts_in_period: Option<u32>,
    /// 晚班輪替週期（天）
    pub max_night_shifts_in_period: u32,
}

impl PolicyConstraints {
    /// 創建新的政策限制
    ///
    /// 預設：每 7 天最多 1 個晚班、最多 2 個午班，每 7 天至少休 1 天
    pub fn new(exact_days_off_per_month: u32) -> Self {
        Self {
            id: 0,
            min_days_off: None,
            max_days_off: None,
            min_days_off_in_period: None,
            max_days_off_in_period: 7,
            exact_days_off_per_month,
            min_morning_shifts: None,
            max_morning_shifts: None,
            min_morning_shifts_in_period: None,
            max_morning_shifts_in_period: None,
            min_afternoon_shifts: None,
            max_afternoon_shifts: 2,
            min_afternoon_shifts_in_period: None,
            max_afternoon_shifts_in_period: 7,
            min_night_shifts: None,
            max_night_shifts: 1,
            min_night_shifts_in_period: None,
            max_night_shifts_in_period: 7,
        }
    }

    /// 建構器模式：設置晚班輪替上限
    pub fn with_night_limit(mut self, max_shifts: u32, period_days: u32) -> Self {
        self.max_night_shifts = max_shifts;
        self.max_night_shifts_in_period = period_days;
        self
    }

    /// 建構器模式：設置午班輪替上限
    pub fn with_afternoon_limit(mut self, max_shifts: u32, period_days: u32) -> Self {
        self.max_afternoon_shifts = max_shifts;
        self.max_afternoon_shifts_in_period = period_days;
        self
    }

    /// 建構器模式：設置最短休息週期
    pub fn with_rest_period(mut self, period_days: u32) -> Self {
        self.max_days_off_in_period = period_days;
        self
    }

    /// 驗證政策限制
    pub fn validate(&self) -> Result<()> {
        let windows = [
            ("max_days_off_in_period", self.max_days_off_in_period),
            ("max_night_shifts_in_period", self.max_night_shifts_in_period),
            ("max_afternoon_shifts_in_period", self.max_afternoon_shifts_in_period),
        ];
        for (field, length) in windows {
            if length == 0 {
                return Err(ScheduleError::InvalidPolicy(format!("{} 必須至少為 1", field)));
            }
        }

        let ranges = [
            ("days_off", self.min_days_off, self.max_days_off),
            (
                "days_off_in_period",
                self.min_days_off_in_period,
                Some(self.max_days_off_in_period),
            ),
            ("morning_shifts", self.min_morning_shifts, self.max_morning_shifts),
            (
                "morning_shifts_in_period",
                self.min_morning_shifts_in_period,
                self.max_morning_shifts_in_period,
            ),
            (
                "afternoon_shifts",
                self.min_afternoon_shifts,
                Some(self.max_afternoon_shifts),
            ),
            (
                "afternoon_shifts_in_period",
                self.min_afternoon_shifts_in_period,
                Some(self.max_afternoon_shifts_in_period),
            ),
            ("night_shifts", self.min_night_shifts, Some(self.max_night_shifts)),
            (
                "night_shifts_in_period",
                self.min_night_shifts_in_period,
                Some(self.max_night_shifts_in_period),
            ),
        ];
        for (field, min, max) in ranges {
            if let (Some(min), Some(max)) = (min, max) {
                if min > max {
                    return Err(ScheduleError::InvalidPolicy(format!(
                        "min_{} ({}) 大於 max_{} ({})",
                        field, min, field, max
                    )));
                }
            }
        }

        Ok(())
    }
}
