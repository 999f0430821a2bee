//! 結果分類
//!
//! 依求解狀態與各時段缺口，將結果分為 Optimal / Suboptimal / Infeasible。

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use roster_core::{
    interval_label, Horizon, Result, ScheduleError, ScheduleOutcome, ShortfallEntry,
    INTERVALS_PER_DAY,
};

use crate::solver::{SolveReport, SolverStatus};

/// 缺口金額保留的小數位數
const LACK_DECIMAL_PLACES: u32 = 6;

/// 分類結果
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub outcome: ScheduleOutcome,
    /// 超過容差的各時段缺口，依日期、時段排序
    pub shortfalls: Vec<ShortfallEntry>,
}

/// 結果分類器
#[derive(Debug, Clone, Copy)]
pub struct OutcomeClassifier {
    tolerance: f64,
}

impl OutcomeClassifier {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// 分類求解結果
    pub fn classify(&self, report: &SolveReport, horizon: &Horizon) -> Result<Classification> {
        if report.status != SolverStatus::Optimal {
            tracing::info!("求解狀態 {}，視為不可行", report.status);
            return Ok(Classification {
                outcome: ScheduleOutcome::Infeasible,
                shortfalls: Vec::new(),
            });
        }

        let values = report.values.as_ref().ok_or_else(|| {
            ScheduleError::Integrity("求解狀態為 Optimal 但沒有解值".to_string())
        })?;
        if values.dimensions().days != horizon.len() {
            let message = format!(
                "解值天數 {} 與排班期間 {} 天不符",
                values.dimensions().days,
                horizon.len()
            );
            tracing::error!("{}", message);
            return Err(ScheduleError::Integrity(message));
        }

        let mut total = 0.0;
        let mut shortfalls = Vec::new();
        for day in 0..horizon.len() {
            for interval in 0..INTERVALS_PER_DAY {
                let lack = values.lack(day, interval);
                if !lack.is_finite() {
                    return Err(ScheduleError::Integrity(format!(
                        "第 {} 天時段 {} 的缺口值無效: {}",
                        day + 1,
                        interval,
                        lack
                    )));
                }
                if lack > self.tolerance {
                    total += lack;
                    let amount = to_decimal(lack)?;
                    let date = horizon.date(day).ok_or_else(|| {
                        ScheduleError::Integrity(format!("第 {} 天不在排班期間內", day + 1))
                    })?;
                    tracing::warn!(
                        "Date {}, Interval {}: Lack of {} CSRs",
                        date,
                        interval_label(interval),
                        amount
                    );
                    shortfalls.push(ShortfallEntry {
                        day,
                        date,
                        interval,
                        amount,
                    });
                }
            }
        }

        let outcome = if !shortfalls.is_empty() {
            let total_lack = to_decimal(total)?;
            tracing::warn!("人力不足，缺口總和 {}", total_lack);
            ScheduleOutcome::Suboptimal { total_lack }
        } else {
            ScheduleOutcome::Optimal
        };

        Ok(Classification {
            outcome,
            shortfalls,
        })
    }
}

fn to_decimal(value: f64) -> Result<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(LACK_DECIMAL_PLACES).normalize())
        .ok_or_else(|| ScheduleError::Integrity(format!("缺口值無法轉換: {}", value)))
}
