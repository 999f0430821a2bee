//! 從解值還原排班表

use roster_core::{Horizon, Result, Schedule, ScheduleError, ShiftCatalog};

use crate::solver::SolvedValues;

/// 二元變數視為選中的門檻
const SELECTION_THRESHOLD: f64 = 0.5;

/// 排班表還原器
pub struct ScheduleExtractor<'a> {
    catalog: &'a ShiftCatalog,
    horizon: &'a Horizon,
}

impl<'a> ScheduleExtractor<'a> {
    pub fn new(catalog: &'a ShiftCatalog, horizon: &'a Horizon) -> Self {
        Self { catalog, horizon }
    }

    /// 每位客服每天取唯一被選中的班別
    ///
    /// 沒有班別或多於一個班別被選中時回傳完整性錯誤，不做猜測。
    pub fn extract(&self, values: &SolvedValues) -> Result<Schedule> {
        let dims = values.dimensions();
        if dims.shifts != self.catalog.len() || dims.days != self.horizon.len() {
            return Err(ScheduleError::Integrity(format!(
                "解值維度 {:?} 與班別目錄/排班期間不符",
                dims
            )));
        }

        let mut rows = Vec::with_capacity(dims.representatives);
        for i in 0..dims.representatives {
            let mut row = Vec::with_capacity(dims.days);
            for d in 0..dims.days {
                let selected: Vec<usize> = (0..dims.shifts)
                    .filter(|&j| values.assignment(i, j, d) >= SELECTION_THRESHOLD)
                    .collect();

                let j = match selected.as_slice() {
                    [j] => *j,
                    other => {
                        tracing::error!(
                            "客服 {} 第 {} 天選中 {} 個班別",
                            i + 1,
                            d + 1,
                            other.len()
                        );
                        return Err(ScheduleError::Integrity(format!(
                            "客服 {} 第 {} 天選中 {} 個班別，應恰好一個",
                            i + 1,
                            d + 1,
                            other.len()
                        )));
                    }
                };

                let name = self.catalog.name(j).ok_or_else(|| {
                    ScheduleError::Integrity(format!("班別索引 {} 不存在", j))
                })?;
                row.push(name.to_string());
            }
            rows.push(row);
        }

        let dates = self.horizon.records().iter().map(|r| r.date).collect();
        Ok(Schedule::new(dates, rows))
    }
}
