//! 求解器介接
//!
//! 模型送到獨立的求解執行緒，主執行緒以牆鐘時間上限等待結果。
//! 解值在執行緒內就轉成 `f64`，求解器後端的類型不會跨出此模組。

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use good_lp::{default_solver, ResolutionError, Solution, SolverModel};
use serde::{Deserialize, Serialize};

use roster_core::Result;

use crate::model::{ModelDimensions, ScheduleModel};

/// 求解器回報狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverStatus {
    Optimal,
    Infeasible,
    Unbounded,
    /// 逾時、求解器內部錯誤或執行緒中斷
    NotSolved,
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SolverStatus::Optimal => "Optimal",
            SolverStatus::Infeasible => "Infeasible",
            SolverStatus::Unbounded => "Unbounded",
            SolverStatus::NotSolved => "Not Solved",
        };
        f.write_str(text)
    }
}

/// 求解後的變數值
#[derive(Debug, Clone)]
pub struct SolvedValues {
    dimensions: ModelDimensions,
    assignments: Vec<f64>,
    lack: Vec<f64>,
}

impl SolvedValues {
    pub fn new(dimensions: ModelDimensions, assignments: Vec<f64>, lack: Vec<f64>) -> Self {
        Self {
            dimensions,
            assignments,
            lack,
        }
    }

    pub fn dimensions(&self) -> ModelDimensions {
        self.dimensions
    }

    /// `x[i][j][d]` 的值
    pub fn assignment(&self, representative: usize, shift: usize, day: usize) -> f64 {
        self.assignments[self
            .dimensions
            .assignment_index(representative, shift, day)]
    }

    /// `lack[d][t]` 的值
    pub fn lack(&self, day: usize, interval: usize) -> f64 {
        self.lack[self.dimensions.lack_index(day, interval)]
    }
}

/// 一次求解的結果
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub status: SolverStatus,
    /// 僅在 `Optimal` 時有值
    pub values: Option<SolvedValues>,
    pub elapsed: Duration,
}

type WorkerResult = std::result::Result<(Vec<f64>, Vec<f64>), ResolutionError>;

/// 求解器介接
#[derive(Debug, Clone, Default)]
pub struct SolverAdapter {
    time_limit: Option<Duration>,
}

impl SolverAdapter {
    /// 創建新的求解器介接（不限時）
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置牆鐘時間上限
    pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// 求解模型
    ///
    /// 只有無法啟動求解執行緒時回傳錯誤，其餘失敗都反映在 `SolveReport::status`。
    /// 逾時後求解執行緒會被放棄，結果直接丟棄。
    /// microlp 沒有內建時間上限，被放棄的執行緒仍會在背景算到結束並佔用 CPU。
    pub fn solve(&self, model: ScheduleModel) -> Result<SolveReport> {
        let start = Instant::now();
        let dimensions = model.dimensions();
        let (tx, rx) = mpsc::channel::<WorkerResult>();

        thread::Builder::new()
            .name("roster-solver".into())
            .spawn(move || {
                let result = catch_unwind(AssertUnwindSafe(|| run_model(model)))
                    .unwrap_or_else(|_| Err(ResolutionError::Str("求解執行緒 panic".to_string())));
                let _ = tx.send(result);
            })?;

        let received = match self.time_limit {
            Some(limit) => rx.recv_timeout(limit),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        let elapsed = start.elapsed();
        let report = match received {
            Ok(Ok((assignments, lack))) => SolveReport {
                status: SolverStatus::Optimal,
                values: Some(SolvedValues::new(dimensions, assignments, lack)),
                elapsed,
            },
            Ok(Err(error)) => {
                let status = match error {
                    ResolutionError::Infeasible => SolverStatus::Infeasible,
                    ResolutionError::Unbounded => SolverStatus::Unbounded,
                    other => {
                        tracing::warn!("求解器錯誤: {}", other);
                        SolverStatus::NotSolved
                    }
                };
                SolveReport {
                    status,
                    values: None,
                    elapsed,
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!("求解逾時（{:?}），放棄本次結果", self.time_limit);
                SolveReport {
                    status: SolverStatus::NotSolved,
                    values: None,
                    elapsed,
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                tracing::warn!("求解執行緒未回傳結果");
                SolveReport {
                    status: SolverStatus::NotSolved,
                    values: None,
                    elapsed,
                }
            }
        };

        tracing::debug!("求解狀態 {}，耗時 {:?}", report.status, report.elapsed);
        Ok(report)
    }
}

fn run_model(model: ScheduleModel) -> WorkerResult {
    let ScheduleModel {
        variables,
        objective,
        constraints,
        assignments,
        lack,
        ..
    } = model;

    let problem = constraints.into_iter().fold(
        variables.minimise(objective).using(default_solver),
        |problem, c| problem.with(c),
    );
    let solution = problem.solve()?;

    let assignment_values = assignments.iter().map(|&v| solution.value(v)).collect();
    let lack_values = lack.iter().map(|&v| solution.value(v)).collect();
    Ok((assignment_values, lack_values))
}
