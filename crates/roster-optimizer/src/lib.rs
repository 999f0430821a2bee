//! # Roster Optimizer
//!
//! 客服月排班的混合整數線性規劃（建模、求解、結果分類、排班表還原）

pub mod extract;
pub mod model;
pub mod optimizer;
pub mod outcome;
pub mod solver;
pub mod window;

// Re-export 主要類型
pub use extract::ScheduleExtractor;
pub use model::{ConstraintCounts, ModelBuilder, ModelDimensions, ScheduleModel};
pub use optimizer::ScheduleOptimizer;
pub use outcome::{Classification, OutcomeClassifier};
pub use solver::{SolveReport, SolvedValues, SolverAdapter, SolverStatus};
pub use window::{sliding_windows, WindowKind, WindowRule};

use roster_core::{Schedule, ScheduleOutcome, ShortfallEntry};
use uuid::Uuid;

/// 模型規模統計
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelStatistics {
    pub dimensions: ModelDimensions,
    /// 變數總數
    pub variables: usize,
    /// 各類限制式數量
    pub constraints: ConstraintCounts,
}

/// 優化結果
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// 執行ID（同時記錄在日誌 span 中）
    pub run_id: Uuid,

    /// 結果狀態
    pub outcome: ScheduleOutcome,

    /// 求解器原始狀態（區分逾時與真正不可行）
    pub solver_status: SolverStatus,

    /// 排班表（Infeasible 時為 None）
    pub schedule: Option<Schedule>,

    /// 各時段人力缺口
    pub shortfalls: Vec<ShortfallEntry>,

    /// 模型規模
    pub statistics: ModelStatistics,

    /// 計算時間（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl OptimizationResult {
    /// 求解器是否未得出結論（逾時或求解器內部錯誤）
    pub fn not_solved(&self) -> bool {
        self.solver_status == SolverStatus::NotSolved
    }
}
