//! 排班優化主流程

use uuid::Uuid;

use roster_core::{
    DemandRecord, DemandSource, Horizon, OptimizerConfig, PolicyConstraints, PolicySource, Result,
    ShiftCatalog, ShiftCatalogSource, ShiftDefinition,
};

use crate::extract::ScheduleExtractor;
use crate::model::ModelBuilder;
use crate::outcome::OutcomeClassifier;
use crate::solver::SolverAdapter;
use crate::{ModelStatistics, OptimizationResult};

/// 排班優化器
///
/// 每次執行各自建模、求解，不保留任何狀態。
pub struct ScheduleOptimizer {
    config: OptimizerConfig,
}

impl ScheduleOptimizer {
    /// 創建新的排班優化器
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// 從資料來源讀取輸入並執行優化
    ///
    /// 來源錯誤原樣回傳，不重試也不代入預設值。
    pub fn run(
        &self,
        shifts: &dyn ShiftCatalogSource,
        demands: &dyn DemandSource,
        policy: &dyn PolicySource,
    ) -> Result<OptimizationResult> {
        let definitions = shifts.shift_definitions()?;
        let records = demands.demand_records()?;
        let policy = policy.policy()?;
        self.optimize(definitions, records, &policy)
    }

    /// 主優化入口
    pub fn optimize(
        &self,
        definitions: Vec<ShiftDefinition>,
        records: Vec<DemandRecord>,
        policy: &PolicyConstraints,
    ) -> Result<OptimizationResult> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("schedule_run", %run_id);
        let _enter = span.enter();

        tracing::info!(
            "開始排班優化：客服 {} 人，班別 {} 種，需求 {} 天",
            self.config.representative_count,
            definitions.len(),
            records.len()
        );

        let start_time = std::time::Instant::now();

        // Step 1: 驗證輸入
        tracing::debug!("Step 1: 驗證輸入");
        self.config.validate()?;
        let catalog = ShiftCatalog::new(definitions)?;
        let horizon = Horizon::from_records(records)?;
        tracing::debug!(
            "排班期間 {} 至 {}（{} 天），總需求 {}",
            horizon.start_date(),
            horizon.end_date(),
            horizon.len(),
            horizon.total_demand()
        );

        // Step 2: 建立模型
        tracing::debug!("Step 2: 建立模型");
        let model = ModelBuilder::new(
            &catalog,
            &horizon,
            policy,
            self.config.representative_count,
        )
        .build()?;
        let statistics = ModelStatistics {
            dimensions: model.dimensions(),
            variables: model.variable_count(),
            constraints: model.constraint_counts(),
        };

        // Step 3: 求解
        tracing::debug!("Step 3: 求解");
        let report = SolverAdapter::new()
            .with_time_limit(self.config.time_limit())
            .solve(model)?;

        // Step 4: 分類結果
        tracing::debug!("Step 4: 分類結果");
        let classification =
            OutcomeClassifier::new(self.config.tolerance).classify(&report, &horizon)?;

        // Step 5: 還原排班表
        let schedule = match &report.values {
            Some(values) if classification.outcome.has_schedule() => {
                tracing::debug!("Step 5: 還原排班表");
                Some(ScheduleExtractor::new(&catalog, &horizon).extract(values)?)
            }
            _ => None,
        };

        let result = OptimizationResult {
            run_id,
            outcome: classification.outcome,
            solver_status: report.status,
            schedule,
            shortfalls: classification.shortfalls,
            statistics,
            calculation_time_ms: Some(start_time.elapsed().as_millis()),
        };

        tracing::info!("排班優化完成，耗時 {:?}", start_time.elapsed());
        tracing::info!("Result: {}", result.outcome);

        Ok(result)
    }
}
