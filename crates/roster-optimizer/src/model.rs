//! 混合整數線性規劃模型建構
//!
//! 決策變數：
//! - `x[i][j][d]`：客服 i 在第 d 天排班別 j（二元）
//! - `lack[d][t]`：第 d 天時段 t 的人力缺口（連續，≥ 0）
//!
//! 目標：最小化所有缺口總和，超額排班不計成本。

use good_lp::{constraint, variable, Constraint, Expression, ProblemVariables, Variable};

use roster_core::{Horizon, PolicyConstraints, Result, ScheduleError, ShiftCatalog, INTERVALS_PER_DAY};

use crate::window::{WindowKind, WindowRule};

/// 模型維度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDimensions {
    /// 客服人數
    pub representatives: usize,
    /// 班別數
    pub shifts: usize,
    /// 天數
    pub days: usize,
}

impl ModelDimensions {
    /// `x[i][j][d]` 在攤平陣列中的位置
    pub fn assignment_index(&self, representative: usize, shift: usize, day: usize) -> usize {
        (representative * self.shifts + shift) * self.days + day
    }

    /// `lack[d][t]` 在攤平陣列中的位置
    pub fn lack_index(&self, day: usize, interval: usize) -> usize {
        day * INTERVALS_PER_DAY + interval
    }

    /// 二元變數數量
    pub fn assignment_count(&self) -> usize {
        self.representatives * self.shifts * self.days
    }

    /// 缺口變數數量
    pub fn lack_count(&self) -> usize {
        self.days * INTERVALS_PER_DAY
    }
}

/// 各類限制式數量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstraintCounts {
    pub coverage: usize,
    pub one_shift_per_day: usize,
    pub days_off: usize,
    pub night_windows: usize,
    pub afternoon_windows: usize,
    pub rest_windows: usize,
}

impl ConstraintCounts {
    pub fn total(&self) -> usize {
        self.coverage
            + self.one_shift_per_day
            + self.days_off
            + self.night_windows
            + self.afternoon_windows
            + self.rest_windows
    }

    fn add_windows(&mut self, kind: WindowKind, count: usize) {
        match kind {
            WindowKind::NightRotation => self.night_windows += count,
            WindowKind::AfternoonRotation => self.afternoon_windows += count,
            WindowKind::MinimumRest => self.rest_windows += count,
        }
    }
}

/// 建好的排班模型（尚未求解）
pub struct ScheduleModel {
    pub(crate) variables: ProblemVariables,
    pub(crate) objective: Expression,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) assignments: Vec<Variable>,
    pub(crate) lack: Vec<Variable>,
    dimensions: ModelDimensions,
    counts: ConstraintCounts,
}

impl ScheduleModel {
    /// 模型維度
    pub fn dimensions(&self) -> ModelDimensions {
        self.dimensions
    }

    /// 各類限制式數量
    pub fn constraint_counts(&self) -> ConstraintCounts {
        self.counts
    }

    /// 變數總數
    pub fn variable_count(&self) -> usize {
        self.assignments.len() + self.lack.len()
    }

    /// `x[i][j][d]`
    pub fn assignment(&self, representative: usize, shift: usize, day: usize) -> Variable {
        self.assignments[self.dimensions.assignment_index(representative, shift, day)]
    }

    /// `lack[d][t]`
    pub fn lack(&self, day: usize, interval: usize) -> Variable {
        self.lack[self.dimensions.lack_index(day, interval)]
    }
}

/// 模型建構器
pub struct ModelBuilder<'a> {
    catalog: &'a ShiftCatalog,
    horizon: &'a Horizon,
    policy: &'a PolicyConstraints,
    representatives: usize,
}

impl<'a> ModelBuilder<'a> {
    /// 創建新的模型建構器
    pub fn new(
        catalog: &'a ShiftCatalog,
        horizon: &'a Horizon,
        policy: &'a PolicyConstraints,
        representatives: usize,
    ) -> Self {
        Self {
            catalog,
            horizon,
            policy,
            representatives,
        }
    }

    /// 建立模型
    pub fn build(&self) -> Result<ScheduleModel> {
        if self.representatives == 0 {
            return Err(ScheduleError::InvalidRosterSize(self.representatives));
        }
        self.policy.validate()?;

        let dimensions = ModelDimensions {
            representatives: self.representatives,
            shifts: self.catalog.len(),
            days: self.horizon.len(),
        };

        tracing::debug!(
            "建立模型：客服 {} 人，班別 {} 種，{} 天",
            dimensions.representatives,
            dimensions.shifts,
            dimensions.days
        );

        let mut variables = ProblemVariables::new();

        // 索引順序與 ModelDimensions::assignment_index 一致
        let mut assignments = Vec::with_capacity(dimensions.assignment_count());
        for i in 0..dimensions.representatives {
            for j in 0..dimensions.shifts {
                for d in 0..dimensions.days {
                    assignments.push(
                        variables.add(variable().binary().name(format!("x_{}_{}_{}", i, j, d))),
                    );
                }
            }
        }

        let mut lack = Vec::with_capacity(dimensions.lack_count());
        for d in 0..dimensions.days {
            for t in 0..INTERVALS_PER_DAY {
                lack.push(variables.add(variable().min(0.0).name(format!("lack_{}_{}", d, t))));
            }
        }

        let objective = lack
            .iter()
            .fold(Expression::from(0.0), |acc, &v| acc + v);

        let mut model = ScheduleModel {
            variables,
            objective,
            constraints: Vec::new(),
            assignments,
            lack,
            dimensions,
            counts: ConstraintCounts::default(),
        };

        self.add_coverage_constraints(&mut model);
        self.add_one_shift_per_day(&mut model);
        self.add_exact_days_off(&mut model);
        for rule in WindowRule::from_policy(self.policy, self.catalog) {
            self.add_window_constraints(&mut model, &rule);
        }

        tracing::debug!(
            "模型完成：變數 {} 個，限制式 {} 條 {:?}",
            model.variable_count(),
            model.counts.total(),
            model.counts
        );

        Ok(model)
    }

    /// 缺口下界：`lack[d][t] ≥ demand[d][t] − Σ_i Σ_j x[i][j][d]·coverage[j][t]`
    fn add_coverage_constraints(&self, model: &mut ScheduleModel) {
        let dims = model.dimensions;
        for d in 0..dims.days {
            for t in 0..INTERVALS_PER_DAY {
                let covering: Vec<usize> = (0..dims.shifts)
                    .filter(|&j| self.catalog.definitions()[j].covers(t))
                    .collect();

                let mut scheduled = Expression::from(0.0);
                for i in 0..dims.representatives {
                    for &j in &covering {
                        scheduled += model.assignment(i, j, d);
                    }
                }

                let demand = f64::from(self.horizon.demand(d, t));
                let lack = model.lack(d, t);
                model.constraints.push(constraint!(scheduled + lack >= demand));
            }
        }
        model.counts.coverage = dims.days * INTERVALS_PER_DAY;
    }

    /// 每人每天恰好一個班別（含休假）
    fn add_one_shift_per_day(&self, model: &mut ScheduleModel) {
        let dims = model.dimensions;
        for i in 0..dims.representatives {
            for d in 0..dims.days {
                let total = (0..dims.shifts)
                    .fold(Expression::from(0.0), |acc, j| acc + model.assignment(i, j, d));
                model.constraints.push(constraint!(total == 1.0));
            }
        }
        model.counts.one_shift_per_day = dims.representatives * dims.days;
    }

    /// 每人每月休假天數固定
    fn add_exact_days_off(&self, model: &mut ScheduleModel) {
        let dims = model.dimensions;
        let leave = self.catalog.leave_index();
        let days_off = f64::from(self.policy.exact_days_off_per_month);
        for i in 0..dims.representatives {
            let total = (0..dims.days)
                .fold(Expression::from(0.0), |acc, d| acc + model.assignment(i, leave, d));
            model.constraints.push(constraint!(total == days_off));
        }
        model.counts.days_off = dims.representatives;
    }

    /// 滑動視窗上限（晚班、午班、最短休息）
    fn add_window_constraints(&self, model: &mut ScheduleModel, rule: &WindowRule) {
        if rule.shift_indices.is_empty() {
            tracing::debug!("{:?}: 沒有對應班別，略過", rule.kind);
            return;
        }

        let dims = model.dimensions;
        let max_count = f64::from(rule.max_count);
        let mut added = 0;
        for i in 0..dims.representatives {
            for window in rule.windows(dims.days) {
                let mut total = Expression::from(0.0);
                for &j in &rule.shift_indices {
                    for d in window.clone() {
                        total += model.assignment(i, j, d);
                    }
                }
                model.constraints.push(constraint!(total <= max_count));
                added += 1;
            }
        }

        tracing::debug!(
            "{:?}: 視窗 {} 天，上限 {}，限制式 {} 條",
            rule.kind,
            rule.period,
            rule.max_count,
            added
        );
        model.counts.add_windows(rule.kind, added);
    }
}
