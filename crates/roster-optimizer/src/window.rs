//! 滑動視窗規則（輪替上限與最短休息）

use std::ops::Range;

use roster_core::{PolicyConstraints, ShiftCatalog, ShiftType};

/// 排班期間內所有完整的滑動視窗
///
/// 只產生完全落在期間內的視窗（`k + length - 1 < horizon`），
/// 最後 `length - 1` 個起點直接略過，不做截斷。
pub fn sliding_windows(horizon: usize, length: usize) -> impl Iterator<Item = Range<usize>> {
    let starts = if length == 0 || length > horizon {
        0
    } else {
        horizon - length + 1
    };
    (0..starts).map(move |k| k..k + length)
}

/// 視窗規則種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// 晚班輪替上限
    NightRotation,
    /// 午班輪替上限
    AfternoonRotation,
    /// 最短休息（每個視窗至少休一天）
    MinimumRest,
}

/// 視窗規則：每位客服在每個完整視窗內，指定班別的總次數不超過上限
#[derive(Debug, Clone)]
pub struct WindowRule {
    pub kind: WindowKind,
    /// 納入計數的班別索引
    pub shift_indices: Vec<usize>,
    /// 視窗長度（天）
    pub period: usize,
    /// 視窗內次數上限
    pub max_count: u32,
}

impl WindowRule {
    /// 從政策限制與班別目錄推導出三條視窗規則
    pub fn from_policy(policy: &PolicyConstraints, catalog: &ShiftCatalog) -> Vec<WindowRule> {
        let leave = catalog.leave_index();
        let working: Vec<usize> = (0..catalog.len()).filter(|&j| j != leave).collect();

        vec![
            WindowRule {
                kind: WindowKind::NightRotation,
                shift_indices: catalog.indices_of(ShiftType::Night).to_vec(),
                period: policy.max_night_shifts_in_period as usize,
                max_count: policy.max_night_shifts,
            },
            WindowRule {
                kind: WindowKind::AfternoonRotation,
                shift_indices: catalog.indices_of(ShiftType::Afternoon).to_vec(),
                period: policy.max_afternoon_shifts_in_period as usize,
                max_count: policy.max_afternoon_shifts,
            },
            WindowRule {
                kind: WindowKind::MinimumRest,
                shift_indices: working,
                period: policy.max_days_off_in_period as usize,
                max_count: policy.max_days_off_in_period.saturating_sub(1),
            },
        ]
    }

    /// 此規則在期間內的視窗
    pub fn windows(&self, horizon: usize) -> impl Iterator<Item = Range<usize>> {
        sliding_windows(horizon, self.period)
    }

    /// 檢查某位客服的班別序列是否違反此規則，回傳第一個違規視窗
    pub fn first_violation(&self, assigned: &[usize]) -> Option<Range<usize>> {
        self.windows(assigned.len()).find(|window| {
            let count = assigned[window.clone()]
                .iter()
                .filter(|&&j| self.shift_indices.contains(&j))
                .count();
            count > self.max_count as usize
        })
    }
}
