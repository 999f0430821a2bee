//! 集成測試

use chrono::NaiveDate;
use roster_core::*;
use roster_export::{ArtifactSink, FileSink, MemorySink, TableFormat};
use roster_optimizer::{ScheduleOptimizer, SolverStatus, WindowRule};
use rstest::rstest;
use rust_decimal::Decimal;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
}

/// 休假、早班、午班、晚班各一種，各覆蓋 8 個時段
fn standard_catalog() -> Vec<ShiftDefinition> {
    vec![
        ShiftDefinition::leave(1, "0".to_string()),
        ShiftDefinition::spanning(2, ShiftType::Morning, "1".to_string(), 0, 8),
        ShiftDefinition::spanning(3, ShiftType::Afternoon, "2".to_string(), 8, 16),
        ShiftDefinition::spanning(4, ShiftType::Night, "3".to_string(), 16, 24),
    ]
}

fn flat_demand(days: u32, morning: u32, afternoon: u32, night: u32) -> Vec<DemandRecord> {
    (1..=days)
        .map(|d| {
            let demand = (0..INTERVALS_PER_DAY)
                .map(|t| match t {
                    0..=7 => morning,
                    8..=15 => afternoon,
                    _ => night,
                })
                .collect();
            DemandRecord::new(date(d), demand)
        })
        .collect()
}

/// 依排班表重算各 (日, 時段) 的缺口總和
fn recomputed_lack(
    schedule: &Schedule,
    catalog: &ShiftCatalog,
    records: &[DemandRecord],
) -> u64 {
    let mut total = 0;
    for (d, record) in records.iter().enumerate() {
        for t in 0..INTERVALS_PER_DAY {
            let covered = (0..schedule.representative_count())
                .filter(|&i| {
                    schedule
                        .shift_name(i, d)
                        .and_then(|name| catalog.find_by_name(name))
                        .map(|shift| shift.covers(t))
                        .unwrap_or(false)
                })
                .count() as u64;
            total += u64::from(record.demand[t]).saturating_sub(covered);
        }
    }
    total
}

/// 檢查排班表滿足所有政策限制
fn assert_policy_invariants(
    schedule: &Schedule,
    catalog: &ShiftCatalog,
    policy: &PolicyConstraints,
) {
    let leave_name = catalog
        .name(catalog.leave_index())
        .expect("leave shift name");
    let rules = WindowRule::from_policy(policy, catalog);

    for i in 0..schedule.representative_count() {
        let row = schedule.row(i).expect("row");
        assert_eq!(row.len(), schedule.day_count());

        assert_eq!(
            schedule.count_for(i, leave_name) as u32,
            policy.exact_days_off_per_month,
            "CSR {} 休假天數不符",
            i + 1
        );

        let indices: Vec<usize> = row
            .iter()
            .map(|name| {
                let shift = catalog.find_by_name(name).expect("known shift");
                catalog.index_of(shift.id).expect("indexed shift")
            })
            .collect();
        for rule in &rules {
            assert_eq!(
                rule.first_violation(&indices),
                None,
                "CSR {} 違反 {:?}",
                i + 1,
                rule.kind
            );
        }
    }
}

#[test]
fn test_week_roster_respects_policy() {
    // 場景：5 位客服排 7 天，每人休 2 天，7 天內最多 2 晚班、2 午班，每 4 天至少休 1 天
    let definitions = standard_catalog();
    let records = flat_demand(7, 1, 1, 1);
    let policy = PolicyConstraints::new(2)
        .with_night_limit(2, 7)
        .with_afternoon_limit(2, 7)
        .with_rest_period(4);

    let result = ScheduleOptimizer::new(OptimizerConfig::new(5))
        .optimize(definitions.clone(), records.clone(), &policy)
        .unwrap();

    assert_eq!(result.solver_status, SolverStatus::Optimal);
    assert_eq!(result.outcome, ScheduleOutcome::Optimal);

    let catalog = ShiftCatalog::new(definitions).unwrap();
    let schedule = result.schedule.expect("schedule");
    assert_eq!(schedule.representative_count(), 5);
    assert_eq!(schedule.day_count(), 7);
    assert_policy_invariants(&schedule, &catalog, &policy);
    assert_eq!(recomputed_lack(&schedule, &catalog, &records), 0);
}

#[test]
fn test_understaffed_lack_is_tight() {
    // 場景：3 位客服，晚班需求 2 人，但每人 5 天內最多 1 晚班
    let definitions = standard_catalog();
    let records = flat_demand(5, 1, 0, 2);
    let policy = PolicyConstraints::new(1)
        .with_night_limit(1, 5)
        .with_rest_period(5);

    let result = ScheduleOptimizer::new(OptimizerConfig::new(3))
        .optimize(definitions.clone(), records.clone(), &policy)
        .unwrap();

    let total_lack = result.outcome.total_lack().expect("suboptimal");
    let catalog = ShiftCatalog::new(definitions).unwrap();
    let schedule = result.schedule.expect("schedule");
    assert_policy_invariants(&schedule, &catalog, &policy);

    // 晚班共需 5 × 8 × 2 = 80 人時段，最多覆蓋 3 × 8 = 24
    assert_eq!(total_lack, Decimal::from(56));
    assert_eq!(
        Decimal::from(recomputed_lack(&schedule, &catalog, &records)),
        total_lack
    );

    let reported: Decimal = result.shortfalls.iter().map(|s| s.amount).sum();
    assert_eq!(reported, total_lack);
    assert!(result
        .shortfalls
        .iter()
        .all(|s| s.amount > Decimal::ZERO && s.date == date(s.day as u32 + 1)));
}

#[test]
fn test_outcome_tags_round_trip() {
    let result = ScheduleOptimizer::new(OptimizerConfig::new(2))
        .optimize(
            vec![
                ShiftDefinition::leave(1, "0".to_string()),
                ShiftDefinition::spanning(2, ShiftType::Morning, "1".to_string(), 0, 8),
            ],
            vec![
                DemandRecord::empty(date(1)).with_interval(0, 5),
                DemandRecord::empty(date(2)),
            ],
            &PolicyConstraints::new(1),
        )
        .unwrap();

    let tag = result.outcome.to_string();
    assert_eq!(tag, "SUBOPTIMAL:3");
    assert_eq!(tag.parse::<ScheduleOutcome>().unwrap(), result.outcome);
}

#[rstest]
#[case(1, ScheduleOutcome::Optimal)]
#[case(3, ScheduleOutcome::Infeasible)]
fn test_days_off_scenarios(#[case] days_off: u32, #[case] expected: ScheduleOutcome) {
    let result = ScheduleOptimizer::new(OptimizerConfig::new(2))
        .optimize(
            vec![
                ShiftDefinition::leave(1, "0".to_string()),
                ShiftDefinition::spanning(2, ShiftType::Morning, "1".to_string(), 0, 8),
            ],
            vec![
                DemandRecord::empty(date(1)).with_interval(0, 1),
                DemandRecord::empty(date(2)),
            ],
            &PolicyConstraints::new(days_off),
        )
        .unwrap();

    assert_eq!(result.outcome, expected);
    assert_eq!(result.schedule.is_some(), expected.has_schedule());
}

#[test]
fn test_leave_selected_by_type_not_position() {
    // 休假班別放在最後，名稱也不是 "0"
    let definitions = vec![
        ShiftDefinition::spanning(7, ShiftType::Morning, "M".to_string(), 0, 8),
        ShiftDefinition::leave(9, "OFF".to_string()),
    ];
    let records = vec![
        DemandRecord::empty(date(1)).with_interval(0, 1),
        DemandRecord::empty(date(2)).with_interval(0, 1),
    ];

    let result = ScheduleOptimizer::new(OptimizerConfig::new(2))
        .optimize(definitions, records, &PolicyConstraints::new(1))
        .unwrap();

    assert_eq!(result.outcome, ScheduleOutcome::Optimal);
    let schedule = result.schedule.unwrap();
    for i in 0..2 {
        assert_eq!(schedule.count_for(i, "OFF"), 1);
        assert_eq!(schedule.count_for(i, "M"), 1);
    }
}

#[rstest]
#[case(vec![
    ShiftDefinition::spanning(2, ShiftType::Morning, "1".to_string(), 0, 8),
])]
#[case(vec![
    ShiftDefinition::leave(1, "0".to_string()),
    ShiftDefinition::leave(2, "OFF".to_string()),
])]
#[case(vec![
    ShiftDefinition::leave(1, "0".to_string()),
    ShiftDefinition::new(2, ShiftType::Morning, "1".to_string(), vec![true; 12]),
])]
#[case(Vec::new())]
fn test_bad_catalog_is_configuration_error(#[case] definitions: Vec<ShiftDefinition>) {
    let error = ScheduleOptimizer::new(OptimizerConfig::new(2))
        .optimize(definitions, flat_demand(2, 1, 0, 0), &PolicyConstraints::new(1))
        .unwrap_err();
    assert!(error.is_configuration_error(), "{:?}", error);
}

#[test]
fn test_gap_in_demand_is_configuration_error() {
    let records = vec![DemandRecord::empty(date(1)), DemandRecord::empty(date(3))];
    let error = ScheduleOptimizer::new(OptimizerConfig::new(2))
        .optimize(standard_catalog(), records, &PolicyConstraints::new(1))
        .unwrap_err();
    assert!(matches!(error, ScheduleError::InvalidHorizon(_)));
}

#[test]
fn test_schedule_renders_to_sinks() {
    let result = ScheduleOptimizer::new(OptimizerConfig::new(2))
        .optimize(
            vec![
                ShiftDefinition::leave(1, "0".to_string()),
                ShiftDefinition::spanning(2, ShiftType::Morning, "1".to_string(), 0, 8),
            ],
            vec![
                DemandRecord::empty(date(1)).with_interval(0, 2),
                DemandRecord::empty(date(2)),
            ],
            &PolicyConstraints::new(1),
        )
        .unwrap();
    let schedule = result.schedule.unwrap();

    let mut memory = MemorySink::new(TableFormat::default());
    memory.persist(&schedule).unwrap();
    // 第一天兩人都要上早班，第二天都休假
    assert_eq!(
        memory.contents(),
        Some(",Day 1,Day 2\nCSR 1,1,0\nCSR 2,1,0\n")
    );

    let path = std::env::temp_dir()
        .join(format!("roster-it-{}", std::process::id()))
        .join("csr_schedule.csv");
    let mut file = FileSink::new(&path, TableFormat::default());
    file.persist(&schedule).unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        memory.contents().unwrap()
    );
    if let Some(dir) = path.parent() {
        std::fs::remove_dir_all(dir).ok();
    }
}

#[test]
fn test_json_sources_end_to_end() {
    let dir = std::env::temp_dir().join(format!("roster-json-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join(JsonFileSource::SHIFTS_FILE),
        serde_json::to_string(&standard_catalog()).unwrap(),
    )
    .unwrap();
    std::fs::write(
        dir.join(JsonFileSource::DEMAND_FILE),
        serde_json::to_string(&flat_demand(3, 1, 0, 0)).unwrap(),
    )
    .unwrap();
    std::fs::write(
        dir.join(JsonFileSource::POLICY_FILE),
        serde_json::to_string(&PolicyConstraints::new(1)).unwrap(),
    )
    .unwrap();

    let source = JsonFileSource::new(&dir);
    let result = ScheduleOptimizer::new(OptimizerConfig::new(2))
        .run(&source, &source, &source)
        .unwrap();

    assert_eq!(result.outcome, ScheduleOutcome::Optimal);
    assert_eq!(result.schedule.unwrap().day_count(), 3);

    std::fs::remove_dir_all(&dir).ok();
}
