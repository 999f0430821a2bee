//! 輸入資料來源
//!
//! 班別目錄、需求預測與政策限制由外部系統提供，優化器每次執行只讀取一次。

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::{DemandRecord, PolicyConstraints, Result, ScheduleError, ShiftDefinition};

/// 班別目錄來源
pub trait ShiftCatalogSource {
    fn shift_definitions(&self) -> Result<Vec<ShiftDefinition>>;
}

/// 需求預測來源
pub trait DemandSource {
    fn demand_records(&self) -> Result<Vec<DemandRecord>>;
}

/// 政策限制來源
pub trait PolicySource {
    fn policy(&self) -> Result<PolicyConstraints>;
}

/// 記憶體內資料來源
#[derive(Debug, Clone)]
pub struct InMemorySource {
    pub shifts: Vec<ShiftDefinition>,
    pub demands: Vec<DemandRecord>,
    pub policy: Option<PolicyConstraints>,
}

impl InMemorySource {
    /// 創建新的記憶體來源
    pub fn new(
        shifts: Vec<ShiftDefinition>,
        demands: Vec<DemandRecord>,
        policy: PolicyConstraints,
    ) -> Self {
        Self {
            shifts,
            demands,
            policy: Some(policy),
        }
    }
}

impl ShiftCatalogSource for InMemorySource {
    fn shift_definitions(&self) -> Result<Vec<ShiftDefinition>> {
        Ok(self.shifts.clone())
    }
}

impl DemandSource for InMemorySource {
    fn demand_records(&self) -> Result<Vec<DemandRecord>> {
        Ok(self.demands.clone())
    }
}

impl PolicySource for InMemorySource {
    fn policy(&self) -> Result<PolicyConstraints> {
        self.policy
            .clone()
            .ok_or_else(|| ScheduleError::Source("沒有政策限制記錄".to_string()))
    }
}

/// JSON 檔案資料來源
///
/// 目錄內需有 `shifts.json`、`demand.json`、`policy.json`。
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    pub const SHIFTS_FILE: &'static str = "shifts.json";
    pub const DEMAND_FILE: &'static str = "demand.json";
    pub const POLICY_FILE: &'static str = "policy.json";

    /// 創建新的檔案來源
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 資料目錄
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn load<T: DeserializeOwned>(&self, file: &str) -> Result<T> {
        let path = self.dir.join(file);
        let text = std::fs::read_to_string(&path)
            .map_err(|e| ScheduleError::Source(format!("無法讀取 {}: {}", path.display(), e)))?;
        serde_json::from_str(&text)
            .map_err(|e| ScheduleError::Source(format!("無法解析 {}: {}", path.display(), e)))
    }
}

impl ShiftCatalogSource for JsonFileSource {
    fn shift_definitions(&self) -> Result<Vec<ShiftDefinition>> {
        self.load(Self::SHIFTS_FILE)
    }
}

impl DemandSource for JsonFileSource {
    fn demand_records(&self) -> Result<Vec<DemandRecord>> {
        self.load(Self::DEMAND_FILE)
    }
}

impl PolicySource for JsonFileSource {
    fn policy(&self) -> Result<PolicyConstraints> {
        self.load(Self::POLICY_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShiftType;
    use chrono::NaiveDate;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("roster-core-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_in_memory_source() {
        let source = InMemorySource::new(
            vec![ShiftDefinition::leave(1, "OFF".to_string())],
            vec![DemandRecord::empty(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap())],
            PolicyConstraints::new(8),
        );

        assert_eq!(source.shift_definitions().unwrap().len(), 1);
        assert_eq!(source.demand_records().unwrap().len(), 1);
        assert_eq!(source.policy().unwrap().exact_days_off_per_month, 8);
    }

    #[test]
    fn test_missing_policy_is_source_error() {
        let mut source = InMemorySource::new(Vec::new(), Vec::new(), PolicyConstraints::new(8));
        source.policy = None;
        assert!(matches!(source.policy(), Err(ScheduleError::Source(_))));
    }

    #[test]
    fn test_json_file_source_round_trip() {
        let dir = scratch_dir("json");
        let shifts = vec![
            ShiftDefinition::leave(1, "0".to_string()),
            ShiftDefinition::spanning(2, ShiftType::Morning, "1".to_string(), 0, 8),
        ];
        let demands = vec![DemandRecord::empty(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap())
            .with_interval(3, 2)];
        std::fs::write(
            dir.join(JsonFileSource::SHIFTS_FILE),
            serde_json::to_string(&shifts).unwrap(),
        )
        .unwrap();
        std::fs::write(
            dir.join(JsonFileSource::DEMAND_FILE),
            serde_json::to_string(&demands).unwrap(),
        )
        .unwrap();
        std::fs::write(
            dir.join(JsonFileSource::POLICY_FILE),
            serde_json::to_string(&PolicyConstraints::new(8)).unwrap(),
        )
        .unwrap();

        let source = JsonFileSource::new(&dir);
        assert_eq!(source.dir(), dir.as_path());
        let loaded = source.shift_definitions().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].shift_type, ShiftType::Morning);
        assert_eq!(source.demand_records().unwrap()[0].demand[3], 2);
        assert_eq!(source.policy().unwrap(), PolicyConstraints::new(8));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_json_file_source_missing_file() {
        let source = JsonFileSource::new(scratch_dir("missing"));
        assert!(matches!(
            source.shift_definitions(),
            Err(ScheduleError::Source(_))
        ));
    }
}
