//! 排班優化配置

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Result, ScheduleError};

/// 排班優化配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// 客服人數
    pub representative_count: usize,

    /// 判定人力不足的數值容差
    pub tolerance: f64,

    /// 求解時間上限（秒），None 表示求到最優或證明不可行為止
    pub time_limit_secs: Option<u64>,

    /// 排班表輸出路徑
    pub output_path: PathBuf,

    /// 列標籤前綴（`CSR 1`、`CSR 2`…）
    pub representative_prefix: String,

    /// 欄標籤前綴（`Day 1`、`Day 2`…）
    pub day_prefix: String,

    /// 欄位分隔字元
    pub delimiter: char,
}

impl OptimizerConfig {
    /// 創建新的配置
    pub fn new(representative_count: usize) -> Self {
        Self {
            representative_count,
            ..Self::default()
        }
    }

    /// 從 JSON 檔案載入配置（缺少的欄位使用預設值）
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// 建構器模式：設置容差
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// 建構器模式：設置求解時間上限
    pub fn with_time_limit_secs(mut self, secs: u64) -> Self {
        self.time_limit_secs = Some(secs);
        self
    }

    /// 建構器模式：設置輸出路徑
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// 建構器模式：設置列標籤前綴
    pub fn with_representative_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.representative_prefix = prefix.into();
        self
    }

    /// 建構器模式：設置分隔字元
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// 求解時間上限
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs.map(Duration::from_secs)
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if self.representative_count == 0 {
            return Err(ScheduleError::InvalidRosterSize(self.representative_count));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ScheduleError::InvalidConfig(format!(
                "容差必須為非負有限值: {}",
                self.tolerance
            )));
        }
        if self.time_limit_secs == Some(0) {
            return Err(ScheduleError::InvalidConfig("求解時間上限必須大於 0".to_string()));
        }
        if matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(ScheduleError::InvalidConfig(format!(
                "無效的分隔字元: {:?}",
                self.delimiter
            )));
        }
        Ok(())
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            representative_count: 40,
            tolerance: 1e-6,
            time_limit_secs: None,
            output_path: PathBuf::from("csr_schedule.csv"),
            representative_prefix: "CSR".to_string(),
            day_prefix: "Day".to_string(),
            delimiter: ',',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OptimizerConfig::default();
        assert_eq!(config.representative_count, 40);
        assert_eq!(config.tolerance, 1e-6);
        assert_eq!(config.time_limit(), None);
        assert_eq!(config.output_path, PathBuf::from("csr_schedule.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = OptimizerConfig::new(12)
            .with_tolerance(1e-4)
            .with_time_limit_secs(30)
            .with_output_path("out/schedule.csv")
            .with_representative_prefix("Agent")
            .with_delimiter(';');

        assert_eq!(config.representative_count, 12);
        assert_eq!(config.tolerance, 1e-4);
        assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
        assert_eq!(config.representative_prefix, "Agent");
        assert_eq!(config.delimiter, ';');
    }

    #[test]
    fn test_zero_representatives_rejected() {
        let config = OptimizerConfig::new(0);
        assert!(matches!(
            config.validate(),
            Err(ScheduleError::InvalidRosterSize(0))
        ));
    }

    #[test]
    fn test_invalid_tolerance_rejected() {
        assert!(OptimizerConfig::new(2).with_tolerance(-1.0).validate().is_err());
        assert!(OptimizerConfig::new(2).with_tolerance(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_zero_time_limit_rejected() {
        assert!(OptimizerConfig::new(2).with_time_limit_secs(0).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: OptimizerConfig =
            serde_json::from_str(r#"{"representative_count": 5, "time_limit_secs": 60}"#).unwrap();
        assert_eq!(config.representative_count, 5);
        assert_eq!(config.time_limit_secs, Some(60));
        assert_eq!(config.representative_prefix, "CSR");
    }
}
