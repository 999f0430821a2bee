//! 排班表輸出目的地

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use roster_core::{Result, Schedule};

use crate::table::TableFormat;

/// 排班表輸出目的地
pub trait ArtifactSink {
    /// 保存排班表
    fn persist(&mut self, schedule: &Schedule) -> Result<()>;
}

/// 寫入檔案（自動建立上層目錄）
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    format: TableFormat,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>, format: TableFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArtifactSink for FileSink {
    fn persist(&mut self, schedule: &Schedule) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(&self.path)?);
        self.format.write_to(schedule, &mut writer)?;
        writer.flush()?;

        tracing::info!(
            "排班表已寫入 {}（{} 人 × {} 天）",
            self.path.display(),
            schedule.representative_count(),
            schedule.day_count()
        );
        Ok(())
    }
}

/// 保存在記憶體中
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    format: TableFormat,
    contents: Option<String>,
}

impl MemorySink {
    pub fn new(format: TableFormat) -> Self {
        Self {
            format,
            contents: None,
        }
    }

    /// 最近一次保存的表格內容
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ArtifactSink for MemorySink {
    fn persist(&mut self, schedule: &Schedule) -> Result<()> {
        self.contents = Some(self.format.render(schedule)?);
        Ok(())
    }
}
