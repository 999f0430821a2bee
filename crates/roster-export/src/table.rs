//! 分隔文字表格輸出
//!
//! 第一列為欄標籤（`Day 1` … `Day N`），其後每位客服一列，列首為 `CSR i`。

use std::io::Write;

use roster_core::{OptimizerConfig, Result, Schedule};

/// 表格格式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFormat {
    pub representative_prefix: String,
    pub day_prefix: String,
    pub delimiter: char,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            representative_prefix: "CSR".to_string(),
            day_prefix: "Day".to_string(),
            delimiter: ',',
        }
    }
}

impl TableFormat {
    /// 從優化配置取得表格格式
    pub fn from_config(config: &OptimizerConfig) -> Self {
        Self {
            representative_prefix: config.representative_prefix.clone(),
            day_prefix: config.day_prefix.clone(),
            delimiter: config.delimiter,
        }
    }

    /// 將排班表寫入任意輸出
    pub fn write_to<W: Write>(&self, schedule: &Schedule, out: &mut W) -> Result<()> {
        // 左上角留空
        let mut header = vec![String::new()];
        header.extend(
            (1..=schedule.day_count()).map(|d| self.quote(&format!("{} {}", self.day_prefix, d))),
        );
        self.write_line(out, &header)?;

        for (i, row) in schedule.rows.iter().enumerate() {
            let mut fields = Vec::with_capacity(row.len() + 1);
            fields.push(self.quote(&format!("{} {}", self.representative_prefix, i + 1)));
            fields.extend(row.iter().map(|name| self.quote(name)));
            self.write_line(out, &fields)?;
        }

        Ok(())
    }

    /// 將排班表轉為字串
    pub fn render(&self, schedule: &Schedule) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(schedule, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    fn write_line<W: Write>(&self, out: &mut W, fields: &[String]) -> Result<()> {
        let separator = self.delimiter.to_string();
        writeln!(out, "{}", fields.join(separator.as_str()))?;
        Ok(())
    }

    /// 含分隔字元、引號、換行的欄位加上引號，內部引號加倍
    fn quote(&self, field: &str) -> String {
        let needs_quotes = field.contains(self.delimiter)
            || field.contains('"')
            || field.contains('\n')
            || field.contains('\r');
        if needs_quotes {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}
