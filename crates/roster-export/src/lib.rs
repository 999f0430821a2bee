//! # Roster Export
//!
//! 排班表輸出（分隔文字表格、檔案與記憶體目的地）

pub mod sink;
pub mod table;

// Re-export 主要類型
pub use sink::{ArtifactSink, FileSink, MemorySink};
pub use table::TableFormat;
