//! 客服月排班命令列工具

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use roster_core::{JsonFileSource, OptimizerConfig, ScheduleOutcome};
use roster_export::{ArtifactSink, FileSink, TableFormat};
use roster_optimizer::ScheduleOptimizer;
use tracing_subscriber::EnvFilter;

/// 不可行時的結束碼
const EXIT_INFEASIBLE: u8 = 2;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "CSR monthly shift assignment optimizer")]
struct Cli {
    /// 輸出除錯日誌
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 讀取班別、需求與政策，產生排班表
    Solve {
        /// 含 shifts.json、demand.json、policy.json 的目錄
        #[arg(long)]
        input_dir: PathBuf,
        /// JSON 配置檔
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        representatives: Option<usize>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        time_limit_secs: Option<u64>,
        #[arg(long)]
        tolerance: Option<f64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(outcome) => {
            println!("Result: {}", outcome);
            match outcome {
                ScheduleOutcome::Infeasible => ExitCode::from(EXIT_INFEASIBLE),
                _ => ExitCode::SUCCESS,
            }
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> anyhow::Result<ScheduleOutcome> {
    match command {
        Commands::Solve {
            input_dir,
            config,
            representatives,
            output,
            time_limit_secs,
            tolerance,
        } => {
            let mut config = match config {
                Some(path) => OptimizerConfig::from_json_file(&path)
                    .with_context(|| format!("無法載入配置 {}", path.display()))?,
                None => OptimizerConfig::default(),
            };
            if let Some(count) = representatives {
                config.representative_count = count;
            }
            if let Some(path) = output {
                config = config.with_output_path(path);
            }
            if let Some(secs) = time_limit_secs {
                config = config.with_time_limit_secs(secs);
            }
            if let Some(tolerance) = tolerance {
                config = config.with_tolerance(tolerance);
            }

            let source = JsonFileSource::new(input_dir);
            let optimizer = ScheduleOptimizer::new(config);
            let result = optimizer
                .run(&source, &source, &source)
                .with_context(|| format!("排班優化失敗（輸入目錄 {}）", source.dir().display()))?;

            if let Some(schedule) = &result.schedule {
                let config = optimizer.config();
                let mut sink = FileSink::new(&config.output_path, TableFormat::from_config(config));
                sink.persist(schedule)
                    .with_context(|| format!("無法寫入 {}", config.output_path.display()))?;
            } else if result.not_solved() {
                tracing::warn!("求解器未得出結論（逾時或內部錯誤），結果視為不可行");
            }

            Ok(result.outcome)
        }
    }
}
