use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

mod config;
mod timesheet;

use formgate_core::{FieldCodes, FormHost, ShiftTable, ShiftValidator, TIME_RANGE_ERROR};
use formgate_viewer::{build_report, render_error, render_page};

#[derive(Parser, Debug)]
#[command(
    name = "formgate",
    version,
    about = "Shift-time validation and monthly usage reporting for hosted form data"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch both datasets and render the monthly summary table
    Report {
        /// Config file path
        #[arg(long, default_value = "formgate.toml")]
        config: PathBuf,

        /// Write the HTML here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Emit a standalone page with the stylesheet instead of the bare fragment
        #[arg(long)]
        page: bool,
    },

    /// Validate a timesheet CSV the way the form submission gate would
    Validate {
        /// CSV with start_time,end_time,next_day columns
        file: PathBuf,
    },

    /// Write a default formgate.toml
    InitConfig {
        #[arg(long, default_value = "formgate.toml")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Report { config, out, page } => run_report(config, out, page).await,
        Command::Validate { file } => run_validate(file),
        Command::InitConfig { path } => {
            config::write_default_config(&path)?;
            println!("設定ファイルを作成しました: {}", path.display());
            Ok(())
        }
    }
}

async fn run_report(config_path: PathBuf, out: Option<PathBuf>, page: bool) -> Result<()> {
    let config = config::load_config(&config_path)?;
    let client = reqwest::Client::new();

    match build_report(&client, &config.report_config()).await {
        Ok(outcome) => {
            eprintln!(
                "月別集計が完了しました: 年月 {} 件 / 明細 {} 件 / 絞り込み後 {} 件 / 集計 {} 行",
                outcome.month_count,
                outcome.record_count,
                outcome.filtered_count,
                outcome.buckets.len(),
            );
            write_output(out, &wrap(page, &config, &outcome.html))
        }
        Err(e) => {
            // The error block is still written so a scheduled run leaves
            // something visible in place of the table.
            let block = render_error(&e.to_string());
            write_output(out, &wrap(page, &config, &block))?;
            Err(e.context("月別集計に失敗しました"))
        }
    }
}

fn wrap(page: bool, config: &config::Config, fragment: &str) -> String {
    if page {
        render_page(&config.view.element_id, fragment)
    } else {
        fragment.to_string()
    }
}

fn write_output(out: Option<PathBuf>, body: &str) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("出力しました: {}", path.display());
        }
        None => println!("{body}"),
    }
    Ok(())
}

/// Host double for offline validation: the record comes from a CSV and the
/// per-field annotations collapse into a set of invalid row indexes.
struct CsvHost {
    table: ShiftTable,
    invalid_rows: BTreeSet<usize>,
}

impl FormHost for CsvHost {
    fn record(&self) -> ShiftTable {
        self.table.clone()
    }

    fn set_field_error(&mut self, _table: &str, _field: &str, row: usize, message: Option<&str>) {
        match message {
            Some(_) => {
                self.invalid_rows.insert(row);
            }
            None => {
                self.invalid_rows.remove(&row);
            }
        }
    }
}

fn run_validate(file: PathBuf) -> Result<()> {
    let table = timesheet::load_timesheet(&file)?;
    let row_count = table.rows.len();

    let host = CsvHost {
        table,
        invalid_rows: BTreeSet::new(),
    };
    let mut validator = ShiftValidator::new(host, FieldCodes::default());
    let all_valid = validator.handle_submit();

    for i in 0..row_count {
        if validator.host().invalid_rows.contains(&i) {
            println!("行 {}: NG ({TIME_RANGE_ERROR})", i + 1);
        } else {
            println!("行 {}: OK", i + 1);
        }
    }

    if !all_valid {
        bail!("時刻の入力に不正があります。開始時刻は終了時刻より前に設定してください。");
    }
    println!("全 {row_count} 行のバリデーションに成功しました");
    Ok(())
}
