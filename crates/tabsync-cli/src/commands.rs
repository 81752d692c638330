//! Command implementations: wire CSV workbooks to the engine.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::{info, warn};

use tabsync_engine::{CellRange, EditEvent, SyncReport, append_month_columns};
use tabsync_model::WorkbookConfig;
use tabsync_store::{MemoryWorkbook, TabularStore, load_workbook, save_workbook};

use crate::cli::{AppendDaysArgs, BackupArgs, EventArgs, SweepArgs, WorkbookArgs};

struct RunContext {
    workbook: MemoryWorkbook,
    config: WorkbookConfig,
    holidays: BTreeSet<NaiveDate>,
    now: NaiveDateTime,
}

fn load_context(args: &WorkbookArgs) -> Result<RunContext> {
    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parse config {}", path.display()))?
        }
        None => WorkbookConfig::default(),
    };
    let workbook = load_workbook(&args.workbook_dir, config.header_rows)
        .with_context(|| format!("load workbook {}", args.workbook_dir.display()))?;
    let holidays = match &args.holidays {
        Some(path) => load_holidays(path)?,
        None => BTreeSet::new(),
    };
    let now = match &args.now {
        Some(text) => NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
            .with_context(|| format!("parse --now value {text:?}"))?,
        None => Local::now().naive_local(),
    };
    Ok(RunContext {
        workbook,
        config,
        holidays,
        now,
    })
}

fn load_holidays(path: &Path) -> Result<BTreeSet<NaiveDate>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read holidays {}", path.display()))?;
    let mut dates = BTreeSet::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match NaiveDate::parse_from_str(line, "%Y-%m-%d") {
            Ok(date) => {
                dates.insert(date);
            }
            Err(_) => warn!(line, "skipping unparseable holiday entry"),
        }
    }
    Ok(dates)
}

fn finish(ctx: &RunContext, args: &WorkbookArgs) -> Result<()> {
    if args.dry_run {
        info!("dry run, workbook not written");
        return Ok(());
    }
    save_workbook(&args.workbook_dir, &ctx.workbook)
        .with_context(|| format!("write workbook {}", args.workbook_dir.display()))?;
    Ok(())
}

pub fn run_sweep(args: &SweepArgs) -> Result<SyncReport> {
    let mut ctx = load_context(&args.workbook)?;
    let report = tabsync_engine::run_full_sync(
        &mut ctx.workbook,
        &ctx.config,
        ctx.now,
        &ctx.holidays,
    )?;
    finish(&ctx, &args.workbook)?;
    Ok(report)
}

pub fn run_event(args: &EventArgs) -> Result<SyncReport> {
    let mut ctx = load_context(&args.workbook)?;
    let event = EditEvent::new(
        &args.table,
        CellRange {
            row: args.row,
            col: args.col,
            n_rows: args.n_rows,
            n_cols: args.n_cols,
        },
    );
    let report = tabsync_engine::apply_event(
        &mut ctx.workbook,
        &ctx.config,
        &event,
        ctx.now,
        &ctx.holidays,
    )?;
    finish(&ctx, &args.workbook)?;
    Ok(report)
}

pub fn run_append_days(args: &AppendDaysArgs) -> Result<usize> {
    let (year, month) = parse_month(&args.month)?;
    let mut ctx = load_context(&args.workbook)?;
    let mut updated = 0;
    for name in ctx.workbook.ledger_names(&ctx.config.ledger_prefix) {
        let header = ctx.workbook.read_header(&name)?;
        if let Some(new_header) = append_month_columns(&header, &ctx.config, year, month) {
            ctx.workbook.write_header(&name, new_header)?;
            updated += 1;
            info!(ledger = %name, month = %args.month, "appended day columns");
        }
    }
    finish(&ctx, &args.workbook)?;
    Ok(updated)
}

fn parse_month(text: &str) -> Result<(i32, u32)> {
    let Some((year, month)) = text.split_once('-') else {
        bail!("month must be YYYY-MM, got {text:?}");
    };
    let year: i32 = year.parse().with_context(|| format!("parse year in {text:?}"))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("parse month in {text:?}"))?;
    if !(1..=12).contains(&month) {
        bail!("month out of range in {text:?}");
    }
    Ok((year, month))
}

/// Copy the workbook directory into the backup destination under a
/// date-stamped name, then prune backups older than the retention window.
pub fn run_backup(args: &BackupArgs) -> Result<(PathBuf, usize)> {
    let source = &args.workbook_dir;
    if !source.is_dir() {
        bail!("workbook directory not found: {}", source.display());
    }
    let stem = source
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("workbook");
    let dest_root = args
        .dest
        .clone()
        .unwrap_or_else(|| source.with_extension("backups"));
    let today = Local::now().date_naive();
    let target = dest_root.join(format!("{stem} {today}"));
    fs::create_dir_all(&target)
        .with_context(|| format!("create backup dir {}", target.display()))?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            fs::copy(entry.path(), target.join(entry.file_name()))?;
        }
    }
    info!(backup = %target.display(), "created workbook backup");

    let cutoff = today
        .checked_sub_days(chrono::Days::new(args.retain_days))
        .unwrap_or(today);
    let mut pruned = 0;
    for entry in fs::read_dir(&dest_root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() || entry.path() == target {
            continue;
        }
        let name = entry.file_name();
        let Some(date_part) = name.to_str().and_then(|n| n.rsplit(' ').next()) else {
            continue;
        };
        let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") else {
            continue;
        };
        if date < cutoff {
            match fs::remove_dir_all(entry.path()) {
                Ok(()) => pruned += 1,
                Err(error) => {
                    warn!(backup = %entry.path().display(), %error, "failed to prune backup");
                }
            }
        }
    }
    Ok((target, pruned))
}
