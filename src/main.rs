use anyhow::{Context, Result};
use chrono::{Datelike, Local, Utc};
use clap::Parser;
use glob::Pattern;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use log::{LevelFilter, info, warn};
use serde_json::to_string_pretty;
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use spdx_sanitizer::cli::Cli;
use spdx_sanitizer::config::{Overrides, Settings};
use spdx_sanitizer::history::{GitHistory, repository_root};
use spdx_sanitizer::models::{
    ExtraData, FileReport, FileStatus, Header, Output, REPORT_FORMAT_VERSION,
};
use spdx_sanitizer::sanitize::Sanitizer;
use spdx_sanitizer::scanner::{Counts, ProcessResult, count, process};

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let multi = init_logging(&cli)?;
    let start_time = Utc::now();
    let dry_run = cli.is_dry_run();

    let targets = cli
        .paths
        .iter()
        .map(|path| {
            fs::canonicalize(path).with_context(|| format!("Cannot access {:?}", path))
        })
        .collect::<Result<Vec<_>>>()?;
    let root = resolve_root(&cli, &targets)?;
    info!("Repository root: {}", root.display());

    let settings = Settings::resolve(
        cli.config.as_deref(),
        &root,
        Overrides {
            maintainer: cli.maintainer.clone(),
            license: cli.license.clone(),
            project_name: cli.project_name.clone(),
        },
    )?;

    let exclude_patterns = compile_exclude_patterns(&cli.exclude);
    info!("Exclusion patterns: {:?}", cli.exclude);

    let mut totals = Counts::default();
    for target in &targets {
        let counts = count(target, cli.max_depth, &exclude_patterns, &settings.files)?;
        totals.files += counts.files;
        totals.directories += counts.directories;
        totals.excluded += counts.excluded;
    }
    info!(
        "Found {} candidate files in {} directories ({} items excluded)",
        totals.files, totals.directories, totals.excluded
    );

    let history = GitHistory::new(&root);
    let sanitizer = Sanitizer::new(&settings, &history, &root, Local::now().year());

    let progress_bar = create_progress_bar(&multi, totals.files, cli.quiet)?;
    let mut result = ProcessResult {
        files: Vec::new(),
        excluded_count: 0,
    };
    for target in &targets {
        let mut part = process(
            target,
            cli.max_depth,
            Arc::clone(&progress_bar),
            &exclude_patterns,
            &sanitizer,
            dry_run,
        )?;
        result.files.append(&mut part.files);
        result.excluded_count += part.excluded_count;
    }
    progress_bar.finish_and_clear();

    let end_time = Utc::now();
    let output = create_output(start_time, end_time, result, totals.directories, dry_run);
    let extra = &output.headers[0].extra_data;
    print_summary(&output.files, extra, dry_run);

    if let Some(path) = &cli.output {
        write_output(path, &output)?;
        info!("JSON report written to {}", path.display());
    }

    let failed = extra.failed_count > 0;
    let not_canonical = cli.check && extra.would_change_count > 0;
    Ok(if failed || not_canonical {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn init_logging(cli: &Cli) -> Result<MultiProgress> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr);
    let logger = builder.build();
    let level = logger.filter();

    let multi = MultiProgress::new();
    LogWrapper::new(multi.clone(), logger)
        .try_init()
        .context("Failed to install logger")?;
    log::set_max_level(level);
    Ok(multi)
}

/// `--root`, or the git top level of the first target.
fn resolve_root(cli: &Cli, targets: &[PathBuf]) -> Result<PathBuf> {
    if let Some(root) = &cli.root {
        return fs::canonicalize(root).with_context(|| format!("Cannot access root {:?}", root));
    }

    let first = targets.first().context("No paths given")?;
    let dir = if first.is_dir() {
        first.as_path()
    } else {
        first.parent().unwrap_or(Path::new("."))
    };
    let root = repository_root(dir).context("Cannot determine repository root (use --root)")?;
    fs::canonicalize(&root).with_context(|| format!("Cannot access root {:?}", root))
}

fn compile_exclude_patterns(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|pattern| match Pattern::new(pattern) {
            Ok(compiled) => Some(compiled),
            Err(e) => {
                warn!("Ignoring invalid exclude pattern {:?}: {}", pattern, e);
                None
            }
        })
        .collect()
}

fn create_progress_bar(multi: &MultiProgress, total_files: usize, quiet: bool) -> Result<Arc<ProgressBar>> {
    if quiet {
        return Ok(Arc::new(ProgressBar::hidden()));
    }
    let progress_bar = multi.add(ProgressBar::new(total_files as u64));
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files sanitized ({eta})")
            .context("Failed to create progress bar style")?
            .progress_chars("#>-"),
    );
    Ok(Arc::new(progress_bar))
}

fn create_output(
    start_time: chrono::DateTime<Utc>,
    end_time: chrono::DateTime<Utc>,
    result: ProcessResult,
    total_dirs: usize,
    dry_run: bool,
) -> Output {
    let duration = (end_time - start_time).num_nanoseconds().unwrap_or(0) as f64 / 1_000_000_000.0;

    let tally = |status: FileStatus| result.files.iter().filter(|f| f.status == status).count();
    let extra_data = ExtraData {
        files_count: result.files.len(),
        directories_count: total_dirs,
        excluded_count: result.excluded_count,
        rewritten_count: tally(FileStatus::Rewritten),
        unchanged_count: tally(FileStatus::Unchanged),
        would_change_count: tally(FileStatus::WouldChange),
        skipped_count: tally(FileStatus::Skipped),
        failed_count: tally(FileStatus::Failed),
    };

    let errors: Vec<String> = result
        .files
        .iter()
        .flat_map(|file| {
            file.errors
                .iter()
                .map(move |error| format!("{}: {}", file.path, error))
        })
        .collect();

    Output {
        headers: vec![Header {
            tool_name: env!("CARGO_PKG_NAME").to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            start_timestamp: start_time.to_rfc3339(),
            end_timestamp: end_time.to_rfc3339(),
            duration,
            dry_run,
            extra_data,
            errors,
            output_format_version: REPORT_FORMAT_VERSION.to_string(),
        }],
        files: result.files,
    }
}

fn print_summary(files: &[FileReport], extra: &ExtraData, dry_run: bool) {
    for file in files.iter().filter(|f| f.status == FileStatus::WouldChange) {
        println!("would change: {}", file.path);
    }
    for file in files.iter().filter(|f| f.status == FileStatus::Failed) {
        for error in &file.errors {
            println!("failed: {}: {}", file.path, error);
        }
    }

    let unknown: BTreeSet<&str> = files
        .iter()
        .flat_map(|f| f.unknown_addresses.iter().map(String::as_str))
        .collect();
    if !unknown.is_empty() {
        println!("{} unrecognized contributor addresses:", unknown.len());
        for address in unknown {
            println!("  {}", address);
        }
    }

    let changed = if dry_run {
        format!("{} would change", extra.would_change_count)
    } else {
        format!("{} rewritten", extra.rewritten_count)
    };
    println!(
        "{} files: {}, {} unchanged, {} skipped, {} failed",
        extra.files_count, changed, extra.unchanged_count, extra.skipped_count, extra.failed_count
    );
}

fn write_output(output_file: &Path, output: &Output) -> std::io::Result<()> {
    let json_output = match to_string_pretty(output) {
        Ok(json) => json,
        Err(err) => return Err(std::io::Error::other(err)),
    };
    let mut file = File::create(output_file)?;
    file.write_all(json_output.as_bytes())?;
    Ok(())
}
