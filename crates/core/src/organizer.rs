use crate::media::{is_hidden, is_media};
use crate::resolver::{resolve_date, DateSource, ResolvedDate};
use crate::unique::unique_name_with_reserved;
use crate::validate::validate_paths;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Default)]
pub struct OrganizeOptions {
    pub source: PathBuf,
    pub output: PathBuf,
    pub metadata_only: bool,
    pub fail_fast: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrganizeStats {
    pub scanned_files: usize,
    pub media_files: usize,
    pub skipped_hidden: usize,
    pub skipped_non_media: usize,
    pub skipped_no_date: usize,
    pub already_in_place: usize,
    pub moved: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovedFile {
    pub from: PathBuf,
    pub to: PathBuf,
    pub date: DateTime<Local>,
    pub source: DateSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeReport {
    pub source: PathBuf,
    pub output: PathBuf,
    pub dry_run: bool,
    pub moved: Vec<MovedFile>,
    pub failed: Vec<FailedFile>,
    pub stats: OrganizeStats,
}

impl OrganizeReport {
    fn new(source: PathBuf, output: PathBuf, dry_run: bool) -> Self {
        Self {
            source,
            output,
            dry_run,
            moved: Vec::new(),
            failed: Vec::new(),
            stats: OrganizeStats::default(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn record_failure(&mut self, path: PathBuf, err: anyhow::Error, fail_fast: bool) -> Result<()> {
        if fail_fast {
            return Err(err);
        }
        warn!("{err:#}");
        self.failed.push(FailedFile {
            path,
            error: format!("{err:#}"),
        });
        self.stats.failed += 1;
        Ok(())
    }
}

enum Placement {
    Moved(MovedFile),
    NoDate,
    InPlace,
}

/// Per-file failures are collected in the report and the walk continues; set
/// `fail_fast` in [`organize_with_options`] to stop at the first one.
pub fn organize(source: &Path, output: &Path, metadata_only: bool) -> Result<OrganizeReport> {
    organize_with_options(&OrganizeOptions {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        metadata_only,
        ..OrganizeOptions::default()
    })
}

pub fn organize_with_options(options: &OrganizeOptions) -> Result<OrganizeReport> {
    let paths = validate_paths(&options.source, &options.output)?;

    if !options.dry_run {
        create_private_dir_all(&paths.output).with_context(|| {
            format!(
                "failed to create output directory: {}",
                paths.output.display()
            )
        })?;
    }

    let mut report = OrganizeReport::new(
        paths.source.clone(),
        paths.output.clone(),
        options.dry_run,
    );
    let mut reserved = HashSet::<PathBuf>::new();
    let mut walker = WalkDir::new(&paths.source).sort_by_file_name().into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| paths.source.clone());
                let err = anyhow::Error::from(err)
                    .context(format!("failed to walk {}", path.display()));
                report.record_failure(path, err, options.fail_fast)?;
                continue;
            }
        };

        let path = entry.path();
        let is_dir = entry.file_type().is_dir();

        if entry.depth() > 0 && is_hidden(entry.file_name()) {
            if is_dir {
                walker.skip_current_dir();
            } else {
                report.stats.scanned_files += 1;
            }
            report.stats.skipped_hidden += 1;
            debug!("skipping hidden {}", path.display());
            continue;
        }

        if is_dir {
            if entry.depth() > 0 && path == paths.output {
                debug!("not descending into output directory {}", path.display());
                walker.skip_current_dir();
            }
            continue;
        }

        report.stats.scanned_files += 1;
        if !is_media(path) {
            report.stats.skipped_non_media += 1;
            continue;
        }
        report.stats.media_files += 1;

        match place_file(path, &paths.output, options, &mut reserved) {
            Ok(Placement::Moved(moved)) => {
                report.stats.moved += 1;
                report.moved.push(moved);
            }
            Ok(Placement::NoDate) => report.stats.skipped_no_date += 1,
            Ok(Placement::InPlace) => report.stats.already_in_place += 1,
            Err(err) => report.record_failure(path.to_path_buf(), err, options.fail_fast)?,
        }
    }

    Ok(report)
}

fn place_file(
    path: &Path,
    output: &Path,
    options: &OrganizeOptions,
    reserved: &mut HashSet<PathBuf>,
) -> Result<Placement> {
    let file_name = path
        .file_name()
        .with_context(|| format!("path has no file name: {}", path.display()))?;
    let name = file_name.to_string_lossy();

    let Some(ResolvedDate { date, source }) = resolve_date(path, options.metadata_only) else {
        info!("Skipping [{name}] - no metadata date found");
        return Ok(Placement::NoDate);
    };

    let date_dir = date_directory(output, &date);
    if path.parent() == Some(date_dir.as_path()) {
        debug!("{} is already organized", path.display());
        return Ok(Placement::InPlace);
    }

    let dest = date_dir.join(unique_name_with_reserved(&date_dir, file_name, reserved));
    reserved.insert(dest.clone());

    if options.dry_run {
        info!("Would move [{name}] to [{}]", dest.display());
    } else {
        create_private_dir_all(&date_dir).with_context(|| {
            format!("failed to create date directory: {}", date_dir.display())
        })?;
        info!("Moving [{name}] to [{}]", dest.display());
        fs::rename(path, &dest).with_context(|| {
            format!(
                "failed to move file: {} -> {}",
                path.display(),
                dest.display()
            )
        })?;
    }

    Ok(Placement::Moved(MovedFile {
        from: path.to_path_buf(),
        to: dest,
        date,
        source,
    }))
}

pub fn date_directory(output: &Path, date: &DateTime<Local>) -> PathBuf {
    output
        .join(date.format("%Y").to_string())
        .join(date.format("%Y_%m_%d").to_string())
}

fn create_private_dir_all(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(path)
}
