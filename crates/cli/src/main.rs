use anyhow::{bail, Result};
use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use media_organizer_core::{organize_with_options, OrganizeOptions, OrganizeReport};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "media-organizer", version)]
#[command(about = "Organize JPEG and MP4 files into YYYY/YYYY_MM_DD folders by capture date")]
#[command(after_help = "Supported formats: JPEG, JPG, MP4")]
struct Cli {
    /// Source directory containing media files
    source: PathBuf,
    /// Output directory for organized files
    destination: PathBuf,
    /// Skip files without a metadata date instead of using the modification time
    #[arg(short, long, default_value_t = false)]
    metadata_only: bool,
    /// Stop at the first file that cannot be moved
    #[arg(long, default_value_t = false)]
    fail_fast: bool,
    /// Show planned moves without changing anything
    #[arg(long, default_value_t = false)]
    dry_run: bool,
    /// Report format printed after the run
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    precheck(&cli.source, &cli.destination)?;

    let options = OrganizeOptions {
        source: cli.source,
        output: cli.destination,
        metadata_only: cli.metadata_only,
        fail_fast: cli.fail_fast,
        dry_run: cli.dry_run,
    };
    let report = organize_with_options(&options)?;

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_table(&report),
    }

    if !report.is_success() {
        bail!("{} file(s) could not be moved", report.failed.len());
    }
    Ok(())
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn precheck(source: &Path, destination: &Path) -> Result<()> {
    if source.as_os_str().to_string_lossy().trim().is_empty() {
        bail!("source directory cannot be empty");
    }
    if destination.as_os_str().to_string_lossy().trim().is_empty() {
        bail!("destination directory cannot be empty");
    }

    match source.metadata() {
        Ok(meta) if !meta.is_dir() => {
            bail!("source path is not a directory: {}", source.display())
        }
        Ok(_) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            bail!("source directory does not exist: {}", source.display())
        }
        Err(err) => bail!("cannot access source directory: {err}"),
    }

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") && !parent.exists() {
            bail!(
                "destination parent directory does not exist: {}",
                parent.display()
            );
        }
    }

    Ok(())
}

fn print_table(report: &OrganizeReport) {
    let verb = if report.dry_run { "would move" } else { "moved" };
    for moved in &report.moved {
        let marker = if moved.source.is_metadata() { "" } else { " [fallback]" };
        println!(
            "{} -> {} ({:?}, {}){}",
            moved.from.display(),
            moved.to.display(),
            moved.source,
            moved.date.format("%Y-%m-%d %H:%M:%S"),
            marker
        );
    }
    for failed in &report.failed {
        println!("FAILED {}: {}", failed.path.display(), failed.error);
    }

    let stats = &report.stats;
    eprintln!(
        "\n{} {} of {} media files (fallback_dated={} scanned={} hidden_skip={} non_media_skip={} no_date_skip={} in_place={} failed={})",
        verb,
        stats.moved,
        stats.media_files,
        fallback_dated(report),
        stats.scanned_files,
        stats.skipped_hidden,
        stats.skipped_non_media,
        stats.skipped_no_date,
        stats.already_in_place,
        stats.failed
    );
}

fn fallback_dated(report: &OrganizeReport) -> usize {
    report
        .moved
        .iter()
        .filter(|moved| !moved.source.is_metadata())
        .count()
}
