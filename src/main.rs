//! discogs-tagger: map catalog release records to album/track metadata and
//! plan the directory and file names used for tagging.
//!
//! Release documents are read from `--release-dir` as `<id>.json`. Jobs
//! come from `--release-id` arguments and from id files found in
//! `--source` directories. Nothing is written to disk; the planned names
//! are printed.

use anyhow::{bail, Context, Result};
use clap::Parser;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use discogs_tagger::config::TaggerConfig;
use discogs_tagger::mapping::map_release;
use discogs_tagger::naming::{plan_release, ReleasePlan};
use discogs_tagger::progress::{elapsed_label, BatchProgress};
use discogs_tagger::source::{discover_jobs, JsonDirectorySource, ReleaseJob, ReleaseSource};

#[derive(Parser, Debug)]
#[command(name = "discogs-tagger")]
#[command(about = "Plan album tags and file names from catalog release records")]
struct Args {
    /// Directory holding `<release id>.json` documents
    #[arg(long)]
    release_dir: PathBuf,

    /// Release id to process (repeatable)
    #[arg(long = "release-id")]
    release_ids: Vec<String>,

    /// Directory containing an id file (repeatable)
    #[arg(long = "source")]
    sources: Vec<PathBuf>,

    /// Search source directories recursively for id files
    #[arg(long)]
    recursive: bool,

    /// Base directory for planned album directories
    #[arg(long, default_value = ".")]
    destination: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    conf: Option<PathBuf>,

    /// Extension of the audio files, with leading dot
    #[arg(long, default_value = ".flac")]
    extension: String,

    /// Print plans as JSON, one release per line
    #[arg(long)]
    json: bool,

    #[arg(long, default_value = "0")]
    workers: usize,

    /// Hide the progress bar and log progress lines instead
    #[arg(long)]
    log_only: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn collect_jobs(args: &Args, config: &TaggerConfig) -> Vec<ReleaseJob> {
    let mut jobs: Vec<ReleaseJob> = args
        .release_ids
        .iter()
        .map(|id| ReleaseJob {
            release_id: id.trim().to_string(),
            source_dir: None,
        })
        .collect();

    for dir in &args.sources {
        jobs.extend(discover_jobs(dir, &config.source.id_file, args.recursive));
    }

    jobs
}

fn process_job(
    source: &dyn ReleaseSource,
    job: &ReleaseJob,
    config: &TaggerConfig,
    destination: &Path,
    extension: &str,
) -> Result<ReleasePlan> {
    let release = source.fetch_release(&job.release_id)?;
    let album = map_release(&release)?;
    let plan = plan_release(&album, &config.file_formatting, destination, extension)
        .with_context(|| format!("release {}: cannot render names", job.release_id))?;
    Ok(plan)
}

fn print_plan(plan: &ReleasePlan, job: &ReleaseJob) {
    match &job.source_dir {
        Some(dir) => println!("{} ({}) -> {}", plan.release_id, dir.display(), plan.directory.display()),
        None => println!("{} -> {}", plan.release_id, plan.directory.display()),
    }
    println!("  {}", plan.playlist);
    println!("  {}", plan.info);
    for track in &plan.tracks {
        println!("  [{}/{:02}] {}", track.discnumber, track.tracknumber, track.file_name);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    if args.workers > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.workers)
            .build_global()
            .context("Failed to set thread pool size")?;
    }

    let config = match &args.conf {
        Some(path) => TaggerConfig::load(path)?,
        None => TaggerConfig::default(),
    };

    let jobs = collect_jobs(&args, &config);
    if jobs.is_empty() {
        bail!("no releases to process: pass --release-id or --source");
    }
    info!("processing {} release(s)", jobs.len());

    let start = Instant::now();
    let source = JsonDirectorySource::new(&args.release_dir);
    let progress = BatchProgress::new(jobs.len() as u64, "Mapping releases", args.log_only);

    let results: Vec<(ReleaseJob, Result<ReleasePlan>)> = jobs
        .into_par_iter()
        .map(|job| {
            let result = process_job(&source, &job, &config, &args.destination, &args.extension);
            progress.advance();
            (job, result)
        })
        .collect();
    progress.finish();

    let mut failed = 0usize;
    for (job, result) in &results {
        match result {
            Ok(plan) if args.json => println!("{}", serde_json::to_string(plan)?),
            Ok(plan) => print_plan(plan, job),
            Err(e) => {
                failed += 1;
                error!("release {} failed: {:#}", job.release_id, e);
            }
        }
    }

    info!(
        "mapped {}/{} release(s) in {}",
        results.len() - failed,
        results.len(),
        elapsed_label(start.elapsed())
    );

    if failed > 0 {
        bail!("{} release(s) failed", failed);
    }
    Ok(())
}
