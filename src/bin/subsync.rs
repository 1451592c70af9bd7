use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;
use subsync::{sync_files_with_report, SubsyncResult, SyncConfig};

/// Re-time a subtitle track against a reference track with correct timing
#[derive(Parser, Debug)]
#[command(name = "subsync", version, about)]
struct Args {
    /// Reference SRT file whose timing is correct (UTF-8)
    synced: PathBuf,

    /// SRT file to re-time (UTF-8)
    target: PathBuf,

    /// Where to write the re-timed SRT file
    output: PathBuf,

    /// Drop captions containing this text (case-insensitive); repeatable
    #[arg(long = "filler", value_name = "TEXT")]
    fillers: Vec<String>,

    /// Number of largest gaps kept as landmarks per track
    #[arg(long, default_value_t = SyncConfig::DEFAULT_MAX_LANDMARKS)]
    landmarks: usize,

    /// Largest residual accepted as a landmark match
    #[arg(long, value_name = "MS", default_value_t = SyncConfig::DEFAULT_MATCH_TOLERANCE_MS)]
    tolerance_ms: f64,

    /// Landmarks a hypothesis must match to be considered
    #[arg(long, default_value_t = SyncConfig::DEFAULT_MIN_MATCHES)]
    min_matches: usize,

    /// Minimum distance between the two anchor landmarks of a hypothesis
    #[arg(long, value_name = "MS", default_value_t = SyncConfig::DEFAULT_MIN_ANCHOR_SPAN_MS)]
    min_span_ms: f64,

    /// Run the correspondence search on a single thread
    #[arg(long)]
    sequential: bool,

    /// Write the alignment report as JSON
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> SyncConfig {
        let defaults = SyncConfig::default();
        SyncConfig {
            max_landmarks: self.landmarks,
            min_anchor_span_ms: self.min_span_ms,
            match_tolerance_ms: self.tolerance_ms,
            min_matches: self.min_matches,
            filler_markers: if self.fillers.is_empty() {
                defaults.filler_markers
            } else {
                self.fillers.clone()
            },
            parallel: !self.sequential,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> SubsyncResult<()> {
    let config = args.config();
    let report = sync_files_with_report(
        &args.synced,
        &args.target,
        &args.output,
        args.report.as_ref(),
        &config,
    )?;

    let transform = report.alignment.transform;
    println!(
        "Re-timed {} -> {} (scale {:.6}, offset {:+.0} ms, residual {:.1} ms over {} landmarks)",
        args.target.display(),
        args.output.display(),
        transform.scale,
        transform.offset_ms(),
        report.alignment.score,
        report.alignment.matched
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("subsync: {} failed: {}", e.stage(), e);
            ExitCode::FAILURE
        }
    }
}
