use std::{
    io,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "trackreel", version)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Schedule one track and optionally write the frames as JSON Lines.
    Schedule(ScheduleArgs),
    /// Schedule every GPX file under a directory, writing `<stem>-telemetry.jsonl` next to each.
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// JSON config file; missing fields fall back to the preset.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Preset used when no config file is given.
    #[arg(long, value_enum, default_value_t = Preset::Map)]
    preset: Preset,

    /// Override `points_per_frame`.
    #[arg(long)]
    points_per_frame: Option<usize>,

    /// Override `draw_start_offset_s` (seconds).
    #[arg(long)]
    draw_start_offset: Option<f64>,
}

#[derive(Args, Debug)]
struct ScheduleArgs {
    /// Input track (.gpx or .json).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON Lines path.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Root directory to scan.
    #[arg(long)]
    dir: PathBuf,

    /// Process files in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Keep existing outputs instead of overwriting them.
    #[arg(long, default_value_t = false)]
    keep_existing: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// Overlay on a basemap.
    Map,
    /// Standalone layer for chroma-key compositing.
    Chroma,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.cmd {
        Command::Schedule(args) => cmd_schedule(args),
        Command::Batch(args) => cmd_batch(args),
    }
}

fn resolve_config(args: &ConfigArgs) -> anyhow::Result<trackreel::AnimationConfig> {
    let mut cfg = match &args.config {
        Some(path) => trackreel::AnimationConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => match args.preset {
            Preset::Map => trackreel::AnimationConfig::map_overlay(),
            Preset::Chroma => trackreel::AnimationConfig::chroma_key(),
        },
    };
    if let Some(n) = args.points_per_frame {
        cfg.points_per_frame = n;
    }
    if let Some(s) = args.draw_start_offset {
        cfg.draw_start_offset_s = s;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    let cfg = resolve_config(&args.config)?;
    let track = trackreel::load_track(&args.in_path)
        .with_context(|| format!("load track '{}'", args.in_path.display()))?;

    let (timing, stats) = match &args.out {
        Some(out) => {
            let mut sink =
                trackreel::JsonLinesSink::new(trackreel::JsonLinesSinkOpts::new(out.clone()));
            trackreel::render_track(&track, &cfg, &mut sink)?
        }
        None => {
            let mut sink = trackreel::InMemorySink::new();
            trackreel::render_track(&track, &cfg, &mut sink)?
        }
    };

    print_schedule(&args.in_path, &timing, &stats);
    if let Some(out) = &args.out {
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let cfg = resolve_config(&args.config)?;
    let files = trackreel::batch::find_track_files(&args.dir)?;
    let opts = trackreel::batch::BatchOpts {
        parallel: args.parallel,
        threads: args.threads,
        keep_existing: args.keep_existing,
    };
    let summary = trackreel::batch::run_batch(&files, &cfg, &opts)?;

    eprintln!("batch summary for {}:", args.dir.display());
    eprintln!("  found:     {}", summary.found);
    eprintln!("  succeeded: {}", summary.succeeded);
    eprintln!("  failed:    {}", summary.failed);
    for failure in &summary.failures {
        eprintln!("    {}: {}", failure.path.display(), failure.error);
    }
    Ok(())
}

fn print_schedule(input: &Path, timing: &trackreel::FrameSchedule, stats: &trackreel::RenderStats) {
    eprintln!("{}:", input.display());
    eprintln!("  frames:            {}", timing.total_frames);
    eprintln!("  interval_ms:       {:.2}", timing.interval_ms);
    eprintln!("  fps:               {:.2}", timing.fps);
    eprintln!("  expected_duration: {:.2} s", timing.expected_duration_secs());
    eprintln!("  frames_drawn:      {}", stats.frames_drawn);
    eprintln!("  label_updates:     {}", stats.label_updates);
}
