use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use posterkit::{EmojiConfig, MonthlyReport, PosterConfig, PosterVariant, SampleMonth};

#[derive(Parser, Debug)]
#[command(name = "posterkit", version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a generative poster as a PNG.
    Poster(PosterArgs),
    /// Write a monthly sales report as a PDF.
    Report(ReportArgs),
    /// Render the animated checkmark emoji as a GIF.
    Emoji(EmojiArgs),
}

#[derive(Parser, Debug)]
struct PosterArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Poster config JSON; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    variant: Option<PosterVariant>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Directory holding the poster fonts.
    #[arg(long)]
    fonts_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ReportArgs {
    /// Output PDF path.
    #[arg(long, required_unless_present = "out_dir", conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// Write every sample month into this directory instead.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Report data JSON; defaults to the sample month.
    #[arg(long, conflicts_with = "out_dir")]
    data: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = SampleMonth::Jan)]
    month: SampleMonth,
}

#[derive(Parser, Debug)]
struct EmojiArgs {
    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Emoji config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Poster(args) => cmd_poster(args),
        Command::Report(args) => cmd_report(args),
        Command::Emoji(args) => cmd_emoji(args),
    }
}

fn cmd_poster(args: PosterArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => PosterConfig::from_json_path(path)
            .with_context(|| format!("load poster config '{}'", path.display()))?,
        None => PosterConfig::default(),
    };
    if let Some(variant) = args.variant {
        cfg.variant = variant;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    if let Some(width) = args.width {
        cfg.width = width;
    }
    if let Some(height) = args.height {
        cfg.height = height;
    }
    if args.fonts_dir.is_some() {
        cfg.fonts_dir = args.fonts_dir;
    }

    let saved = posterkit::posters::generate(&cfg, &args.out)
        .with_context(|| format!("render {} poster to '{}'", cfg.variant, args.out.display()))?;
    println!("{saved}");
    Ok(())
}

fn cmd_report(args: ReportArgs) -> anyhow::Result<()> {
    if let Some(dir) = &args.out_dir {
        let written = posterkit::report::generate_samples(dir)
            .with_context(|| format!("write sample reports into '{}'", dir.display()))?;
        for pdf in written {
            println!("{pdf}");
        }
        return Ok(());
    }

    let out = args
        .out
        .context("either --out or --out-dir is required")?;
    let report = match &args.data {
        Some(path) => MonthlyReport::from_json_path(path)
            .with_context(|| format!("load report data '{}'", path.display()))?,
        None => args.month.report(),
    };
    let pdf = posterkit::report::generate(&report, &out)
        .with_context(|| format!("write report '{}'", out.display()))?;
    println!("{pdf}");
    Ok(())
}

fn cmd_emoji(args: EmojiArgs) -> anyhow::Result<()> {
    let cfg = match &args.config {
        Some(path) => EmojiConfig::from_json_path(path)
            .with_context(|| format!("load emoji config '{}'", path.display()))?,
        None => EmojiConfig::default(),
    };
    let saved = posterkit::emoji::generate(&cfg, &args.out)
        .with_context(|| format!("write emoji '{}'", args.out.display()))?;
    println!("{saved}");
    Ok(())
}
