use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser};
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "giffer", version, about = "Combine still images into an animated GIF")]
struct Cli {
    /// Input images, in frame order. Formats are detected from file content.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output GIF path.
    #[arg(long, short)]
    out: PathBuf,

    /// JSON options file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-frame delay in centiseconds.
    #[arg(long)]
    delay: Option<u16>,

    /// Number of replays (0 loops forever).
    #[arg(long)]
    loop_count: Option<u16>,

    /// Quantizer speed for frames above 256 colors (1 = best, 30 = fastest).
    #[arg(long)]
    speed: Option<i32>,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Skip remaining frames once one has failed.
    #[arg(long, default_value_t = false)]
    fail_fast: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let opts = build_options(&cli)?;
    let inputs = read_inputs(&cli.inputs)?;

    let giffer = giffer::Giffer::new(opts)?;
    let gif = giffer.encode(&inputs)?;

    if let Some(parent) = cli.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&cli.out, &gif)
        .with_context(|| format!("write gif '{}'", cli.out.display()))?;

    eprintln!("wrote {} ({} frames)", cli.out.display(), inputs.len());
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn build_options(cli: &Cli) -> anyhow::Result<giffer::GifferOptions> {
    let mut opts = match &cli.config {
        Some(path) => giffer::GifferOptions::from_path(path)?,
        None => giffer::GifferOptions::default(),
    };
    if let Some(delay) = cli.delay {
        opts.delay_cs = delay;
    }
    if let Some(count) = cli.loop_count {
        opts.loop_count = giffer::LoopCount(count);
    }
    if let Some(speed) = cli.speed {
        opts.quantize_speed = speed;
    }
    if cli.threads.is_some() {
        opts.threading.threads = cli.threads;
    }
    if cli.fail_fast {
        opts.threading.fail_fast = true;
    }
    opts.validate()?;
    Ok(opts)
}

fn read_inputs(paths: &[PathBuf]) -> anyhow::Result<Vec<Vec<u8>>> {
    paths.iter().map(|p| read_input(p)).collect()
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read input image '{}'", path.display()))
}
