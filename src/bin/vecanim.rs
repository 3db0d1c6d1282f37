use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "vecanim", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import an SVG file and dump its paths as JSON.
    Import(ImportArgs),
    /// Print the flattened animation timeline of a scene file.
    Timeline(TimelineArgs),
    /// Sample a scene file at one instant and dump the render data as JSON.
    Sample(SampleArgs),
}

#[derive(Parser, Debug)]
struct ImportArgs {
    /// Input SVG file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Optional engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Final drawing width in scene units.
    #[arg(long)]
    width: Option<f64>,

    /// Final drawing height in scene units (ignored when `--width` is given).
    #[arg(long)]
    height: Option<f64>,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Emit JSON instead of a table.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Sample time in seconds.
    #[arg(long)]
    time: f64,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Import(args) => cmd_import(args),
        Command::Timeline(args) => cmd_timeline(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn cmd_import(args: ImportArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => vecanim::EngineConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => vecanim::EngineConfig::default(),
    };
    let options = vecanim::SvgImportOptions {
        width: args.width,
        height: args.height,
    };
    let paths = vecanim::import_svg_file(&args.in_path, &config, options)
        .with_context(|| format!("import svg '{}'", args.in_path.display()))?;
    tracing::info!(paths = paths.len(), "svg imported");

    write_json(args.out.as_deref(), &paths)
}

fn load_scene(in_path: &Path) -> anyhow::Result<vecanim::BuiltScene> {
    let def = vecanim::SceneDef::from_path(in_path)
        .with_context(|| format!("load scene '{}'", in_path.display()))?;
    let base_dir = in_path.parent().unwrap_or_else(|| Path::new("."));
    let built = def
        .build(base_dir)
        .with_context(|| format!("build scene '{}'", in_path.display()))?;
    Ok(built)
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let built = load_scene(&args.in_path)?;
    let track = built.timeline.track();

    if args.json {
        return write_json(None, &track);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "duration {:.3}s", built.timeline.duration())?;
    for entry in &track {
        writeln!(
            out,
            "{:>3}  {:>8.3} .. {:>8.3}  {}",
            entry.row, entry.at, entry.end, entry.name
        )?;
    }
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let mut built = load_scene(&args.in_path)?;
    let frame = built
        .timeline
        .seek(args.time)
        .with_context(|| format!("sample at {}s", args.time))?;

    write_json(args.out.as_deref(), &frame)
}

fn write_json<T: serde::Serialize>(out: Option<&Path>, value: &T) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let file = std::fs::File::create(path)
                .with_context(|| format!("create output file '{}'", path.display()))?;
            let mut writer = std::io::BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value).context("write json")?;
            writer.flush().context("flush output")?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            serde_json::to_writer_pretty(&mut out, value).context("write json")?;
            writeln!(out)?;
        }
    }
    Ok(())
}
