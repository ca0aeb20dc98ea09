use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vinyl", version, about = "Polar vinyl-record chart of a ranked song list")]
struct Cli {
    /// Log at DEBUG level (RUST_LOG still takes precedence when set).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the chart to an SVG or PNG file.
    Render(RenderArgs),
    /// Print the derived records (ordinal + glyph size) as JSON.
    Derive(DeriveArgs),
    /// Print the composed draw program as JSON.
    Program(ProgramArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Song table: a CSV path, `-` for stdin, or an http(s) URL.
    #[arg(long = "in")]
    input: String,

    /// Design JSON; the reference design is used when omitted.
    #[arg(long)]
    design: Option<PathBuf>,

    /// Override the glyph size divisor.
    #[arg(long)]
    scale: Option<f64>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output path; `.svg` or `.png`.
    #[arg(long)]
    out: PathBuf,

    /// Pixels per inch.
    #[arg(long, default_value_t = 100)]
    dpi: u32,

    /// Side of the square canvas, in inches.
    #[arg(long, default_value_t = 10.0)]
    size_in: f64,

    /// Extra font directory used when rasterizing text (repeatable).
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Keep highlight labels on their anchors.
    #[arg(long)]
    no_repel: bool,
}

#[derive(Args, Debug)]
struct DeriveArgs {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Args, Debug)]
struct ProgramArgs {
    #[command(flatten)]
    input: InputArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Derive(args) => cmd_derive(args),
        Command::Program(args) => cmd_program(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default.to_owned());
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn read_design(path: Option<&Path>, scale: Option<f64>) -> anyhow::Result<vinyl::DesignConfig> {
    let mut design = match path {
        Some(p) => vinyl::DesignConfig::from_path(p)?,
        None => vinyl::DesignConfig::reference(),
    };
    if let Some(s) = scale {
        design.glyph.scale = s;
    }
    design.validate()?;
    Ok(design)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let design = read_design(args.input.design.as_deref(), args.input.scale)?;
    let source = vinyl::DataSource::parse(&args.input.input);
    let opts = vinyl::RenderOpts {
        size_in: args.size_in,
        dpi: f64::from(args.dpi),
        repel: !args.no_repel,
        font_dirs: args.font_dirs,
        ..vinyl::RenderOpts::default()
    };

    let summary = vinyl::run(&source, &design, &opts, &args.out)
        .with_context(|| format!("render '{}'", args.out.display()))?;
    tracing::info!(
        records = summary.records,
        highlights = summary.highlights,
        primitives = summary.primitives,
        "render done"
    );

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_derive(args: DeriveArgs) -> anyhow::Result<()> {
    let design = read_design(args.input.design.as_deref(), args.input.scale)?;
    let songs = vinyl::load_songs(&vinyl::DataSource::parse(&args.input.input))?;
    let derived = vinyl::derive(&songs, design.glyph)?;
    print_json(&derived)
}

fn cmd_program(args: ProgramArgs) -> anyhow::Result<()> {
    let design = read_design(args.input.design.as_deref(), args.input.scale)?;
    let songs = vinyl::load_songs(&vinyl::DataSource::parse(&args.input.input))?;
    let chart = vinyl::build_chart(&songs, &design)?;
    print_json(&chart.program)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).context("serialize json")?;
    writeln!(out).context("write stdout")?;
    Ok(())
}
