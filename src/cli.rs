use crate::config::{Config, load_config};
use crate::initiatives::collect_initiatives;
use crate::layout::compute_layout;
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::model::parse_esa;
use crate::render::{render_svg, write_output_svg};
use crate::validate::require_root;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "esadash", version, about = "Security capability maturity dashboard renderer")]
pub struct Args {
    /// Input dashboard JSON file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON5 file (theme, themeVariables, layout, render)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// PNG resolution; overrides the config file
    #[arg(long = "dpi")]
    pub dpi: Option<f32>,

    /// Emit the flattened initiative list as JSON instead of a dashboard
    #[arg(long = "initiatives")]
    pub initiatives: bool,

    /// Debug logging on stderr (RUST_LOG still wins when set)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    /// Layout geometry dump
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(dpi) = args.dpi {
        config.render.dpi = dpi;
    }

    let input = read_input(args.input.as_deref())?;
    let esa = require_root(parse_esa(&input)?)?;

    if args.initiatives {
        let rows = collect_initiatives(&esa)?;
        return write_json(&rows, args.output.as_deref());
    }

    let layout = compute_layout(&esa, &config.layout)?;
    match args.output_format {
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => write_layout_dump(path, &layout)?,
            None => write_json(&LayoutDump::from_layout(&layout), None)?,
        },
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let svg = render_svg(&layout, &config.theme);
            write_png(&svg, &output, &config)?;
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires the `png` feature"
    ))
}

fn write_json<T: serde::Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            serde_json::to_writer_pretty(io::BufWriter::new(file), value)?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, value)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!(
        "Output path required for {} output",
        ext
    ))
}
