use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use palette::Srgb;

use ftir_annotator::annotate::peaks::PeakTable;
use ftir_annotator::data::loader;
use ftir_annotator::{AnnotatorConfig, FigureConfig, annotate, color, render};

/// Plot FTIR spectra with functional-group regions labelled.
#[derive(Debug, Parser)]
#[command(name = "ftir-annotator", version, about)]
struct Cli {
    /// Spectrum files (.csv, .json, .parquet), plotted in the given order.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// PNG file to write.
    #[arg(short, long, default_value = "FTIR_Spectrum.png")]
    output: PathBuf,

    /// Also write the detected peaks as CSV.
    #[arg(long, value_name = "FILE")]
    peaks_csv: Option<PathBuf>,

    /// Also write the detected peaks as JSON.
    #[arg(long, value_name = "FILE")]
    peaks_json: Option<PathBuf>,

    /// Image width in pixels.
    #[arg(long, default_value_t = 1000)]
    width: u32,

    /// Image height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Curve colour, by name or `#rrggbb`.
    #[arg(long, default_value = "black", value_parser = parse_color)]
    color: Srgb<u8>,

    /// Give every file its own hue instead of `--color`.
    #[arg(long)]
    distinct_colors: bool,
}

fn parse_color(s: &str) -> Result<Srgb<u8>, String> {
    color::named(s).ok_or_else(|| format!("unknown colour '{s}'"))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let colors = if cli.distinct_colors {
        color::generate_palette(cli.files.len())
    } else {
        vec![cli.color; cli.files.len()]
    };

    let (series, _failures) = loader::load_all(&cli.files, &colors);
    if series.is_empty() {
        bail!("none of the {} input files could be loaded", cli.files.len());
    }

    // Load failures and skipped series are reported through `log::warn!`.
    let annotation = annotate(&series, &AnnotatorConfig::default());

    let figure_config = FigureConfig {
        width: cli.width,
        height: cli.height,
        ..FigureConfig::default()
    };
    render::save_png(&annotation.figure, &figure_config, &cli.output)?;

    println!("Detected Peaks");
    print!("{}", annotation.peaks);

    if let Some(path) = &cli.peaks_csv {
        write_table(path, &annotation.peaks, PeakTable::write_csv)?;
    }
    if let Some(path) = &cli.peaks_json {
        write_table(path, &annotation.peaks, PeakTable::write_json)?;
    }
    Ok(())
}

fn write_table(
    path: &Path,
    table: &PeakTable,
    write: fn(&PeakTable, BufWriter<File>) -> Result<()>,
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write(table, BufWriter::new(file)).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
