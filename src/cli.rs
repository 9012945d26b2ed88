use crate::dosage::Category;
use crate::utils::{GenomicRegion, Result};
use chrono::Datelike;
use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="cnvdose",
          version=&**FULL_VERSION,
          about="Heuristic per-sample CNV dosage scoring from BAF and LRR",
          long_about = None,
          disable_help_subcommand = true,
          after_help = format!("Copyright (C) 2023-{}
This program comes with ABSOLUTELY NO WARRANTY; it is intended for
research use only and not for use in diagnostic procedures.", chrono::Utc::now().year()),
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Score every sample and select the top sample")]
    Score(ScoreArgs),
    #[clap(about = "Plot BAF and LRR of the top (or a named) sample")]
    Plot(PlotArgs),
}

/// Options shared by every subcommand that scores samples
#[derive(Args, Debug)]
pub struct ScoringArgs {
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "observations")]
    #[clap(help = "Tab-separated table of per-site BAF and LRR values (optionally gzipped)")]
    #[clap(value_name = "TSV")]
    #[arg(value_parser = check_file_exists)]
    pub observations_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'g')]
    #[clap(long = "gene")]
    #[clap(help = "Gene label reported for the region")]
    #[clap(value_name = "GENE")]
    #[arg(value_parser = check_gene_label_nonempty)]
    pub gene_label: String,

    #[clap(required = true)]
    #[clap(short = 'r')]
    #[clap(long = "region")]
    #[clap(help = "Region to score (e.g., chr22:42126499-42130865)")]
    #[clap(value_name = "REGION")]
    #[arg(value_parser = region_from_string)]
    pub region: GenomicRegion,

    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(help = "Number of threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    #[arg(value_parser = threads_in_range)]
    pub num_threads: usize,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "min-variants")]
    #[clap(value_name = "MIN_VARIANTS")]
    #[clap(help = "Minimum number of sites required to score a sample (0 disables the check)")]
    #[clap(default_value = "10")]
    pub min_variants: usize,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "rank-by")]
    #[clap(value_name = "CATEGORY")]
    #[clap(help = "Score used to select the top sample (baf-insertion, l2r-deletion, l2r-insertion)")]
    #[clap(default_value = "l2r-deletion")]
    pub rank_by: Category,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "lrr-cutoff")]
    #[clap(value_name = "CUTOFF")]
    #[clap(help = "Absolute LRR beyond which a site counts as deleted or inserted")]
    #[clap(default_value = "0.2")]
    #[arg(value_parser = ensure_positive_float)]
    pub lrr_cutoff: f64,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("score")))]
#[command(arg_required_else_help(true))]
pub struct ScoreArgs {
    #[command(flatten)]
    pub scoring: ScoringArgs,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-prefix")]
    #[clap(help = "Prefix for output files")]
    #[clap(value_name = "OUTPUT_PREFIX")]
    #[arg(value_parser = check_prefix_path)]
    pub output_prefix: String,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "report-top")]
    #[clap(value_name = "N")]
    #[clap(help = "Number of ranked samples to log")]
    #[clap(default_value = "5")]
    pub report_top: usize,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("plot")))]
#[command(arg_required_else_help(true))]
pub struct PlotArgs {
    #[command(flatten)]
    pub scoring: ScoringArgs,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-prefix")]
    #[clap(help = "Prefix for output images")]
    #[clap(value_name = "OUTPUT_PREFIX")]
    #[arg(value_parser = check_prefix_path)]
    pub output_prefix: String,

    #[clap(help_heading("Plotting"))]
    #[clap(short = 's')]
    #[clap(long = "sample")]
    #[clap(value_name = "SAMPLE")]
    #[clap(help = "Plot this sample instead of the top-scoring one")]
    #[arg(value_parser = check_sample_name_nonempty)]
    pub sample_id: Option<String>,

    #[clap(help_heading("Plotting"))]
    #[clap(short = 'f')]
    #[clap(long = "format")]
    #[clap(value_name = "FORMAT")]
    #[clap(help = "Image format")]
    #[clap(value_parser(["svg", "png", "pdf"]))]
    #[clap(default_value = "svg")]
    pub format: String,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_prefix_path(s: &str) -> Result<String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(s.to_string())
}

fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid thread number", s))?;
    if thread >= 1 {
        Ok(thread)
    } else {
        Err("Number of threads must be at least 1".into())
    }
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn check_sample_name_nonempty(s: &str) -> Result<String> {
    if s.trim().is_empty() {
        Err("Sample name cannot be an empty string".to_string())
    } else {
        Ok(s.to_string())
    }
}

fn check_gene_label_nonempty(s: &str) -> Result<String> {
    if s.trim().is_empty() {
        Err("Gene label cannot be an empty string".to_string())
    } else {
        Ok(s.to_string())
    }
}

fn region_from_string(s: &str) -> Result<GenomicRegion> {
    GenomicRegion::from_string(s)
}

fn ensure_positive_float(s: &str) -> Result<f64> {
    let value = s
        .parse::<f64>()
        .map_err(|e| format!("Could not parse float: {}", e))?;
    if !value.is_finite() || value <= 0.0 {
        Err(format!("The value must be positive, got: {}", value))
    } else {
        Ok(value)
    }
}
