//! Labelpad: a bounding-box playground core.
//!
//! Labelpad turns rectangles drawn on a canvas into normalized annotations
//! and renders them as YOLO, COCO or Pascal VOC text. Every export is a pure
//! function of the annotation set, so a UI shell only has to forward pointer
//! events and display what it gets back.
//!
//! # Modules
//!
//! - [`ir`]: Geometry, class and annotation types plus the format codecs
//! - [`board`]: The box model (add / undo / clear) and drag tracking
//! - [`export`]: Format selection over the three codecs
//! - [`overlay`]: Render descriptions for drawn boxes
//! - [`session`]: Single-owner playground state driving a host surface
//! - [`validation`]: Annotation set validation and error reporting
//! - [`stats`]: Per-class counts
//! - [`sample`]: Random sample sets
//! - [`config`]: Reference frame and class list
//! - [`error`]: Error types for labelpad operations

pub mod board;
pub mod config;
pub mod error;
pub mod export;
pub mod ir;
pub mod overlay;
pub mod sample;
pub mod session;
pub mod stats;
pub mod validation;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use crate::board::BoxModel;
use crate::config::PlaygroundConfig;
use crate::export::ExportFormat;
use crate::ir::{AnnotationSet, BBoxXYWH, ClassId, FrameSize, Pixel};
use crate::validation::{ValidateOptions, ValidationReport};

pub use error::LabelpadError;

/// The labelpad CLI application.
#[derive(Parser)]
#[command(name = "labelpad")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// YAML file overriding the reference frame and class list.
    #[arg(long, global = true, env = "LABELPAD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Normalize drawn rectangles and print them in an export format.
    Export(ExportArgs),
    /// Convert an export from one format to another.
    Convert(ConvertArgs),
    /// Validate an exported annotation file.
    Validate(ValidateArgs),
    /// Show per-class annotation counts.
    Stats(StatsArgs),
    /// Print a random sample annotation set.
    Sample(SampleArgs),
    /// List the configured classes.
    Classes,
}

/// Export format as accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Yolo,
    #[value(alias = "coco-json")]
    Coco,
    #[value(alias = "voc", alias = "pascal-voc")]
    Pascal,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Yolo => ExportFormat::Yolo,
            FormatArg::Coco => ExportFormat::Coco,
            FormatArg::Pascal => ExportFormat::Pascal,
        }
    }
}

/// Report output style.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum ReportOutput {
    #[default]
    Text,
    Json,
}

/// Arguments for the export subcommand.
#[derive(clap::Args)]
struct ExportArgs {
    /// Output format.
    #[arg(long, value_enum, default_value = "yolo")]
    format: FormatArg,

    /// Rendered canvas size the rectangles were drawn on, as WIDTHxHEIGHT.
    #[arg(long, default_value = "640x480")]
    canvas: FrameSize,

    /// Class id assigned to every rectangle.
    #[arg(long, default_value_t = 0)]
    class: usize,

    /// Pixel rectangle as LEFT,TOP,WIDTH,HEIGHT. Repeatable.
    #[arg(long = "box", value_name = "L,T,W,H")]
    boxes: Vec<String>,
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    /// Input file.
    input: PathBuf,

    /// Input format.
    #[arg(long, value_enum)]
    from: FormatArg,

    /// Output format.
    #[arg(long, value_enum)]
    to: FormatArg,
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Input file to validate.
    input: PathBuf,

    /// Input format.
    #[arg(long, value_enum, default_value = "yolo")]
    from: FormatArg,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report.
    #[arg(long, value_enum, default_value = "text")]
    output: ReportOutput,
}

/// Arguments for the stats subcommand.
#[derive(clap::Args)]
struct StatsArgs {
    /// Input file.
    input: PathBuf,

    /// Input format.
    #[arg(long, value_enum, default_value = "yolo")]
    from: FormatArg,

    /// Output format for the report.
    #[arg(long, value_enum, default_value = "text")]
    output: ReportOutput,
}

/// Arguments for the sample subcommand.
#[derive(clap::Args)]
struct SampleArgs {
    /// Random seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Output format.
    #[arg(long, value_enum, default_value = "yolo")]
    format: FormatArg,
}

/// Run the labelpad CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), LabelpadError> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("labelpad {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Draw, normalize and export bounding boxes.");
        println!();
        println!("Run 'labelpad --help' for usage information.");
        return Ok(());
    };

    let config = load_config(cli.config.as_deref())?;

    match command {
        Commands::Export(args) => run_export(args, &config),
        Commands::Convert(args) => run_convert(args, &config),
        Commands::Validate(args) => run_validate(args, &config),
        Commands::Stats(args) => run_stats(args, &config),
        Commands::Sample(args) => run_sample(args, &config),
        Commands::Classes => run_classes(&config),
    }
}

fn load_config(path: Option<&Path>) -> Result<PlaygroundConfig, LabelpadError> {
    match path {
        Some(path) => PlaygroundConfig::from_yaml_file(path),
        None => Ok(PlaygroundConfig::default()),
    }
}

/// Execute the export subcommand.
fn run_export(args: ExportArgs, config: &PlaygroundConfig) -> Result<(), LabelpadError> {
    let class_id = ClassId::new(args.class);
    if !config.classes.contains(class_id) {
        return Err(LabelpadError::UnknownClass {
            class_id: args.class,
            class_count: config.classes.len(),
        });
    }

    let rects = args
        .boxes
        .iter()
        .map(|raw| parse_pixel_rect(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let mut model = BoxModel::new(&config.classes);
    for rect in rects {
        model.add_box(rect, args.canvas, class_id);
    }
    log::info!(
        "kept {} of {} rectangle(s) on a {} canvas",
        model.count(),
        args.boxes.len(),
        args.canvas
    );

    let format = ExportFormat::from(args.format);
    emit(&format.encode(model.annotations(), config));
    Ok(())
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs, config: &PlaygroundConfig) -> Result<(), LabelpadError> {
    let from = ExportFormat::from(args.from);
    let to = ExportFormat::from(args.to);

    let set = read_set(&args.input, from, config)?;
    let report = validate(&set, from, config, false);
    if !report.is_ok() {
        return Err(validation_failed(report));
    }

    log::info!("converting {} annotation(s) from {from} to {to}", set.len());
    emit(&to.encode(&set, config));
    Ok(())
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs, config: &PlaygroundConfig) -> Result<(), LabelpadError> {
    let from = ExportFormat::from(args.from);
    let set = read_set(&args.input, from, config)?;
    let report = validate(&set, from, config, args.strict);

    match args.output {
        ReportOutput::Json => {
            let summary = serde_json::json!({
                "error_count": report.error_count(),
                "warning_count": report.warning_count(),
                "issues": report.issues,
            });
            let json = serde_json::to_string_pretty(&summary).map_err(LabelpadError::ReportWrite)?;
            println!("{json}");
        }
        ReportOutput::Text => print!("{report}"),
    }

    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (args.strict && has_warnings) {
        Err(validation_failed(report))
    } else {
        Ok(())
    }
}

/// Execute the stats subcommand.
fn run_stats(args: StatsArgs, config: &PlaygroundConfig) -> Result<(), LabelpadError> {
    let set = read_set(&args.input, args.from.into(), config)?;
    let report = stats::class_stats(&set, &config.classes, &stats::StatsOptions::default());

    match args.output {
        ReportOutput::Json => {
            let json = serde_json::to_string_pretty(&report).map_err(LabelpadError::ReportWrite)?;
            println!("{json}");
        }
        ReportOutput::Text => print!("{report}"),
    }
    Ok(())
}

/// Execute the sample subcommand.
fn run_sample(args: SampleArgs, config: &PlaygroundConfig) -> Result<(), LabelpadError> {
    let opts = sample::SampleOptions {
        seed: args.seed,
        ..Default::default()
    };
    let set = sample::sample_set(&config.classes, &opts)?;
    log::info!("generated {} sample annotation(s)", set.len());

    emit(&ExportFormat::from(args.format).encode(&set, config));
    Ok(())
}

/// Execute the classes subcommand.
fn run_classes(config: &PlaygroundConfig) -> Result<(), LabelpadError> {
    for (id, entry) in config.classes.iter() {
        println!("{:>2}  {:<12} {}", id.index(), entry.name, entry.color);
    }
    Ok(())
}

fn read_set(
    path: &Path,
    format: ExportFormat,
    config: &PlaygroundConfig,
) -> Result<AnnotationSet, LabelpadError> {
    let text = fs::read_to_string(path)?;
    let set = format.decode(&text, config)?;
    log::info!(
        "read {} annotation(s) from {} as {format}",
        set.len(),
        path.display()
    );
    Ok(set)
}

fn validate(
    set: &AnnotationSet,
    format: ExportFormat,
    config: &PlaygroundConfig,
    strict: bool,
) -> ValidationReport {
    let opts = ValidateOptions {
        strict,
        tolerance: format.roundtrip_tolerance(config),
    };
    validation::validate_set(set, &config.classes, &opts)
}

fn validation_failed(report: ValidationReport) -> LabelpadError {
    LabelpadError::ValidationFailed {
        error_count: report.error_count(),
        warning_count: report.warning_count(),
        report,
    }
}

/// Parses `LEFT,TOP,WIDTH,HEIGHT` into a pixel rectangle.
fn parse_pixel_rect(raw: &str) -> Result<BBoxXYWH<Pixel>, LabelpadError> {
    let values = raw
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| LabelpadError::InvalidArgument(format!("box '{raw}': {e}")))?;

    match values.as_slice() {
        &[left, top, width, height] => Ok(BBoxXYWH::from_xywh(left, top, width, height)),
        _ => Err(LabelpadError::InvalidArgument(format!(
            "box '{raw}' must have 4 comma-separated values, got {}",
            values.len()
        ))),
    }
}

/// Prints export text, terminated by exactly one newline.
fn emit(text: &str) {
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}
