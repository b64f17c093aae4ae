use std::path::PathBuf;

use certificate_tools::generate;
use certificate_tools::io::pptx::{CertificateStyle, PlaceholderLocator};
use certificate_tools::{Result, RunConfig, ToolError};
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_tracing() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
    if let Err(err) = run(cli) {
        error!(error = %err, "certificate generation aborted");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::Shapes(args)) => execute_shapes(args),
        None => execute_generate(cli.generate),
    }
}

fn execute_generate(args: GenerateArgs) -> Result<()> {
    let config = args.to_config();
    let summary = generate::generate_certificates(&config)?;
    if let Some(path) = &args.summary_json {
        generate::write_summary(path, &summary)?;
    }
    Ok(())
}

fn execute_shapes(args: ShapesArgs) -> Result<()> {
    let shapes = generate::inspect_template(&args.template)?;
    for shape in shapes {
        println!(
            "{}\t{}\t{}\t{}",
            shape.position,
            shape.kind,
            shape.name.unwrap_or_default(),
            shape.text.unwrap_or_else(|| "-".into()).replace('\n', " / ")
        );
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Generate attendance certificates from a workbook and per-level templates.",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand)]
enum Command {
    /// List the shapes on a template's slide.
    Shapes(ShapesArgs),
}

#[derive(clap::Args)]
struct ShapesArgs {
    /// Template presentation to inspect.
    template: PathBuf,
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Directory the default layout is resolved against.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Directory holding the single attendance workbook.
    #[arg(long)]
    attendance_dir: Option<PathBuf>,

    /// Directory holding one template per worksheet.
    #[arg(long)]
    templates_dir: Option<PathBuf>,

    /// Parent directory of the per-worksheet output directories.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Worksheet excluded from certificate generation.
    #[arg(long)]
    skip_sheet: Option<String>,

    /// Font family of the name.
    #[arg(long)]
    font_name: Option<String>,

    /// Font size of the name, in points.
    #[arg(long)]
    font_size: Option<f64>,

    /// Position of the name shape among the slide's shapes.
    #[arg(long, conflicts_with = "placeholder_name")]
    placeholder_index: Option<usize>,

    /// Name of the name shape, as shown in the selection pane.
    #[arg(long)]
    placeholder_name: Option<String>,

    /// Write a JSON summary of the run to this path.
    #[arg(long)]
    summary_json: Option<PathBuf>,
}

impl GenerateArgs {
    fn to_config(&self) -> RunConfig {
        let mut config = RunConfig::rooted_at(&self.root);
        if let Some(dir) = &self.attendance_dir {
            config.attendance_dir = dir.clone();
        }
        if let Some(dir) = &self.templates_dir {
            config.templates_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(sheet) = &self.skip_sheet {
            config.skip_sheet = sheet.clone();
        }

        let defaults = CertificateStyle::default();
        config.style = CertificateStyle {
            font_name: self.font_name.clone().unwrap_or(defaults.font_name),
            font_size: self.font_size.unwrap_or(defaults.font_size),
            bold: defaults.bold,
        };

        if let Some(name) = &self.placeholder_name {
            config.placeholder = PlaceholderLocator::ByName(name.clone());
        } else if let Some(index) = self.placeholder_index {
            config.placeholder = PlaceholderLocator::ByIndex(index);
        }
        config
    }
}
