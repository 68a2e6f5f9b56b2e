use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabprep::config::Settings;
use tabprep::io::load_df;
use tabprep::pipeline::{ExportFormat, Pipeline};
use tabprep::plan::CleaningPlan;
use tabprep::quick::{QuickOptions, preprocess_with_config};

#[derive(Parser)]
#[command(name = "tabprep", about = "Tabular data cleaning pipeline")]
pub struct Cli {
    /// Path to a JSON settings file. Defaults to the user config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Suppress pipeline warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print structure, null and duplicate statistics of a file
    Info {
        /// Input file (CSV or JSON)
        file: PathBuf,
    },
    /// Drop nulls and duplicates, optionally standard-scale, and save
    Clean {
        /// Input file (CSV or JSON)
        file: PathBuf,

        /// Output file; format from the extension (csv, xlsx, json)
        #[arg(short, long)]
        output: PathBuf,

        /// Keep rows containing nulls
        #[arg(long)]
        keep_nulls: bool,

        /// Keep duplicated rows
        #[arg(long)]
        keep_duplicates: bool,

        /// Columns to standard-scale
        #[arg(long, num_args = 1..)]
        normalize: Vec<String>,
    },
    /// Apply a JSON cleaning plan and print the transformation summary
    Run {
        /// Input file (CSV or JSON)
        file: PathBuf,

        /// Path to the cleaning plan
        #[arg(short, long)]
        plan: PathBuf,

        /// Output file; format from the extension (csv, xlsx, json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::load_default()?,
    };
    if cli.quiet {
        settings.pipeline.suppress_warnings = true;
    }
    Ok(settings)
}

pub fn run_command(command: Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Info { file } => handle_info(&file, settings),
        Commands::Clean {
            file,
            output,
            keep_nulls,
            keep_duplicates,
            normalize,
        } => {
            let options = QuickOptions {
                drop_nulls: !keep_nulls,
                drop_duplicates: !keep_duplicates,
                normalize: !normalize.is_empty(),
                normalize_columns: normalize,
            };
            handle_clean(&file, &output, &options, settings)
        }
        Commands::Run { file, plan, output } => {
            handle_run(&file, &plan, output.as_deref(), settings)
        }
    }
}

fn handle_info(file: &Path, settings: &Settings) -> Result<()> {
    let df = load_df(file).context("Failed to load input")?;
    let pipeline = Pipeline::with_config(&df, settings.pipeline.clone());

    let report = serde_json::json!({
        "info": pipeline.info()?,
        "nulls": pipeline.detect_nulls(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn handle_clean(
    file: &Path,
    output: &Path,
    options: &QuickOptions,
    settings: &Settings,
) -> Result<()> {
    let format = ExportFormat::from_path(output)?;
    let df = load_df(file).context("Failed to load input")?;
    let cleaned = preprocess_with_config(&df, options, settings.pipeline.clone())?;

    let mut pipeline = Pipeline::with_config(&cleaned, settings.pipeline.clone());
    pipeline.save(output, format)?;

    println!(
        "Cleaned {} -> {} ({} rows -> {} rows)",
        file.display(),
        output.display(),
        df.height(),
        cleaned.height()
    );
    Ok(())
}

fn handle_run(
    file: &Path,
    plan_path: &Path,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<()> {
    let plan = CleaningPlan::from_file(plan_path)?;
    let output_format = output.map(ExportFormat::from_path).transpose()?;
    let df = load_df(file).context("Failed to load input")?;

    let mut pipeline = Pipeline::with_config(&df, settings.pipeline.clone());
    plan.apply(&mut pipeline)
        .with_context(|| format!("Plan '{}' failed", plan.name))?;

    if let (Some(path), Some(format)) = (output, output_format) {
        pipeline.save(path, format)?;
    }

    println!("{}", serde_json::to_string_pretty(&pipeline.summary())?);
    Ok(())
}
