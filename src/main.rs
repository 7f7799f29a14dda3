// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and exit code mapping

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use incident_postmortem::error::EXIT_UNEXPECTED;
use incident_postmortem::utils::{format_error, format_field, format_info, format_success};
use incident_postmortem::{Config, GenerateOptions, PostmortemError, PostmortemPipeline};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};

const DEFAULT_CONFIG_FILE: &str = "ipg.toml";

#[derive(Parser)]
#[command(name = "ipg")]
#[command(version)]
#[command(
    about = "Incident Postmortem Generator: Markdown postmortems from YAML/JSON incident data",
    long_about = None
)]
struct Cli {
    /// Configuration file (defaults to ./ipg.toml when present)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = ArgAction::Set, global = true)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a postmortem Markdown file plus JSON/CSV exports
    Generate {
        /// Incident file (.yml/.yaml/.json)
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Template file name inside the templates directory
        #[arg(short, long, value_name = "NAME")]
        template: Option<String>,

        /// Custom templates directory
        #[arg(long, value_name = "DIR")]
        templates_dir: Option<PathBuf>,

        /// Skip the JSON snapshot
        #[arg(long)]
        no_json: bool,

        /// Skip the action item CSV
        #[arg(long)]
        no_csv: bool,
    },

    /// Validate an incident file without writing anything
    Validate {
        /// Incident file (.yml/.yaml/.json)
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    incident_postmortem::utils::logging::init_logger(cli.color, cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&cli.command, &err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Generate {
            input,
            out,
            template,
            templates_dir,
            no_json,
            no_csv,
        } => {
            let mut options = GenerateOptions::from_config(&config);
            if let Some(out) = out {
                options.out_dir = out.clone();
            }
            if let Some(template) = template {
                options.template = template.clone();
            }
            if let Some(templates_dir) = templates_dir {
                options.templates_dir = templates_dir.clone();
            }
            options.write_json &= !no_json;
            options.write_csv &= !no_csv;

            cmd_generate(input, options)
        }
        Commands::Validate { input } => cmd_validate(input, &config),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = explicit.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));

    if path.exists() {
        debug!("Loading configuration from: {}", path.display());
        return Config::load(Some(path)).context("Failed to load configuration");
    }

    if explicit.is_some() {
        warn!(
            "Config file {} not found, using default configuration",
            path.display()
        );
    }

    Config::load(None).context("Failed to load configuration")
}

fn cmd_generate(input: &Path, options: GenerateOptions) -> Result<()> {
    let pipeline = PostmortemPipeline::new(options);
    let files = pipeline.generate(input)?;

    println!(
        "{}",
        format_success(&format!("Generated: {}", files.markdown.display()))
    );
    match &files.json {
        Some(path) => println!("{}", format_success(&format!("Exported: {}", path.display()))),
        None => println!("{}", format_info("JSON export skipped")),
    }
    match &files.csv {
        Some(path) => println!("{}", format_success(&format!("Exported: {}", path.display()))),
        None => println!("{}", format_info("CSV export skipped")),
    }

    Ok(())
}

fn cmd_validate(input: &Path, config: &Config) -> Result<()> {
    let pipeline = PostmortemPipeline::new(GenerateOptions::from_config(config));
    let incident = pipeline.validate(input)?;

    println!("{}", format_success(&format!("Valid: {}", input.display())));
    println!("{}", format_field("Incident ID", &incident.incident_id));
    println!("{}", format_field("Title", &incident.title));
    println!("{}", format_field("Severity", &incident.severity.to_string()));
    println!("{}", format_field("Status", &incident.status.to_string()));

    Ok(())
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<PostmortemError>()
        .map(PostmortemError::exit_code)
        .unwrap_or(EXIT_UNEXPECTED)
}

fn report_error(command: &Commands, err: &anyhow::Error) {
    match err.downcast_ref::<PostmortemError>() {
        Some(PostmortemError::Validation(errors)) => {
            eprintln!("{}\n{}", format_error("Schema validation failed:"), errors);
        }
        Some(e) if e.is_input_error() => {
            let heading = match command {
                Commands::Validate { .. } => "Validation failed:",
                Commands::Generate { .. } => "Input error:",
            };
            eprintln!("{}\n{}", format_error(heading), e);
        }
        _ => eprintln!("{}", format_error(&format!("Unexpected error: {:#}", err))),
    }
}
