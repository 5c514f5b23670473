// dartnml/src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use dartnml::cli::{
    collect_sources, convert_from_yaml, convert_to_yaml, extract_source, open_output,
};
use dartnml::constants::{DEFAULT_MAKEFILE, DEFAULT_NML, DEFAULT_YAML};
use dartnml::Config;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dartnml")]
#[command(about = "Namelist defaults tooling for the CESM-DART/MOM6 workflow", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to dartnml.yml when present)
    #[arg(short, long, value_name = "FILE", global = true, env = "DARTNML_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the namelist groups of a Fortran file with their default values
    Extract {
        /// Fortran 90 source file
        file: PathBuf,
    },
    /// Extract the namelists of every .f90 file listed in a Makefile
    Collect {
        /// Makefile to scan for absolute .f90 paths
        #[arg(short, long, value_name = "FILE")]
        makefile: Option<PathBuf>,
        /// Write the namelists to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Convert a namelist file into the YAML parameter template
    ToYaml {
        /// Namelist file to convert
        #[arg(default_value = DEFAULT_NML)]
        input: PathBuf,
        /// YAML file to write
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_YAML)]
        output: PathBuf,
    },
    /// Write a namelist file from the YAML parameter template
    FromYaml {
        /// YAML template to read
        #[arg(default_value = DEFAULT_YAML)]
        input: PathBuf,
        /// Write the namelist to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn init_logging() {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(log::LevelFilter::Warn);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn entrypoint() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;
    let config = Config::load(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Commands::Extract { file } => {
            let mut out = open_output(None)?;
            extract_source(&file, &config, &mut out)
        }
        Commands::Collect { makefile, output } => {
            let makefile = makefile
                .or_else(|| config.makefile.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MAKEFILE));
            let mut out = open_output(output.as_deref())?;
            collect_sources(&makefile, &config, &mut out).map(|_| ())
        }
        Commands::ToYaml { input, output } => convert_to_yaml(&input, &output),
        Commands::FromYaml { input, output } => {
            let mut out = open_output(output.as_deref())?;
            convert_from_yaml(&input, &config, &mut out)
        }
    }
}

fn main() -> ExitCode {
    match entrypoint() {
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}
