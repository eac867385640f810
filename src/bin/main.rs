//! Triplifier CLI - Map database schemas to RDF
//!
//! Usage:
//!   triplifier simplify <inspection.json> [--vocabulary <vocab.json>] [--format DwCA]
//!   triplifier relations <project.json>
//!   triplifier formats
//!   triplifier projects list|export|import|delete
//!
//! Examples:
//!   triplifier simplify inspection.json --vocabulary dwc.json --dataset urn:dataset:survey
//!   triplifier simplify inspection.json --output project > survey.json
//!   triplifier projects import survey.json

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;
use triplifier::config::Settings;
use triplifier::inference::SimplifierFactory;
use triplifier::inspection::{Inspection, LoadMode};
use triplifier::project::{Project, ProjectSnapshot};
use triplifier::store::{ProjectManager, ProjectStore};
use triplifier::vocabulary::Vocabulary;

#[derive(Parser)]
#[command(name = "triplifier")]
#[command(about = "Triplifier - Map relational database schemas to RDF")]
#[command(version)]
struct Cli {
    /// Path to a triplifier.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bootstrap a mapping from an inspection result
    Simplify {
        /// Path to the inspection JSON
        file: PathBuf,

        /// Vocabulary JSON used to infer attributes and relations
        #[arg(long)]
        vocabulary: Option<PathBuf>,

        /// Simplifier format code (defaults to the configured format)
        #[arg(short, long)]
        format: Option<String>,

        /// Dataset name for the mapping output
        #[arg(short, long, default_value = "")]
        dataset: String,

        /// Treat the inspection as an uploaded data file
        #[arg(long)]
        data_file: bool,

        /// Output format
        #[arg(short, long, default_value = "mapping")]
        output: OutputFormat,
    },

    /// Show the possible relations of a project file
    Relations {
        /// Path to the project JSON
        file: PathBuf,
    },

    /// List the available simplifier formats
    Formats,

    /// Manage stored projects
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// List stored projects
    List,
    /// Print a stored project as JSON
    Export { name: String },
    /// Store a project from a JSON file
    Import { file: PathBuf },
    /// Delete a stored project
    Delete { name: String },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Mapping document for triple generation
    Mapping,
    /// Full project document
    Project,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match load_settings(cli.config.as_ref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Simplify {
            file,
            vocabulary,
            format,
            dataset,
            data_file,
            output,
        } => cmd_simplify(&settings, file, vocabulary, format, dataset, data_file, output),
        Commands::Relations { file } => cmd_relations(file),
        Commands::Formats => cmd_formats(&settings),
        Commands::Projects { command } => cmd_projects(&settings, command),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings, triplifier::config::SettingsError> {
    match path {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_simplify(
    settings: &Settings,
    file: PathBuf,
    vocabulary: Option<PathBuf>,
    format: Option<String>,
    dataset: String,
    data_file: bool,
    output: OutputFormat,
) -> ExitCode {
    let inspection = match Inspection::from_file(&file) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let vocabulary = match vocabulary.map(Vocabulary::from_file).transpose() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let format = format.unwrap_or_else(|| settings.simplifier.format.clone());
    let factory = SimplifierFactory::new(&settings.simplifier);
    let Some(simplifier) = factory.simplifier(&format) else {
        eprintln!("Unknown format '{}'. Available formats:", format);
        for code in factory.formats().keys() {
            eprintln!("  - {}", code);
        }
        return ExitCode::FAILURE;
    };

    let name = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut project = Project::new(name);
    let mode = if data_file {
        LoadMode::DataFile
    } else {
        LoadMode::Database
    };
    inspection.load_into(&mut project, mode);

    if !simplifier.simplify(&mut project, vocabulary.as_ref()) {
        eprintln!("No {} concepts found in '{}'", format, file.display());
    }

    let json = match output {
        OutputFormat::Mapping => serde_json::to_string_pretty(&project.mapping_output(dataset)),
        OutputFormat::Project => serde_json::to_string_pretty(&project.snapshot()),
    };

    match json {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_relations(file: PathBuf) -> ExitCode {
    let snapshot = match fs::read_to_string(&file)
        .map_err(|e| e.to_string())
        .and_then(|s| ProjectSnapshot::from_json_str(&s).map_err(|e| e.to_string()))
    {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading project '{}': {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let project = Project::from_snapshot(snapshot);
    print!("{}", project.relation_catalog());

    println!();
    println!("Relations in use:");
    for concept in project.entities() {
        let key = concept.key();
        let used = project.relation_count_by_entity(&key);
        let possible = project
            .relation_catalog()
            .objects_for(&key)
            .map_or(0, |objects| objects.len());
        println!("  {} ({}): {} of {}", key, concept.class_name(), used, possible);
    }

    ExitCode::SUCCESS
}

fn cmd_formats(settings: &Settings) -> ExitCode {
    let factory = SimplifierFactory::new(&settings.simplifier);
    for (code, description) in factory.formats() {
        println!("{:<8} {}", code, description);
    }
    ExitCode::SUCCESS
}

fn cmd_projects(settings: &Settings, command: ProjectCommands) -> ExitCode {
    let manager = ProjectStore::open(&settings.store)
        .map(Rc::new)
        .and_then(ProjectManager::open);
    let mut manager = match manager {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error opening project store: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match command {
        ProjectCommands::List => {
            for name in manager.project_names() {
                println!("{}", name);
            }
            Ok(())
        }
        ProjectCommands::Export { name } => manager
            .open_project(&name)
            .and_then(|project| manager.project_json(&project))
            .map(|json| println!("{}", json)),
        ProjectCommands::Import { file } => match fs::read_to_string(&file) {
            Ok(json) => manager
                .load_project_json(&json)
                .map(|project| println!("Imported project '{}'", project.name())),
            Err(e) => Err(e.into()),
        },
        ProjectCommands::Delete { name } => manager.delete_project(&name).map(|deleted| {
            if deleted {
                println!("Deleted project '{}'", name);
            } else {
                println!("No project named '{}'", name);
            }
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
