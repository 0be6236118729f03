use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use desk_allocator::{
    Config, Desk, RecommendationService, SystemClock, WorkspaceSnapshot,
    constants::DEFAULT_CONFIG_PATH, export_to_csv,
};
use log::{debug, error, info};
use std::{io::Write, path::PathBuf};

#[derive(Parser)]
#[command(author, version, about = "Find desks matching a free-text workspace request", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interpret a request and list matching desks in rank order
    Query {
        /// Free-text request, e.g. "a standing desk on the 3rd floor tomorrow afternoon"
        text: String,
        /// Employee whose preference profile reorders the result
        #[arg(short, long)]
        employee: Option<String>,
        /// Print the desks as JSON
        #[arg(long)]
        json: bool,
        /// Also write the result to a CSV file in the output directory
        #[arg(long)]
        export: bool,
    },
    /// Show the constraints extracted from a request
    Interpret { text: String },
    /// Dump loaded snapshot records as JSON
    Inspect {
        #[arg(value_enum)]
        records: Records,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Records {
    Desks,
    Spaces,
    Policies,
    Sensors,
    Metrics,
}

fn main() {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!("Error: {e}");

        use std::io::ErrorKind;
        for cause in e.chain().skip(1) {
            debug!("Caused by: {cause}");
            if let Some(ioe) = cause.downcast_ref::<std::io::Error>() {
                match ioe.kind() {
                    ErrorKind::NotFound => {
                        error!("Hint: Check data.dir in the config or set DESK_ALLOCATOR_DATA_DIR.");
                        break;
                    }
                    ErrorKind::PermissionDenied => {
                        error!("Hint: Check that the output directory is writable.");
                        break;
                    }
                    _ => {}
                }
            }
        }
        let _ = std::io::stderr().flush();
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::load_or_default(&args.config)?;
    config.apply_env_overrides()?;
    config.validate()?;

    let snapshot = WorkspaceSnapshot::load_from_dir(&config.data)
        .with_context(|| format!("Failed to load snapshot from {}", config.data.dir.display()))?;
    let service = RecommendationService::new(&snapshot, config.engine_settings(), SystemClock);

    match args.command {
        Command::Query {
            text,
            employee,
            json,
            export,
        } => {
            let rec = service.recommend(&text, employee.as_deref())?;
            debug!("Constraints: {:?}", rec.constraints);
            let desks = &rec.allocation.desks;

            if json {
                println!("{}", serde_json::to_string_pretty(desks)?);
            } else {
                print_desks(desks);
            }

            if export {
                let path = export_to_csv(desks, Some(config.output.dir.as_path()))?;
                info!("Allocation saved to: {}", path.display());
            }
        }
        Command::Interpret { text } => {
            let constraints = service.interpret(&text);
            println!("{}", serde_json::to_string_pretty(&constraints)?);
        }
        Command::Inspect { records } => {
            let out = match records {
                Records::Desks => serde_json::to_string_pretty(&snapshot.desks)?,
                Records::Spaces => serde_json::to_string_pretty(&snapshot.spaces)?,
                Records::Policies => serde_json::to_string_pretty(&snapshot.policies)?,
                Records::Sensors => serde_json::to_string_pretty(&snapshot.sensors)?,
                Records::Metrics => serde_json::to_string_pretty(&snapshot.metrics)?,
            };
            println!("{out}");
        }
    }

    Ok(())
}

fn print_desks(desks: &[Desk]) {
    if desks.is_empty() {
        info!("No desks match the request.");
        return;
    }
    for (i, desk) in desks.iter().enumerate() {
        println!(
            "{:>3}. {:<14} {:<9} floor {} {:<18} {} [{}]",
            i + 1,
            desk.id,
            desk.kind,
            desk.floor,
            desk.zone,
            desk.location_description,
            desk.features.join(", ")
        );
    }
}
