use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use practicum::Config;
use practicum::models::Status;
use uuid::Uuid;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "practicum", version, about = "Course tests for practicals, in plain text")]
struct Cli {
    /// Config file path (default: ./practicum.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON data file, overrides `data_file` from the config
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Work on the seeded in-memory demo course
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a test file and report every block
    Check {
        /// Test text file
        file: PathBuf,

        /// Drop blocks with more than one correct mark
        #[arg(long)]
        strict_marks: bool,
    },

    /// Turn JSON question rows into test text
    Format {
        /// JSON array of question rows
        file: PathBuf,
    },

    /// Manage practicals and their tests
    Practical {
        #[command(subcommand)]
        command: PracticalCommand,
    },

    /// List students
    Students,

    /// Take a practical's test in the terminal
    Take {
        /// Practical id (default: first published practical)
        #[arg(long)]
        practical: Option<Uuid>,

        /// Student id (default: first student)
        #[arg(long)]
        student: Option<Uuid>,
    },

    /// Students ranked by total test score
    Rankings {
        #[arg(long)]
        json: bool,
    },

    /// Course-wide statistics
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// One student's progress overview
    Dashboard {
        student: Uuid,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum PracticalCommand {
    /// List practicals in course order
    List,

    /// Create a practical, or replace one with --id, from a test file
    Save {
        /// Test text file
        file: PathBuf,

        #[arg(long)]
        title: String,

        #[arg(long)]
        order: u32,

        #[arg(long)]
        id: Option<Uuid>,

        #[arg(long)]
        description: Option<String>,

        /// draft, published or archived (new practicals default to draft)
        #[arg(long)]
        status: Option<Status>,

        /// Author id (default: the first admin)
        #[arg(long)]
        created_by: Option<Uuid>,
    },

    /// Print a practical's test as editable text
    EditText { id: Uuid },

    /// Delete a practical with its questions
    Delete { id: Uuid },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("practicum=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::discover(cli.config.as_deref())?;
    if let Some(data) = &cli.data {
        config.data_file = data.clone();
    }
    if cli.demo {
        config.demo_mode = true;
    }
    Ok(config)
}

fn main() {
    let cli = Cli::parse();

    // The test runner owns the screen; log lines would tear it.
    if !matches!(cli.command, Commands::Take { .. }) {
        init_tracing();
    }

    let result = load_config(&cli).and_then(|config| run(cli.command, config));

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Commands, mut config: Config) -> anyhow::Result<()> {
    match command {
        Commands::Check { file, strict_marks } => {
            config.strict_marks |= strict_marks;
            commands::check::execute(&file, &config)
        }
        Commands::Format { file } => commands::format::execute(&file),
        Commands::Practical { command } => {
            let mut repo = commands::open_repository(&config)?;
            match command {
                PracticalCommand::List => commands::practical::list(repo.as_ref()),
                PracticalCommand::Save {
                    file,
                    title,
                    order,
                    id,
                    description,
                    status,
                    created_by,
                } => commands::practical::save(
                    repo.as_mut(),
                    &config,
                    commands::practical::SaveArgs {
                        file,
                        title,
                        order,
                        id,
                        description,
                        status,
                        created_by,
                    },
                ),
                PracticalCommand::EditText { id } => commands::practical::edit_text(repo.as_ref(), id),
                PracticalCommand::Delete { id } => commands::practical::delete(repo.as_mut(), id),
            }
        }
        Commands::Students => {
            let repo = commands::open_repository(&config)?;
            commands::report::students(repo.as_ref())
        }
        Commands::Take { practical, student } => {
            let mut repo = commands::open_repository(&config)?;
            commands::take::execute(repo.as_mut(), &config, practical, student)
        }
        Commands::Rankings { json } => {
            let repo = commands::open_repository(&config)?;
            commands::report::rankings(repo.as_ref(), json)
        }
        Commands::Stats { json } => {
            let repo = commands::open_repository(&config)?;
            commands::report::stats(repo.as_ref(), json)
        }
        Commands::Dashboard { student, json } => {
            let repo = commands::open_repository(&config)?;
            commands::report::dashboard(repo.as_ref(), student, json)
        }
    }
}
