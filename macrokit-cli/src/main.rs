//! macrokit CLI
//!
//! Render or run host macros described in workflow files, and run the
//! built-in common tasks.
//!
//! Usage:
//!   macrokit render workflow.yaml              # Print the command lines
//!   macrokit render workflow.yaml --envelope   # Print the full script file
//!   macrokit run workflow.yaml -c macrokit.yaml
//!   macrokit task numbering --all -c macrokit.yaml
//!   macrokit slots --count 33

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use macrokit::tasks::{self, DrawingKind, TaskRunner};
use macrokit::{
    wrap_in_envelope, DispatchStatus, MacroBuilder, MacroConfig, MacroWorkflow, SlotAllocator,
};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "macrokit")]
#[command(about = "Generate, run and clean up host application macros")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Workflow file (JSON or YAML)
    workflow: PathBuf,

    /// Print the complete script file instead of just the command lines
    #[clap(long)]
    envelope: bool,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Workflow file (JSON or YAML)
    workflow: PathBuf,

    /// Configuration file (JSON or YAML)
    #[clap(long, short = 'c', env = "MACROKIT_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum TaskCommands {
    /// Number modified parts
    Numbering {
        /// Number all modified parts instead of only the selected ones
        #[clap(long)]
        all: bool,
    },
    /// Open the numbering settings dialog
    NumberingSettings,
    /// Open the drawing list
    DrawingList,
    /// Open a drawing properties dialog and load named settings
    DrawingProperties {
        /// single-part, assembly, cast-unit or general-arrangement
        kind: DrawingKind,
        name: String,
    },
    /// Open an auto drawing script
    AutoDrawingScript { name: String },
    /// Create a general arrangement drawing from a template
    GaFromTemplate { name: String },
}

#[derive(Parser, Debug)]
struct TaskArgs {
    #[command(subcommand)]
    task: TaskCommands,

    /// Configuration file (JSON or YAML)
    #[clap(long, short = 'c', global = true, env = "MACROKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Print the task's command lines without running it
    #[clap(long, global = true)]
    dry_run: bool,
}

#[derive(Parser, Debug)]
struct SlotsArgs {
    /// How many names to allocate
    #[clap(long, default_value_t = 1)]
    count: usize,

    /// Start from this slot instead of a random one
    #[clap(long)]
    start: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the script a workflow produces
    Render(RenderArgs),
    /// Run a workflow against the configured host
    Run(RunArgs),
    /// Run one of the built-in common tasks
    Task(TaskArgs),
    /// Show the macro file names the rotation would hand out
    Slots(SlotsArgs),
}

fn init_logging() {
    let log_level = env::var("LOG_LEVEL")
        .map(|level| match level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        })
        .unwrap_or(Level::WARN);

    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn load_config(path: Option<&Path>) -> Result<MacroConfig> {
    let config = match path {
        Some(path) => MacroConfig::load(path)
            .await
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => {
            debug!("No configuration file given, using defaults");
            MacroConfig::default()
        }
    };
    Ok(config.with_env_overrides())
}

async fn load_workflow(path: &Path) -> Result<MacroBuilder> {
    let workflow = MacroWorkflow::load(path)
        .await
        .with_context(|| format!("Failed to read workflow {}", path.display()))?;
    if let Some(name) = &workflow.name {
        info!("Loaded workflow '{}' ({} steps)", name, workflow.steps.len());
    }
    workflow
        .to_builder()
        .with_context(|| format!("Invalid step in workflow {}", path.display()))
}

async fn render(args: RenderArgs) -> Result<()> {
    let builder = load_workflow(&args.workflow).await?;
    if args.envelope {
        println!("{}", wrap_in_envelope(builder.as_str()));
    } else {
        print!("{builder}");
    }
    Ok(())
}

async fn run(args: RunArgs) -> Result<()> {
    let builder = load_workflow(&args.workflow).await?;
    let config = load_config(args.config.as_deref()).await?;
    let runner = config.runner().context("Failed to set up the host")?;

    let outcome = builder
        .run(&runner)
        .await
        .with_context(|| format!("Failed to run {}", args.workflow.display()))?;

    match outcome.status {
        DispatchStatus::Executed => println!("Executed {}", outcome.file_name),
        DispatchStatus::SkippedNotConnected => {
            warn!("Host is not connected");
            println!("Skipped {} (host not connected)", outcome.file_name);
        }
    }
    Ok(())
}

async fn task(args: TaskArgs) -> Result<()> {
    let (label, builder) = match &args.task {
        TaskCommands::Numbering { all } => ("numbering", tasks::perform_numbering(*all)),
        TaskCommands::NumberingSettings => {
            ("numbering-settings", tasks::open_numbering_settings())
        }
        TaskCommands::DrawingList => ("drawing-list", tasks::open_drawing_list()),
        TaskCommands::DrawingProperties { kind, name } => {
            debug!("Loading {} drawing properties '{}'", kind, name);
            ("drawing-properties", tasks::open_drawing_properties(*kind, name))
        }
        TaskCommands::AutoDrawingScript { name } => {
            ("auto-drawing-script", tasks::open_auto_drawing_script(name))
        }
        TaskCommands::GaFromTemplate { name } => (
            "ga-from-template",
            tasks::create_ga_drawing_from_template(name),
        ),
    };

    if args.dry_run {
        print!("{builder}");
        return Ok(());
    }

    let config = load_config(args.config.as_deref()).await?;
    let runner = TaskRunner::new(config.runner().context("Failed to set up the host")?);

    // Task failures are logged by the task runner and do not fail the command.
    match runner.run(label, builder).await {
        Some(outcome) => println!("{label}: {:?} ({})", outcome.status, outcome.file_name),
        None => println!("{label}: failed, see log"),
    }
    Ok(())
}

fn slots(args: SlotsArgs) {
    let allocator = match args.start {
        Some(start) => SlotAllocator::starting_at(start),
        None => SlotAllocator::new(),
    };
    for _ in 0..args.count {
        println!("{}", allocator.next_name());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => render(args).await,
        Commands::Run(args) => run(args).await,
        Commands::Task(args) => task(args).await,
        Commands::Slots(args) => {
            slots(args);
            Ok(())
        }
    }
}
