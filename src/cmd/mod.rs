use clap::Parser;
use myshadow::definition::{self, Definition};
use myshadow::executor::{DryRunExecutor, Executor, ShellExecutor};
use myshadow::report::ConsoleReporter;
use myshadow::shadower::{text_to_command, ShadowCommand, ShadowOptions, Shadower, TableFilter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const COMMANDS_HELP: &str = "\
Commands:
   dump             Dump remote database to a local file
   reload           Recreate local database from file
   local-schema     Dump the local database schema
   remote-schema    Dump the remote database schema
   transform        Apply transformations to local database

If no commands are given, 'dump reload transform' will be assumed.";

#[derive(Parser)]
#[command(name = "myshadow")]
#[command(version)]
#[command(about = "Create or refresh a local shadow copy of a remote MySQL database", long_about = None)]
#[command(after_help = COMMANDS_HELP)]
pub struct Cli {
    /// Shadow definition file (".shadow" is appended if the name does not exist)
    pub definition: PathBuf,

    /// Commands to run, in order
    pub commands: Vec<String>,

    /// Remove auto_increment counter from schema dump (requires sed)
    #[arg(short = 'a', long)]
    pub remove_auto: bool,

    /// Only dump specific tables or table sections (repeatable or comma-separated)
    #[arg(short, long = "table", value_delimiter = ',')]
    pub tables: Vec<String>,

    /// Verbose output from mysql tools
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the command lines instead of running them
    #[arg(long)]
    pub dry_run: bool,
}

/// Diagnostics go to stderr, filtered by RUST_LOG (warnings only by default)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let reporter = ConsoleReporter;

    let path = definition::resolve_path(&cli.definition)?;
    let mut definition = Definition::load(&path)?;
    definition.validate(&reporter)?;

    let mut commands = cli
        .commands
        .iter()
        .map(|c| text_to_command(c))
        .collect::<Result<Vec<_>, _>>()?;
    if commands.is_empty() {
        commands.extend(ShadowCommand::DEFAULT_SEQUENCE);
    }

    let options = ShadowOptions {
        verbose: cli.verbose,
        remove_auto_increment: cli.remove_auto,
        tables: TableFilter::new(&cli.tables),
    };

    if cli.dry_run {
        execute(&definition, options, &commands, DryRunExecutor)
    } else {
        execute(&definition, options, &commands, ShellExecutor)
    }
}

fn execute<E: Executor>(
    definition: &Definition,
    options: ShadowOptions,
    commands: &[ShadowCommand],
    executor: E,
) -> anyhow::Result<()> {
    let mut shadower = Shadower::new(definition, options, executor, ConsoleReporter);
    shadower.run_all(commands)?;
    Ok(())
}
