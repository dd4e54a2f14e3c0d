use anyhow::Result;
use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

mod cli;

#[derive(Debug, Parser)]
#[command(
    name = "qio",
    version,
    about = "A command line interface to the EECS Office Hours Queue"
)]
struct Cli {
    /// Debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interact with a queue's groups roster
    Groups(cli::groups::GroupsArgs),
    /// Interact with a queue's office hours schedule
    Schedule(cli::schedule::ScheduleArgs),
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Cli::parse();
    let level = if args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    match args.command {
        Command::Groups(groups) => cli::groups::handle(groups),
        Command::Schedule(schedule) => cli::schedule::handle(schedule),
    }
}
