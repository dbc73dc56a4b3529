// Entry point: parses the command line, loads the menu, runs the TUI and then the picked command

use actmenu::loader::{self, Command, LoadedMenu};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{self, Stdio};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "actmenu")]
#[command(version, about = "Hierarchical action menu for the terminal", long_about = None)]
struct Args {
    /// Menu description (JSON). A built-in demo menu is shown when omitted.
    menu: Option<PathBuf>,

    /// Print the picked command instead of running it
    #[arg(long)]
    print: bool,

    /// Write logs to this file; RUST_LOG sets the filter (default: info)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

// the TUI owns the terminal, so logs only ever go to a file
fn init_logging(path: Option<&Path>) -> Result<(), String> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .map_err(|e| format!("failed to open log file {}: {e}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| format!("failed to install logger: {e}"))
}

fn load(path: Option<&Path>) -> Result<LoadedMenu, String> {
    let file = match path {
        Some(path) => loader::load_file(path),
        None => loader::demo(),
    }
    .map_err(|e| e.to_string())?;
    loader::build(&file, loader::on_path).map_err(|e| e.to_string())
}

fn execute(command: &Command) -> i32 {
    let status = process::Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status();
    match status {
        Ok(status) => status.code().unwrap_or(0),
        Err(e) => {
            eprintln!("failed to execute {command}: {e}");
            1
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_file.as_deref()) {
        eprintln!("{e}");
        process::exit(2);
    }

    let menu = match load(args.menu.as_deref()) {
        Ok(menu) => menu,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };

    match actmenu::ui::run(menu).await {
        Ok(Some(command)) if args.print => println!("{command}"),
        Ok(Some(command)) => process::exit(execute(&command)),
        Ok(None) => {}
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    }
}
