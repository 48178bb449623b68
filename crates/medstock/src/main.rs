//! medstock - medicine stock inventory manager.
//!
//! Tracks named items with a quantity and an expiry date, persisted to a
//! local JSON file, with an append-only audit log of withdrawals.
//!
//! # Usage
//!
//! ```bash
//! medstock add Paracetamol --qty 50 --expiry 01/02/2030
//! medstock stock
//! medstock take Paracetamol --qty 10 --by "Nurse Jane" --reason Headache
//! medstock            # interactive shell
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use medstock_store::Store;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

mod input;
mod shell;

/// Track medicine stock: add, list, edit, withdraw, and delete items.
#[derive(Parser, Debug)]
#[command(name = "medstock")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the inventory file and withdrawal log
    /// (default: the platform data directory)
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stock a new medicine
    Add {
        /// Medicine name
        name: String,
        /// Units to stock
        #[arg(long)]
        qty: u32,
        /// Expiry date (MM/DD/YYYY; bare digits are reformatted)
        #[arg(long)]
        expiry: String,
    },
    /// Show the current stock
    Stock,
    /// Change an existing medicine's quantity and/or expiry
    Edit {
        /// Medicine name
        name: String,
        /// New quantity (omit to keep)
        #[arg(long)]
        qty: Option<u32>,
        /// New expiry date (omit to keep)
        #[arg(long)]
        expiry: Option<String>,
    },
    /// Withdraw units and record who took them
    Take {
        /// Medicine name
        name: String,
        /// Units to take
        #[arg(long)]
        qty: u32,
        /// Who is taking them
        #[arg(long = "by", value_name = "PERSON")]
        person: String,
        /// Why
        #[arg(long)]
        reason: String,
    },
    /// Remove a medicine entirely
    Delete {
        /// Medicine name
        name: String,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Interactive shell (the default when no command is given)
    Shell,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .init();
    }

    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Resolve the data directory: `--data-dir` if given, else the platform
/// data directory.
fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    dirs::data_dir()
        .map(|p| p.join("medstock"))
        .context("no platform data directory; pass --data-dir")
}

fn run(args: Args) -> Result<ExitCode> {
    let data_dir = resolve_data_dir(args.data_dir)?;
    let mut store = Store::open(
        data_dir.join("inventory.json"),
        data_dir.join("withdrawals.log"),
    )
    .with_context(|| format!("failed to open store in {}", data_dir.display()))?;

    match args.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            shell::run(&mut store)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Add { name, qty, expiry } => {
            let name = name.trim();
            let expiry = input::reformat_expiry(expiry.trim());
            match store.add(name, qty, &expiry) {
                Ok(()) => {
                    println!("Added {name}: {qty} (Exp: {expiry})");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => fail(&e),
            }
        }
        Command::Stock => {
            print_stock(&store);
            Ok(ExitCode::SUCCESS)
        }
        Command::Edit { name, qty, expiry } => {
            let name = name.trim();
            let expiry = expiry.map(|e| input::reformat_expiry(e.trim()));
            match store.edit(name, qty, expiry.as_deref()) {
                Ok(()) => {
                    println!("Updated {name}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => fail(&e),
            }
        }
        Command::Take {
            name,
            qty,
            person,
            reason,
        } => {
            let name = name.trim();
            match store.withdraw(name, qty, person.trim(), reason.trim()) {
                Ok(remaining) => {
                    println!("Took {qty} of {name} ({remaining} remaining)");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => fail(&e),
            }
        }
        Command::Delete { name, yes } => {
            let name = name.trim();
            if !yes && !confirm_delete(name)? {
                println!("Cancelled");
                return Ok(ExitCode::SUCCESS);
            }
            match store.delete(name) {
                Ok(true) => {
                    println!("Deleted {name}");
                    Ok(ExitCode::SUCCESS)
                }
                Ok(false) => {
                    println!("\"{name}\" is not stocked");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => fail(&e),
            }
        }
    }
}

/// Render an operation rejection and map it to the failure exit code.
fn fail(e: &medstock_store::StoreError) -> Result<ExitCode> {
    eprintln!("error: {e}");
    Ok(ExitCode::from(1))
}

/// Print the stock listing, one item per line.
fn print_stock(store: &Store) {
    let lines = store.stock();
    if lines.is_empty() {
        println!("No stock available");
        return;
    }
    for line in lines {
        println!("{}: {} (Exp: {})", line.name, line.quantity, line.expiry);
    }
}

/// Ask for confirmation before a deletion. Anything but `y`/`yes` declines.
fn confirm_delete(name: &str) -> Result<bool> {
    print!("Delete \"{name}\"? [y/N]: ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
