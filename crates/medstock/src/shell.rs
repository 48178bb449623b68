//! Interactive shell for the inventory store.
//!
//! Each mutating command prompts for its fields one at a time, mirroring a
//! form: Ctrl-C cancels the current form, Ctrl-D at the main prompt exits.
//! History is persisted under the platform config directory.

use anyhow::Result;
use medstock_store::Store;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};
use std::fs;
use std::path::PathBuf;

use crate::input;
use crate::print_stock;

/// Get the history file path.
fn history_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("medstock").join("history"))
}

/// Run the interactive shell until quit or EOF.
pub fn run(store: &mut Store) -> Result<()> {
    let mut rl: Editor<(), DefaultHistory> = DefaultEditor::new()?;

    if let Some(history_path) = history_path() {
        if let Some(parent) = history_path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = rl.load_history(&history_path);
    }

    println!("Medicine Stock Inventory");
    println!("Inventory file: \"{}\"", store.inventory_path().display());
    println!("Type \"help\" for commands.");
    println!();

    loop {
        let readline = rl.readline("medstock> ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match line {
                    "quit" | "exit" => break,
                    "help" => print_help(),
                    "stock" => print_stock(store),
                    "add" => add_form(&mut rl, store)?,
                    "edit" => edit_form(&mut rl, store)?,
                    "take" | "get" => take_form(&mut rl, store)?,
                    "delete" => delete_form(&mut rl, store)?,
                    _ => eprintln!("error: unknown command \"{line}\" (try \"help\")"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("(interrupted)");
            }
            Err(ReadlineError::Eof) => {
                println!("exit");
                break;
            }
            Err(err) => {
                eprintln!("error: {err}");
                break;
            }
        }
    }

    if let Some(history_path) = history_path() {
        let _ = rl.save_history(&history_path);
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  add      Stock a new medicine");
    println!("  stock    Show the current stock");
    println!("  edit     Change a medicine's quantity and/or expiry");
    println!("  take     Withdraw units and record who took them");
    println!("  delete   Remove a medicine entirely");
    println!("  help     Show this help");
    println!("  quit     Exit");
    println!();
}

/// Read one form field. `None` means the form was cancelled.
fn prompt(rl: &mut Editor<(), DefaultHistory>, label: &str) -> Result<Option<String>> {
    match rl.readline(label) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

macro_rules! field {
    ($rl:expr, $label:expr) => {
        match prompt($rl, $label)? {
            Some(value) => value,
            None => {
                println!("(cancelled)");
                return Ok(());
            }
        }
    };
}

fn add_form(rl: &mut Editor<(), DefaultHistory>, store: &mut Store) -> Result<()> {
    let name = field!(rl, "Medicine name: ");
    let qty_raw = field!(rl, "Quantity: ");
    let expiry_raw = field!(rl, "Expiry date (MM/DD/YYYY): ");

    let name = name.trim();
    let Ok(qty) = qty_raw.trim().parse::<u32>() else {
        eprintln!("error: invalid input: quantity must be a number");
        return Ok(());
    };
    let expiry = input::reformat_expiry(expiry_raw.trim());

    match store.add(name, qty, &expiry) {
        Ok(()) => println!("Added {name}: {qty} (Exp: {expiry})"),
        Err(e) => eprintln!("error: {e}"),
    }
    Ok(())
}

fn edit_form(rl: &mut Editor<(), DefaultHistory>, store: &mut Store) -> Result<()> {
    let name = field!(rl, "Medicine name: ");
    let qty_raw = field!(rl, "New quantity (blank to keep): ");
    let expiry_raw = field!(rl, "New expiry date (blank to keep): ");

    let name = name.trim();
    // A non-numeric quantity counts as "not supplied", same as blank
    let qty = qty_raw.trim().parse::<u32>().ok();
    let expiry_raw = expiry_raw.trim();
    let expiry = if expiry_raw.is_empty() {
        None
    } else {
        Some(input::reformat_expiry(expiry_raw))
    };

    match store.edit(name, qty, expiry.as_deref()) {
        Ok(()) => println!("Updated {name}"),
        Err(e) => eprintln!("error: {e}"),
    }
    Ok(())
}

fn take_form(rl: &mut Editor<(), DefaultHistory>, store: &mut Store) -> Result<()> {
    let name = field!(rl, "Medicine name: ");
    let qty_raw = field!(rl, "Quantity to take: ");
    let person = field!(rl, "Person name: ");
    let reason = field!(rl, "Reason: ");

    let name = name.trim();
    let Ok(qty) = qty_raw.trim().parse::<u32>() else {
        eprintln!("error: invalid request");
        return Ok(());
    };

    match store.withdraw(name, qty, person.trim(), reason.trim()) {
        Ok(remaining) => println!("Took {qty} of {name} ({remaining} remaining)"),
        Err(e) => eprintln!("error: {e}"),
    }
    Ok(())
}

fn delete_form(rl: &mut Editor<(), DefaultHistory>, store: &mut Store) -> Result<()> {
    let name = field!(rl, "Medicine name: ");
    let name = name.trim();

    let answer = field!(rl, &format!("Delete \"{name}\"? [y/N]: "));
    if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
        println!("Cancelled");
        return Ok(());
    }

    match store.delete(name) {
        Ok(true) => println!("Deleted {name}"),
        Ok(false) => println!("\"{name}\" is not stocked"),
        Err(e) => eprintln!("error: {e}"),
    }
    Ok(())
}
