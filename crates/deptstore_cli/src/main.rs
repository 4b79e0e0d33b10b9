//! Command-line front end for the department store.
//!
//! # Responsibility
//! - Open a SQLite database (file or memory) and map each subcommand onto
//!   one store operation.
//! - Keep output line-oriented for quick local checks.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use deptstore_core::db::{open_db, open_db_in_memory};
use deptstore_core::{
    core_version, default_log_level, init_logging, DepartmentRef, DepartmentRepository,
    DepartmentStore,
};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "deptstore", version, about = "Department record store")]
struct Cli {
    /// SQLite database file; an in-memory database is used when omitted.
    #[arg(long, env = "DEPTSTORE_DB_PATH", global = true)]
    db: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error); only applies with `--log-dir`.
    #[arg(long, env = "DEPTSTORE_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Absolute directory for rotating log files; logging is off when omitted.
    #[arg(long, env = "DEPTSTORE_LOG_DIR", global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the departments table.
    Init,
    /// Drop the departments table.
    Drop,
    /// Insert a new department.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: String,
    },
    /// List every department.
    List,
    /// Show one department by id or name.
    Show(Lookup),
    /// Change the name and/or location of a department.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },
    /// Delete a department by id.
    Remove {
        #[arg(long)]
        id: i64,
    },
    /// Run a create/list/find/delete walkthrough on a fresh in-memory database.
    Demo,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Lookup {
    #[arg(long)]
    id: Option<i64>,
    #[arg(long)]
    name: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    } else if let Some(level) = ignored_log_level(&cli) {
        eprintln!("warning: log level `{level}` ignored; set --log-dir to enable logging");
    }
    info!(
        "event=cli_start module=cli status=ok version={} command={:?}",
        core_version(),
        cli.command
    );

    let conn = match (&cli.command, cli.db.as_ref()) {
        (Command::Demo, _) | (_, None) => open_db_in_memory()?,
        (_, Some(path)) => open_db(path)?,
    };
    let mut store = DepartmentStore::sqlite(&conn);

    run(&mut store, cli.command)
}

/// Returns the requested log level when no log directory enables logging.
fn ignored_log_level(cli: &Cli) -> Option<&str> {
    match cli.log_dir {
        Some(_) => None,
        None => cli.log_level.as_deref(),
    }
}

fn run<R: DepartmentRepository>(store: &mut DepartmentStore<R>, command: Command) -> Result<()> {
    match command {
        Command::Init => {
            store.create_table()?;
            println!("table ready");
        }
        Command::Drop => {
            store.drop_table()?;
            println!("table dropped");
        }
        Command::Add { name, location } => {
            let department = store.create(name, location)?;
            println!("{}", department.borrow());
        }
        Command::List => {
            for department in store.get_all()? {
                println!("{}", department.borrow());
            }
        }
        Command::Show(lookup) => {
            let found = match lookup.id {
                Some(id) => store.find_by_id(id)?,
                None => store.find_by_name(lookup.name.as_deref())?,
            };
            match found {
                Some(department) => println!("{}", department.borrow()),
                None => println!("not found"),
            }
        }
        Command::Update { id, name, location } => {
            let department = require(store, id)?;
            {
                let mut current = department.borrow_mut();
                if name.is_some() {
                    current.name = name;
                }
                if location.is_some() {
                    current.location = location;
                }
            }
            store.update(&department)?;
            println!("{}", department.borrow());
        }
        Command::Remove { id } => {
            let department = require(store, id)?;
            store.delete(&department)?;
            println!("deleted {id}");
        }
        Command::Demo => demo(store)?,
    }
    Ok(())
}

fn require<R: DepartmentRepository>(
    store: &mut DepartmentStore<R>,
    id: i64,
) -> Result<DepartmentRef> {
    store
        .find_by_id(id)?
        .ok_or_else(|| anyhow!("department {id} not found"))
}

fn demo<R: DepartmentRepository>(store: &mut DepartmentStore<R>) -> Result<()> {
    store.create_table()?;

    let engineering = store.create("Engineering", "Building A")?;
    let sales = store.create("Sales", "Building B")?;
    println!("created {}", engineering.borrow());
    println!("created {}", sales.borrow());

    for department in store.get_all()? {
        println!("all: {}", department.borrow());
    }

    if let Some(found) = store.find_by_name("Sales")? {
        println!("find_by_name(Sales): {}", found.borrow());
    }

    let doomed = require(store, 2)?;
    store.delete(&doomed)?;
    println!("deleted id=2, instance now {}", doomed.borrow());

    for department in store.get_all()? {
        println!("all: {}", department.borrow());
    }
    match store.find_by_id(2)? {
        Some(department) => println!("find_by_id(2): {}", department.borrow()),
        None => println!("find_by_id(2): not found"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ignored_log_level, Cli, Command};
    use clap::Parser;

    #[test]
    fn show_requires_exactly_one_lookup_key() {
        assert!(Cli::try_parse_from(["deptstore", "show"]).is_err());
        let both = ["deptstore", "show", "--id", "1", "--name", "Sales"];
        assert!(Cli::try_parse_from(both).is_err());

        let cli = Cli::try_parse_from(["deptstore", "show", "--name", "Sales"]).unwrap();
        match cli.command {
            Command::Show(lookup) => {
                assert_eq!(lookup.id, None);
                assert_eq!(lookup.name.as_deref(), Some("Sales"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn log_level_without_log_dir_is_reported_as_ignored() {
        let cli = Cli::try_parse_from(["deptstore", "--log-level", "debug", "list"]).unwrap();
        assert_eq!(ignored_log_level(&cli), Some("debug"));

        let cli = Cli::try_parse_from([
            "deptstore",
            "--log-level",
            "debug",
            "--log-dir",
            "/tmp/deptstore-logs",
            "list",
        ])
        .unwrap();
        assert_eq!(ignored_log_level(&cli), None);
    }
}
