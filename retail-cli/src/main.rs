//! Entry point for the retail workbook manager

mod action_log;
mod cli;
mod storage;
mod store;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use is_terminal::IsTerminal;

use crate::action_log::ActionLog;
use crate::cli::{Cli, Commands};
use crate::storage::{Workbook, XlsxStorage};
use crate::store::{TableId, WorkbookStore};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(err) = run() {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let storage = XlsxStorage::new(&cli.workbook)?;
    let workbook = Workbook::open(Box::new(storage))?;
    let mut store = WorkbookStore::open(workbook)?;

    // Release the workbook whether the session succeeded or not.
    let interactive = cli.command.is_none();
    let outcome = session(&mut store, cli);
    store.close()?;
    outcome?;
    if interactive {
        println!("Session closed.");
    }
    Ok(())
}

/// One session against an open store; borrows it so the caller can
/// still close after a failure.
fn session(store: &mut WorkbookStore, cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Export {
            table,
            format,
            output,
        }) => {
            let table = TableId::from_index(table)?;
            cli::export::run(store, table, format, output.as_deref())
        }
        None => {
            let log = ActionLog::open(&cli.log)
                .with_context(|| format!("cannot open action log {}", cli.log.display()))?;
            cli::menu::run(store, &log)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ExportFormat;
    use crate::storage::SheetData;
    use crate::storage::memory::MemoryStorage;

    #[test]
    fn test_store_outlives_failed_session() {
        let sheets = (1..=4)
            .map(|n| SheetData::new(format!("Sheet{n}")))
            .collect();
        let (storage, state) = MemoryStorage::with_sheets(sheets);
        let workbook = Workbook::open(Box::new(storage)).unwrap();
        let mut store = WorkbookStore::open(workbook).unwrap();

        let cli = Cli {
            workbook: "retail.xlsx".into(),
            log: "retail.log".into(),
            no_color: true,
            command: Some(Commands::Export {
                table: 9,
                format: ExportFormat::Json,
                output: None,
            }),
        };
        assert!(session(&mut store, cli).is_err());

        store.close().unwrap();
        assert!(state.lock().unwrap().closed);
    }
}
