use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_FILE;
use crate::table::{FundColumn, SortState};

#[derive(Debug, Parser)]
#[command(name = "fii-board")]
#[command(about = "Sortable table of Brazilian real-estate investment funds (FIIs) from brapi")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// JSON configuration file; built-in defaults apply when it does not exist
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Always fetch from the network and do not read or write snapshots
    #[arg(long)]
    pub no_cache: bool,

    /// Initial sort column (stock, name, sector, type, close, change, volume, market_cap)
    #[arg(short, long, value_parser = parse_column)]
    pub sort: Option<FundColumn>,

    /// Sort ascending instead of the default descending order
    #[arg(long, requires = "sort")]
    pub asc: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Interactive table (default)
    Tui,

    /// Print the table once as plain text
    Print,

    /// Write the sorted table to a CSV file
    ExportCsv {
        /// Destination path
        file: PathBuf,
    },

    /// Write the sorted table to a standalone HTML page
    ExportHtml {
        /// Destination path
        file: PathBuf,
    },
}

impl Cli {
    /// Sort state reached by clicking the chosen header once, or twice for `--asc`.
    pub fn initial_sort(&self) -> SortState {
        let Some(column) = self.sort else {
            return SortState::default();
        };
        let state = SortState::default().on_header_click(column);
        if self.asc {
            state.on_header_click(column)
        } else {
            state
        }
    }
}

fn parse_column(value: &str) -> Result<FundColumn, String> {
    match FundColumn::from_key(value) {
        Some(column) if column.is_sortable() => Ok(column),
        Some(column) => Err(format!("column `{}` is not sortable", column.key())),
        None => Err(format!("unknown column `{value}`")),
    }
}
