pub mod table;
pub mod terminal;
pub mod utils;

pub use table::{build_fund_table, column_widths};
pub use terminal::TerminalGuard;
