pub mod board;
pub mod fund_table;
pub mod loading;

pub use board::run_fund_board;
pub use fund_table::{FundTableScreen, ScreenAction};
pub use loading::run_loading;
