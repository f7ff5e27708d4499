pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod records;
pub mod table;
pub mod ui;
pub mod utils;

pub use error::{AppError, FetchError, Result};
