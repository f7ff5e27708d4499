use std::process::ExitCode;

use clap::Parser;

use fii_board::app;
use fii_board::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match app::run(cli).await {
        Ok(code) => code,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("Erro: {}", err);
            ExitCode::FAILURE
        }
    }
}
