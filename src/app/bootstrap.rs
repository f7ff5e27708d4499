use std::fs::File;
use std::path::Path;
use std::process::ExitCode;

use crate::app::{LoadMode, PageLoader};
use crate::cli::{Cli, Commands};
use crate::config::{load_or_builtin, Config};
use crate::error::Result;
use crate::export::{export_csv, export_html, render_plain};
use crate::fetch::FundFetcher;
use crate::records::SnapshotStore;
use crate::ui::run_fund_board;

/// Entry point used by `main`: load configuration, then dispatch the command.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_or_builtin(&cli.config)?;
    let command = cli.command.clone().unwrap_or(Commands::Tui);
    init_logging(&command, &config.log_file);

    let sort = cli.initial_sort();
    let loader = build_loader(&config, cli.no_cache)?;

    match command {
        Commands::Tui => {
            run_fund_board(loader, sort, config.locale).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Print => {
            let view = loader.load(LoadMode::Revalidate).await;
            print!("{}", render_plain(&view, sort, config.locale));
            Ok(exit_code_for(view.error().is_none()))
        }
        Commands::ExportCsv { file } => {
            let view = loader.load(LoadMode::Revalidate).await;
            let count = export_csv(&file, &view, sort)?;
            println!("{} fundos exportados para {}", count, file.display());
            Ok(ExitCode::SUCCESS)
        }
        Commands::ExportHtml { file } => {
            let view = loader.load(LoadMode::Revalidate).await;
            export_html(&file, &view, sort, config.locale, loader.endpoint())?;
            match view.error() {
                Some(message) => eprintln!("{message} (aviso gravado em {})", file.display()),
                None => println!(
                    "{} fundos exportados para {}",
                    view.rows().len(),
                    file.display()
                ),
            }
            Ok(exit_code_for(view.error().is_none()))
        }
    }
}

fn build_loader(config: &Config, no_cache: bool) -> Result<PageLoader> {
    let fetcher = FundFetcher::new(config)?;
    let store = (!no_cache).then(|| SnapshotStore::from_config(config));
    Ok(PageLoader::new(fetcher, store))
}

/// Logs go to stderr, except under the TUI where they would corrupt the
/// alternate screen and are written to `log_file` instead.
fn init_logging(command: &Commands, log_file: &Path) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if matches!(command, Commands::Tui) {
        match File::create(log_file) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(err) => {
                eprintln!("Cannot open log file {}: {}", log_file.display(), err);
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }

    let _ = builder.try_init();
}

fn exit_code_for(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
