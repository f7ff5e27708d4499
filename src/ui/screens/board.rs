use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};

use crate::app::{LoadMode, PageLoader};
use crate::error::{AppError, Result};
use crate::table::{Locale, SortState};
use crate::ui::screens::{run_loading, FundTableScreen, ScreenAction};
use crate::ui::TerminalGuard;

/// Interactive fund board: load once, then show the table until the user quits.
pub async fn run_fund_board(loader: PageLoader, sort: SortState, locale: Locale) -> Result<()> {
    let loader = Arc::new(loader);
    let mut guard = TerminalGuard::new()?;

    let view = match run_loading(&mut guard, Arc::clone(&loader), LoadMode::Revalidate, None).await
    {
        Ok(view) => view,
        Err(AppError::Cancelled) => return guard.restore(),
        Err(err) => return Err(err),
    };
    let mut screen = FundTableScreen::new(view, sort, locale);

    loop {
        guard.terminal_mut().draw(|f| {
            let area = f.size();
            screen.render(f, area);
        })?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match screen.handle_key(key) {
            ScreenAction::Continue => {}
            ScreenAction::Quit => break,
            ScreenAction::Reload(mode) => {
                log::info!("Reloading funds ({:?})", mode);
                match run_loading(&mut guard, Arc::clone(&loader), mode, Some(&mut screen)).await {
                    Ok(view) => screen.replace_view(view),
                    Err(AppError::Cancelled) => {}
                    Err(err) => return Err(err),
                }
            }
        }
    }

    guard.restore()?;
    Ok(())
}
