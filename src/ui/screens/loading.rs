use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::*};

use crate::app::{LoadMode, PageLoader, PageView};
use crate::error::{AppError, Result};
use crate::ui::components::utils::centered_rect;
use crate::ui::screens::FundTableScreen;
use crate::ui::TerminalGuard;

const FRAME_INTERVAL: Duration = Duration::from_millis(120);

/// Run one page load in the background while drawing a "fetching" popup,
/// over the current table when there is one. Esc, `q` or Ctrl-C abort the
/// load with [`AppError::Cancelled`].
pub async fn run_loading(
    guard: &mut TerminalGuard,
    loader: Arc<PageLoader>,
    mode: LoadMode,
    mut background: Option<&mut FundTableScreen>,
) -> Result<PageView> {
    let label = match mode {
        LoadMode::Revalidate => "Carregando fundos...",
        LoadMode::Force => "Buscando fundos na brapi...",
    };
    let endpoint = loader.endpoint().to_string();
    let handle = tokio::spawn(async move { loader.load(mode).await });
    let mut tick = 0usize;

    loop {
        guard.terminal_mut().draw(|f| {
            let size = f.size();
            if let Some(screen) = background.as_deref_mut() {
                screen.render(f, size);
            }
            render_popup(f, size, label, &endpoint, tick);
        })?;

        if handle.is_finished() {
            break;
        }

        // Other keys are dropped so they do not replay on the table.
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if is_cancel_key(&key) {
                    handle.abort();
                    log::info!("Fund load cancelled by user");
                    return Err(AppError::Cancelled);
                }
            }
        }

        tick = tick.wrapping_add(1);
        tokio::time::sleep(FRAME_INTERVAL).await;
    }

    Ok(handle.await?)
}

fn is_cancel_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn render_popup(f: &mut Frame, size: Rect, label: &str, endpoint: &str, tick: usize) {
    const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

    let area = centered_rect(60, 5, size);
    f.render_widget(Clear, area);
    let block = Block::default().borders(Borders::ALL).title("Fundos Imobiliários");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        Line::from(format!("{} {}", SPINNER[tick % SPINNER.len()], label)),
        Line::from(Span::styled(
            endpoint.to_string(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "Esc para cancelar",
            Style::default().fg(Color::Gray),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
