use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{prelude::*, widgets::*};

use crate::app::{LoadMode, PageView};
use crate::fetch::FundRow;
use crate::records::SnapshotSource;
use crate::table::{sort_rows, FundColumn, Locale, SortState};
use crate::ui::components::{build_fund_table, column_widths};
use crate::ui::styles;
use crate::utils::format_human;

const TITLE: &str = "Fundos Imobiliários (FIIs)";

/// Outcome of a key press on the fund table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScreenAction {
    Continue,
    Quit,
    Reload(LoadMode),
}

/// Owns the page rows, the sort state, and the cursor of the fund table.
pub struct FundTableScreen {
    view: PageView,
    sort: SortState,
    displayed: Vec<FundRow>,
    widths: Vec<u16>,
    focus: usize,
    selected: usize,
    offset: usize,
    locale: Locale,
}

impl FundTableScreen {
    pub fn new(view: PageView, sort: SortState, locale: Locale) -> Self {
        let mut screen = Self {
            view,
            sort,
            displayed: Vec::new(),
            widths: Vec::new(),
            focus: 1,
            selected: 0,
            offset: 0,
            locale,
        };
        if let Some(column) = sort.key {
            screen.focus = column_index(column);
        }
        screen.rebuild(None);
        screen
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn displayed_rows(&self) -> &[FundRow] {
        &self.displayed
    }

    pub fn focused_column(&self) -> FundColumn {
        FundColumn::ALL[self.focus]
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Swap in a freshly loaded page, keeping the sort and the selected fund.
    pub fn replace_view(&mut self, view: PageView) {
        let current = self.current_ticker();
        self.view = view;
        self.rebuild(current);
    }

    /// Apply a header activation; non-sortable columns leave everything as is.
    pub fn click_header(&mut self, column: FundColumn) {
        let next = self.sort.on_header_click(column);
        if next == self.sort {
            return;
        }
        let current = self.current_ticker();
        self.sort = next;
        self.rebuild(current);
    }

    fn current_ticker(&self) -> Option<String> {
        self.displayed.get(self.selected).map(|row| row.stock.clone())
    }

    fn rebuild(&mut self, current: Option<String>) {
        self.displayed = sort_rows(self.view.rows(), self.sort);
        self.widths = column_widths(&self.displayed, self.sort, self.locale);

        let total = self.displayed.len();
        self.selected = current
            .and_then(|code| self.displayed.iter().position(|row| row.stock == code))
            .unwrap_or(self.selected)
            .min(total.saturating_sub(1));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        let total = self.displayed.len();
        let columns = FundColumn::ALL.len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return ScreenAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return ScreenAction::Quit
            }
            KeyCode::Char('r') => return ScreenAction::Reload(LoadMode::Revalidate),
            KeyCode::Char('R') => return ScreenAction::Reload(LoadMode::Force),
            KeyCode::Left | KeyCode::Char('h') => {
                self.focus = (self.focus + columns - 1) % columns;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.focus = (self.focus + 1) % columns;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.click_header(self.focused_column());
            }
            KeyCode::Char(digit @ '1'..='9') => {
                let idx = digit as usize - '1' as usize;
                if idx < columns {
                    self.focus = idx;
                    self.click_header(FundColumn::ALL[idx]);
                }
            }
            KeyCode::Down | KeyCode::Char('j') if total > 0 => {
                self.selected = (self.selected + 1) % total;
            }
            KeyCode::Up | KeyCode::Char('k') if total > 0 => {
                self.selected = self.selected.checked_sub(1).unwrap_or(total - 1);
            }
            KeyCode::PageDown if total > 0 => {
                self.selected = (self.selected + self.page_size()).min(total - 1);
            }
            KeyCode::PageUp => {
                self.selected = self.selected.saturating_sub(self.page_size());
            }
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = total.saturating_sub(1),
            _ => {}
        }
        ScreenAction::Continue
    }

    fn page_size(&self) -> usize {
        10
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let heading = Paragraph::new(vec![
            Line::from(Span::styled(
                TITLE,
                Style::default().fg(styles::ACCENT).add_modifier(Modifier::BOLD),
            )),
            styles::secondary_line(self.source_line()),
        ]);
        f.render_widget(heading, chunks[0]);

        match self.view.error().map(str::to_string) {
            Some(message) => self.render_banner(f, chunks[1], message),
            None => self.render_table(f, chunks[1]),
        }

        f.render_widget(
            Paragraph::new(self.footer_line()).style(Style::default().fg(Color::Gray)),
            chunks[2],
        );
    }

    fn render_table(&mut self, f: &mut Frame, area: Rect) {
        let capacity = (area.height.saturating_sub(3) as usize).max(1);
        let total = self.displayed.len();

        if self.selected >= self.offset + capacity {
            self.offset = self.selected + 1 - capacity;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        }
        self.offset = self.offset.min(total.saturating_sub(capacity));

        let end = (self.offset + capacity).min(total);
        let visible = &self.displayed[self.offset..end];
        let selected = (total > 0).then(|| self.selected - self.offset);

        let title = if total == 0 {
            "0 fundos".to_string()
        } else {
            format!("{} fundos • {}-{}", total, self.offset + 1, end)
        };

        let table = build_fund_table(
            visible,
            &self.widths,
            self.sort,
            Some(self.focused_column()),
            selected,
            self.locale,
            title,
        );
        f.render_widget(table, area);
    }

    fn render_banner(&self, f: &mut Frame, area: Rect, message: String) {
        let height = area.height.min(5);
        let banner_area = Rect { height, ..area };
        let banner = Paragraph::new(message)
            .style(styles::banner_style())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(styles::banner_style())
                    .title("Erro"),
            );
        f.render_widget(banner, banner_area);
    }

    fn source_line(&self) -> String {
        match self.view.snapshot() {
            Some(snapshot) => {
                let origin = match &snapshot.source {
                    SnapshotSource::Network => "brapi".to_string(),
                    SnapshotSource::Disk(name) => format!("snapshot {name}"),
                };
                format!(
                    "Fonte: {} • atualizado {}",
                    origin,
                    format_human(snapshot.fetched_at)
                )
            }
            None => "Fonte: brapi".to_string(),
        }
    }

    fn footer_line(&self) -> String {
        format!(
            "Ordem: {} • ←/→ coluna • Enter/1-9 ordenar • ↑/↓ mover • r atualizar • R forçar • q sair",
            self.sort.describe()
        )
    }
}

fn column_index(column: FundColumn) -> usize {
    FundColumn::ALL
        .iter()
        .position(|c| *c == column)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::records::Snapshot;
    use crate::table::SortDirection;
    use chrono::Local;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    const WIDTH: u16 = 140;
    const HEIGHT: u16 = 12;

    fn loaded(rows: Vec<FundRow>) -> PageView {
        PageView::Loaded(Snapshot {
            rows,
            fetched_at: Local::now(),
            source: SnapshotSource::Network,
        })
    }

    fn sample_rows() -> Vec<FundRow> {
        vec![
            FundRow {
                stock: "ABCD11".to_string(),
                close: Some(12.345),
                change: Some(-1.2),
                volume: Some(1000.0),
                market_cap: None,
                ..FundRow::default()
            },
            FundRow {
                stock: "WXYZ11".to_string(),
                name: Some("Fundo Teste".to_string()),
                close: Some(98.1),
                change: Some(2.0),
                ..FundRow::default()
            },
        ]
    }

    fn draw(screen: &mut FundTableScreen) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                screen.render(f, area);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn lines(buffer: &Buffer) -> Vec<String> {
        (0..HEIGHT)
            .map(|y| (0..WIDTH).map(|x| buffer.get(x, y).symbol()).collect::<String>())
            .collect()
    }

    fn find(buffer: &Buffer, needle: &str) -> Option<(u16, u16)> {
        lines(buffer).iter().enumerate().find_map(|(y, line)| {
            line.find(needle).map(|byte_idx| {
                let x = line[..byte_idx].chars().count();
                (x as u16, y as u16)
            })
        })
    }

    fn press(screen: &mut FundTableScreen, code: KeyCode) -> ScreenAction {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn renders_formatted_cells() {
        let mut screen = FundTableScreen::new(loaded(sample_rows()), SortState::default(), Locale::PtBr);
        let buffer = draw(&mut screen);
        let text = lines(&buffer).join("\n");

        assert!(text.contains("Ticker ⇅"));
        assert!(text.contains("Logo "));
        assert!(!text.contains("Logo ⇅"));
        assert!(text.contains("12,35"));
        assert!(text.contains("-1,20%"));
        assert!(text.contains("1.000"));
        assert!(text.contains("—"));

        let (x, y) = find(&buffer, "-1,20%").expect("change cell");
        assert_eq!(buffer.get(x, y).style().fg, Some(Color::Red));
        let (x, y) = find(&buffer, "2,00%").expect("positive change cell");
        assert_eq!(buffer.get(x, y).style().fg, Some(Color::Green));
    }

    #[test]
    fn failure_shows_banner_without_rows() {
        let view = PageView::from_result(Err(FetchError::Status(500)));
        let mut screen = FundTableScreen::new(view, SortState::default(), Locale::PtBr);
        let text = lines(&draw(&mut screen)).join("\n");

        assert!(text.contains("Falha ao buscar dados (500)"));
        assert!(!text.contains("Ticker"));
        assert!(screen.displayed_rows().is_empty());
    }

    #[test]
    fn empty_list_keeps_headers() {
        let mut screen = FundTableScreen::new(loaded(Vec::new()), SortState::default(), Locale::PtBr);
        let text = lines(&draw(&mut screen)).join("\n");

        assert!(text.contains("Ticker ⇅"));
        assert!(text.contains("Market Cap ⇅"));
        assert!(text.contains("0 fundos"));
        assert!(text.contains("Ordem: sem ordenação"));
        assert!(!text.contains("Erro"));
    }

    #[test]
    fn header_keys_drive_sort_state() {
        let mut screen = FundTableScreen::new(loaded(sample_rows()), SortState::default(), Locale::PtBr);

        assert_eq!(press(&mut screen, KeyCode::Char('1')), ScreenAction::Continue);
        assert_eq!(screen.sort_state(), SortState::default());
        assert_eq!(screen.displayed_rows()[0].stock, "ABCD11");

        press(&mut screen, KeyCode::Char('6'));
        assert_eq!(screen.sort_state().key, Some(FundColumn::Close));
        assert_eq!(screen.sort_state().direction, SortDirection::Descending);
        assert_eq!(screen.displayed_rows()[0].stock, "WXYZ11");

        press(&mut screen, KeyCode::Enter);
        assert_eq!(screen.sort_state().direction, SortDirection::Ascending);
        assert_eq!(screen.displayed_rows()[0].stock, "ABCD11");

        press(&mut screen, KeyCode::Right);
        assert_eq!(screen.focused_column(), FundColumn::Change);
        press(&mut screen, KeyCode::Char(' '));
        assert_eq!(screen.sort_state().key, Some(FundColumn::Change));
        assert_eq!(screen.sort_state().direction, SortDirection::Descending);

        let text = lines(&draw(&mut screen)).join("\n");
        assert!(text.contains("Variação (%) ▼"));
        assert!(text.contains("Preço (R$) ⇅"));
    }

    #[test]
    fn selection_follows_fund_across_resorts() {
        let mut screen = FundTableScreen::new(loaded(sample_rows()), SortState::default(), Locale::PtBr);
        press(&mut screen, KeyCode::Down);
        assert_eq!(screen.displayed_rows()[screen.selected()].stock, "WXYZ11");

        press(&mut screen, KeyCode::Char('7'));
        assert_eq!(screen.displayed_rows()[screen.selected()].stock, "WXYZ11");
        press(&mut screen, KeyCode::Char('7'));
        assert_eq!(screen.displayed_rows()[screen.selected()].stock, "WXYZ11");
    }

    #[test]
    fn reload_and_quit_keys() {
        let mut screen = FundTableScreen::new(loaded(Vec::new()), SortState::default(), Locale::PtBr);
        assert_eq!(
            press(&mut screen, KeyCode::Char('r')),
            ScreenAction::Reload(LoadMode::Revalidate)
        );
        assert_eq!(
            press(&mut screen, KeyCode::Char('R')),
            ScreenAction::Reload(LoadMode::Force)
        );
        assert_eq!(press(&mut screen, KeyCode::Esc), ScreenAction::Quit);
        assert_eq!(press(&mut screen, KeyCode::Down), ScreenAction::Continue);
    }

    #[test]
    fn replacing_view_keeps_sort() {
        let sort = SortState::default().on_header_click(FundColumn::Close);
        let mut screen = FundTableScreen::new(loaded(Vec::new()), sort, Locale::PtBr);
        screen.replace_view(loaded(sample_rows()));
        assert_eq!(screen.sort_state(), sort);
        assert_eq!(screen.displayed_rows()[0].stock, "WXYZ11");
        assert_eq!(screen.focused_column(), FundColumn::Close);
    }
}
