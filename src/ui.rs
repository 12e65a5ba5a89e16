use crate::catalog::Catalog;
use crate::entities::Category;
use crate::query::{self, GarmentRow};
use crate::render;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

/// Rows of one category tab
pub struct CategoryTab {
    pub category: Category,
    pub rows: Vec<GarmentRow>,
}

/// Read-only closet browser state
pub struct BrowserApp {
    pub tabs: Vec<CategoryTab>,
    pub current_tab: usize,
    pub state: TableState,
    pub total_value: f64,
    pub garment_count: usize,
}

impl BrowserApp {
    pub fn new(catalog: &Catalog) -> Self {
        let listing = query::list_all(catalog);
        let tabs: Vec<CategoryTab> = listing
            .sections
            .iter()
            .map(|section| CategoryTab {
                category: section.category,
                rows: query::rows(section.garments.iter().copied()),
            })
            .collect();

        let mut app = Self {
            tabs,
            current_tab: 0,
            state: TableState::default(),
            total_value: listing.total_value,
            garment_count: catalog.len(),
        };
        app.reset_selection();
        app
    }

    pub fn current(&self) -> &CategoryTab {
        &self.tabs[self.current_tab]
    }

    pub fn selected_row(&self) -> Option<&GarmentRow> {
        self.state.selected().and_then(|i| self.current().rows.get(i))
    }

    pub fn next_tab(&mut self) {
        self.current_tab = (self.current_tab + 1) % self.tabs.len();
        self.reset_selection();
    }

    pub fn previous_tab(&mut self) {
        self.current_tab = if self.current_tab == 0 {
            self.tabs.len() - 1
        } else {
            self.current_tab - 1
        };
        self.reset_selection();
    }

    pub fn next(&mut self) {
        let len = self.current().rows.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.current().rows.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn first(&mut self) {
        if !self.current().rows.is_empty() {
            self.state.select(Some(0));
        }
    }

    pub fn last(&mut self) {
        let len = self.current().rows.len();
        if len > 0 {
            self.state.select(Some(len - 1));
        }
    }

    fn reset_selection(&mut self) {
        if self.current().rows.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }
}

/// Take over the terminal until the user presses q/Esc
pub fn run_browser(catalog: &Catalog) -> Result<()> {
    let mut app = BrowserApp::new(catalog);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut BrowserApp,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::BackTab => app.previous_tab(),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_tab();
                    } else {
                        app.next_tab();
                    }
                }
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Home => app.first(),
                KeyCode::End => app.last(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut BrowserApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Category tabs + totals
            Constraint::Min(0),    // Garment table
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_table(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &BrowserApp) {
    let mut tab_spans = vec![];
    for (i, tab) in app.tabs.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if i == app.current_tab {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(
            format!("{} ({})", tab.category.label(), tab.rows.len()),
            style,
        ));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Items: {}", app.garment_count),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Value: {}", render::money(app.total_value)),
        Style::default().fg(Color::Green),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut BrowserApp) {
    let header_cells = ["Name", "Price Per Wear", "Times Worn", "Last Worn", "Notes"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let tab = &app.tabs[app.current_tab];
    let rows = tab.rows.iter().map(|row| {
        // Unworn garments stand out
        let color = if row.times_worn == 0 {
            Color::Cyan
        } else {
            Color::White
        };

        let cells = vec![
            Cell::from(truncate(&row.name, 28)),
            Cell::from(format!("{:.2}", row.price_per_wear)),
            Cell::from(row.times_worn.to_string()).style(Style::default().fg(color)),
            Cell::from(row.last_worn.clone()).style(Style::default().fg(color)),
            Cell::from(truncate(&row.notes, 48)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(30),
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Min(20),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", tab.category.label())),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &BrowserApp) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.current().rows.len();

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    if let Some(row) = app.selected_row() {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            format!("PPW {}", render::money(row.price_per_wear)),
            Style::default().fg(Color::Green),
        ));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Category | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("Home/End", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Jump | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Back"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
