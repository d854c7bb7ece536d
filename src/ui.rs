use crate::app::{App, Click, Control, MenuItem};
use crate::config::Config;
use crate::login::{Focus, LoginGate};
use crate::router::Panel;
use crate::task::COLUMNS;
use crossterm::event::{self, Event, MouseButton, MouseEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Padding, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};
use std::io;

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        match event::read()? {
            Event::Key(key) => {
                if app.handle_key(key) == Control::Quit {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let size = terminal.size()?;
                let screen = Rect::new(0, 0, size.width, size.height);
                if let Some(click) = click_target(screen, app, mouse.column, mouse.row) {
                    app.handle_click(click);
                }
            }
            _ => {}
        }
    }
}

/// Centered rectangle of at most `width` x `height` inside `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn window_block(config: &Config) -> Block<'static> {
    Block::default()
        .title(config.title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .style(Style::default().bg(config.background).fg(Color::Black))
}

fn window_area(screen: Rect, config: &Config) -> Rect {
    centered(screen, config.width, config.height)
}

fn warning_area(inner: Rect) -> Rect {
    centered(inner, 40, 5)
}

struct LoginLayout {
    form: Rect,
    fields: [Rect; 3],
    button: Rect,
}

fn login_layout(area: Rect) -> LoginLayout {
    let form = centered(area, 40, 16);
    let inner = Block::default().borders(Borders::ALL).inner(form);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(inner);
    LoginLayout {
        form,
        fields: [chunks[0], chunks[1], chunks[2]],
        button: centered(chunks[3], 12, 1),
    }
}

/// Sidebar and content areas of the main screen.
fn main_layout(area: Rect, config: &Config) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(config.sidebar_width), Constraint::Min(0)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Maps a click on the terminal cell (`column`, `row`) to what was drawn there.
pub fn click_target(screen: Rect, app: &App, column: u16, row: u16) -> Option<Click> {
    let inner = window_block(&app.config).inner(window_area(screen, &app.config));
    let pos = Position::new(column, row);

    if app.warning().is_some() {
        return warning_area(inner).contains(pos).then_some(Click::DismissWarning);
    }

    match app.login_gate() {
        Some(_) => {
            let layout = login_layout(inner);
            if layout.button.contains(pos) {
                return Some(Click::Submit);
            }
            [Focus::Username, Focus::Email, Focus::Password]
                .into_iter()
                .zip(layout.fields)
                .find(|(_, area)| area.contains(pos))
                .map(|(focus, _)| Click::Field(focus))
        }
        None => {
            let (sidebar, _) = main_layout(inner, &app.config);
            if !sidebar.contains(pos) {
                return None;
            }
            let index = (row - sidebar.y) as usize;
            (index < MenuItem::ALL.len()).then_some(Click::Menu(index))
        }
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let window = window_area(f.area(), &app.config);
    let block = window_block(&app.config);
    let inner = block.inner(window);
    f.render_widget(block, window);

    match app.login_gate() {
        Some(gate) => draw_login(f, app, gate, inner),
        None => draw_main(f, app, inner),
    }

    if let Some(warning) = app.warning() {
        let area = warning_area(inner);
        f.render_widget(Clear, area);
        let popup = Paragraph::new(vec![
            Line::from(warning.message),
            Line::from(""),
            Line::from(Span::styled("[ OK ]", Style::default().add_modifier(Modifier::BOLD))),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(warning.title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(popup, area);
    }
}

fn draw_login(f: &mut Frame, app: &App, gate: &LoginGate, area: Rect) {
    let layout = login_layout(area);
    let block = Block::default()
        .title(Span::styled("INICIAR SESION", Style::default().add_modifier(Modifier::BOLD)))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::White));
    f.render_widget(block, layout.form);

    let masked = gate.masked_password();
    let fields = [
        (Focus::Username, gate.username.as_str()),
        (Focus::Email, gate.email.as_str()),
        (Focus::Password, masked.as_str()),
    ];
    for ((focus, value), area) in fields.into_iter().zip(layout.fields) {
        let input = Paragraph::new(value).block(Block::default().borders(Borders::ALL).border_style(
            if gate.focus == focus {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            },
        ));
        f.render_widget(input, area);
    }

    let button_style = if gate.focus == Focus::Submit {
        Style::default()
            .bg(app.config.accent)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.config.accent).add_modifier(Modifier::BOLD)
    };
    let button = Paragraph::new(Line::from(Span::styled(" ACCEDER ", button_style)))
        .alignment(Alignment::Center);
    f.render_widget(button, layout.button);
}

fn draw_main(f: &mut Frame, app: &App, area: Rect) {
    let (sidebar_area, content_area) = main_layout(area, &app.config);

    let items: Vec<ListItem> = MenuItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut style = Style::default().fg(Color::White);
            if let MenuItem::Open(id) = item {
                if app.router().is_visible(*id) {
                    style = style.add_modifier(Modifier::BOLD);
                }
            }
            if i == app.selected_menu {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(Line::from(Span::styled(format!(" {}", item.label()), style)))
        })
        .collect();
    let sidebar = List::new(items).block(Block::default().style(Style::default().bg(app.config.accent)));
    f.render_widget(sidebar, sidebar_area);

    let content = Block::default().style(Style::default().bg(Color::White));
    let inner = content.inner(content_area);
    f.render_widget(content, content_area);
    if let Some(panel) = app.router().visible() {
        draw_panel(f, panel, inner);
    }
}

fn draw_panel(f: &mut Frame, panel: &Panel, area: Rect) {
    let table_height = if panel.table.is_some() { 12 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(panel.lines.len() as u16),
            Constraint::Length(table_height),
            Constraint::Min(0),
        ])
        .split(area);

    let heading = Paragraph::new(Line::from(Span::styled(
        panel.heading,
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().padding(Padding::vertical(1)));
    f.render_widget(heading, chunks[0]);

    let body: Vec<Line> = panel.lines.iter().map(|l| Line::from(*l)).collect();
    f.render_widget(
        Paragraph::new(body).alignment(Alignment::Center).wrap(Wrap { trim: true }),
        chunks[1],
    );

    if let Some(rows) = &panel.table {
        let header = Row::new(COLUMNS.iter().map(|c| Cell::from(*c)))
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = rows.iter().map(|r| Row::new(r.cells())).collect();
        let table = Table::new(
            rows,
            [Constraint::Percentage(40), Constraint::Percentage(30), Constraint::Percentage(30)],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(table, chunks[2]);
    }
}
