use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Clear, Dataset, GraphType,
    Paragraph, Row, Table, TableState,
};

use crate::state::{AppState, ChartData, DashboardData, Meta, Player, Tab, league_label};
use crate::view;

const ACCENT: Color = Color::Blue;
const GOALS_COLOR: Color = Color::Green;
const XG_COLOR: Color = Color::Magenta;
const MUTED: Color = Color::DarkGray;

pub const LOADING_TEXT: &str = "Loading Analytics...";

pub fn draw(frame: &mut Frame, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(13), Constraint::Min(20)])
        .split(frame.size());

    render_sidebar(frame, columns[0], state);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(columns[1]);

    render_header(frame, rows[0], state);
    render_body(frame, rows[1], state);

    let console = Paragraph::new(console_text(state))
        .style(Style::default().fg(MUTED))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, rows[2]);

    let footer = Paragraph::new(footer_text(state)).style(Style::default().fg(MUTED));
    frame.render_widget(footer, rows[3]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().borders(Borders::RIGHT);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            " [ FA ] ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.push(nav_icon("1 Dash", state.tab == Tab::Dashboard));
    lines.push(Line::from(""));
    lines.push(nav_icon("2 Players", state.tab == Tab::Players));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn nav_icon(label: &str, active: bool) -> Line<'static> {
    let style = if active {
        Style::default()
            .fg(Color::White)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    };
    Line::from(Span::styled(format!(" {label:<10}"), style))
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(44)])
        .split(area);

    let title = vec![
        Line::from(Span::styled(
            "Football Analytics Pro",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Season 2014-2020 Data Explorer",
            Style::default().fg(MUTED),
        )),
        Line::from(Span::styled(status_text(state), Style::default().fg(MUTED))),
    ];
    frame.render_widget(Paragraph::new(title), cols[0]);

    let search_style = if state.search_active {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let search_value = if state.search_active {
        format!("{}_", state.filter.search)
    } else if state.filter.search.is_empty() {
        "Search player...".to_string()
    } else {
        state.filter.search.clone()
    };
    let controls = vec![
        Line::from(vec![
            Span::styled("League  ", Style::default().fg(MUTED)),
            Span::raw(format!("< {} >", league_label(state.filter.league))),
        ]),
        Line::from(vec![
            Span::styled("Search  ", Style::default().fg(MUTED)),
            Span::styled(search_value, search_style),
        ]),
    ];
    frame.render_widget(Paragraph::new(controls), cols[1]);
}

fn status_text(state: &AppState) -> String {
    match (state.loading, state.updated_at.as_deref()) {
        (true, Some(at)) => format!("Refreshing... (last update {at})"),
        (true, None) => "Loading...".to_string(),
        (false, Some(at)) => format!("Updated {at}"),
        (false, None) => "No data".to_string(),
    }
}

fn render_body(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(data) = state.data.as_ref() else {
        if state.loading {
            let placeholder = Paragraph::new(LOADING_TEXT)
                .alignment(Alignment::Center)
                .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
            frame.render_widget(placeholder, centered_line(area));
        }
        return;
    };

    match state.tab {
        Tab::Dashboard => render_dashboard_tab(frame, area, data),
        Tab::Players => render_player_table(frame, area, &data.table, state.table_selected),
    }
}

fn render_dashboard_tab(frame: &mut Frame, area: Rect, data: &DashboardData) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(6)])
        .split(area);
    render_dashboard(frame, rows[0], &data.meta);
    render_charts(frame, rows[1], &data.charts);
}

fn render_dashboard(frame: &mut Frame, area: Rect, meta: &Meta) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);
    let colors = [Color::Cyan, GOALS_COLOR, XG_COLOR];

    for ((card, col), color) in view::dashboard_cards(meta).iter().zip(cols.iter()).zip(colors) {
        render_card(frame, *col, card, color);
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &view::MetricCard, color: Color) {
    let block = Block::default()
        .title(Span::styled(
            card.title.to_uppercase(),
            Style::default().fg(MUTED),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let value = Paragraph::new(card.value.as_str())
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .block(block);
    frame.render_widget(value, area);
}

fn render_charts(frame: &mut Frame, area: Rect, charts: &ChartData) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    render_top_scorers(frame, cols[0], charts);
    render_scatter(frame, cols[1], charts);
}

fn render_top_scorers(frame: &mut Frame, area: Rect, charts: &ChartData) {
    let block = Block::default().title("Top 10 Scorers").borders(Borders::ALL);
    let bars_data = view::top_scorer_bars(charts);
    if bars_data.is_empty() {
        let empty = Paragraph::new("No scorers for this filter")
            .style(Style::default().fg(MUTED))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let bars: Vec<Bar> = bars_data
        .into_iter()
        .map(|(name, goals)| {
            Bar::default()
                .label(Line::from(name))
                .value(goals)
                .style(Style::default().fg(ACCENT))
                .value_style(Style::default().fg(Color::White).bg(ACCENT))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0);
    frame.render_widget(chart, area);
}

fn render_scatter(frame: &mut Frame, area: Rect, charts: &ChartData) {
    let block = Block::default()
        .title("Efficiency (Goals vs xG)")
        .borders(Borders::ALL);
    let points = view::scatter_points(charts);
    if points.is_empty() {
        let empty = Paragraph::new("No players above the goal threshold")
            .style(Style::default().fg(MUTED))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let (x_max, y_max) = view::scatter_bounds(&points);
    let dataset = Dataset::default()
        .name("Players")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(GOALS_COLOR))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title("xG")
                .style(Style::default().fg(MUTED))
                .bounds([0.0, x_max])
                .labels(vec![Span::raw("0"), Span::raw(view::format_plain(x_max))]),
        )
        .y_axis(
            Axis::default()
                .title("Goals")
                .style(Style::default().fg(MUTED))
                .bounds([0.0, y_max])
                .labels(vec![Span::raw("0"), Span::raw(view::format_plain(y_max))]),
        );
    frame.render_widget(chart, area);
}

fn render_player_table(frame: &mut Frame, area: Rect, players: &[Player], selected: usize) {
    let header_style = Style::default().fg(MUTED).add_modifier(Modifier::BOLD);
    let header = Row::new(
        view::TABLE_HEADER
            .iter()
            .enumerate()
            .map(|(idx, title)| table_cell(title.to_string(), idx, header_style)),
    );

    let rows = view::player_rows(players).into_iter().map(|cells| {
        Row::new(
            cells
                .into_iter()
                .enumerate()
                .map(|(idx, text)| table_cell(text, idx, column_style(idx))),
        )
    });

    let widths = [
        Constraint::Min(18),
        Constraint::Min(14),
        Constraint::Length(11),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(7),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!("Players ({})", players.len()))
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().bg(MUTED).fg(Color::White))
        .highlight_symbol("> ");

    let mut table_state = TableState::default();
    if !players.is_empty() {
        table_state.select(Some(selected.min(players.len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn table_cell(text: String, col: usize, style: Style) -> Cell<'static> {
    // Mins, Goals and xG are right-aligned.
    let line = if col >= 3 {
        Line::from(text).alignment(Alignment::Right)
    } else {
        Line::from(text)
    };
    Cell::from(line).style(style)
}

fn column_style(col: usize) -> Style {
    match col {
        0 => Style::default().fg(Color::White),
        3 => Style::default().fg(MUTED),
        4 => Style::default().fg(GOALS_COLOR).add_modifier(Modifier::BOLD),
        5 => Style::default().fg(XG_COLOR),
        _ => Style::default(),
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn footer_text(state: &AppState) -> String {
    if state.search_active {
        return "Type to search | Backspace Delete | Ctrl-U Clear | Enter/Esc Done".to_string();
    }
    match state.tab {
        Tab::Dashboard => {
            "1/2/Tab View | l/L League | / Search | r Refresh | x Export | ? Help | q Quit"
                .to_string()
        }
        Tab::Players => {
            "1/2/Tab View | j/k/↑/↓ Move | l/L League | / Search | r Refresh | x Export | ? Help | q Quit"
                .to_string()
        }
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Football Analytics Pro - Help",
        "",
        "Views:",
        "  1 / 2 / Tab  Dashboard / Players",
        "",
        "Filters:",
        "  l / L        Next / previous league",
        "  /            Search by player name",
        "  r            Refresh current filter",
        "",
        "Players:",
        "  j/k or ↑/↓   Move selection",
        "  x            Export table to .xlsx",
        "",
        "  ?            Toggle help",
        "  q / Ctrl-C   Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_line(area: Rect) -> Rect {
    Rect {
        x: area.x,
        y: area.y + area.height / 2,
        width: area.width,
        height: area.height.min(1),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
