use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::models::Role;
use crate::progression::{format_level, format_percent, format_xp_progress};
use crate::tui::app::{App, InputMode, Screen};

pub fn draw(frame: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::List => draw_list_screen(frame, app),
        Screen::Detail => draw_detail_screen(frame, app),
        Screen::Loading => draw_loading_screen(frame, app),
    }
}

fn level_color(level: u32) -> Color {
    match level {
        l if l >= 40 => Color::Magenta,
        l if l >= 30 => Color::Cyan,
        l if l >= 20 => Color::Yellow,
        l if l >= 10 => Color::Green,
        _ => Color::Gray,
    }
}

fn draw_list_screen(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(4),
        ])
        .split(frame.size());

    let title = Paragraph::new("Bounty Hunter Progress")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = app
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i == app.selected_index {
                Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<10}", format_level(row.level.level)),
                    Style::default().fg(level_color(row.level.level)),
                ),
                Span::raw(format!("{:<20}", row.profile.name())),
                Span::styled(
                    format_xp_progress(&row.level),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
            .style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Profiles ({})", app.rows.len())),
    );
    frame.render_widget(list, chunks[1]);

    let mut lines = vec![Line::from(vec![
        Span::styled("j/k", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(" select | "),
        Span::styled("Enter", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(" details | "),
        Span::styled("r", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(" refresh | "),
        Span::styled("q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(" quit"),
    ])];

    if let Some(error) = &app.error_message {
        lines.push(Line::from(vec![
            Span::styled("Error: ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(error.as_str(), Style::default().fg(Color::Red)),
        ]));
    }

    let help = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[2]);
}

fn draw_detail_screen(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.size());

    let Some(row) = app.selected() else {
        return;
    };

    let title = Paragraph::new(row.profile.name().to_string())
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let role_color = match row.profile.role {
        Role::Company => Color::Blue,
        Role::Admin => Color::Red,
        Role::Hunter => Color::White,
    };

    let mut text = vec![
        Line::from(vec![
            Span::raw("Username: "),
            Span::styled(row.profile.username.as_str(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::raw("Role: "),
            Span::styled(row.profile.role.as_str(), Style::default().fg(role_color)),
        ]),
        Line::from(format!("Bounties completed: {}", row.profile.bounties_completed)),
        Line::from(format!("Total XP: {}", row.profile.total_xp)),
        Line::from(vec![
            Span::styled(
                format_level(row.level.level),
                Style::default().fg(level_color(row.level.level)).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  ({} to next)", row.level.xp_remaining())),
        ]),
    ];

    if let Some(status) = &app.status_message {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
    }

    let details = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Profile"))
        .wrap(Wrap { trim: true });
    frame.render_widget(details, chunks[1]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(level_color(row.level.level)))
        .ratio(row.level.progress_percent.clamp(0.0, 1.0))
        .label(format!("{} ({})", format_xp_progress(&row.level), format_percent(&row.level)));
    frame.render_widget(gauge, chunks[2]);

    let input_title = if app.input_mode == InputMode::AwardingXp {
        "Award XP [Enter to apply, ESC to cancel]"
    } else {
        "Award XP [x to enter amount]"
    };
    let input = Paragraph::new(app.current_input.as_str())
        .style(match app.input_mode {
            InputMode::AwardingXp => Style::default().fg(Color::Yellow),
            InputMode::Normal => Style::default(),
        })
        .block(Block::default().borders(Borders::ALL).title(input_title));
    frame.render_widget(input, chunks[3]);

    let help = Paragraph::new("Press 'b' to go back | 'q' to quit")
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[4]);

    if app.input_mode == InputMode::AwardingXp {
        frame.set_cursor(
            chunks[3].x + app.current_input.len() as u16 + 1,
            chunks[3].y + 1,
        );
    }
}

fn draw_loading_screen(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 20, frame.size());

    let loading_text = app.loading_message.as_deref().unwrap_or("Loading...");

    let loading = Paragraph::new(loading_text)
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Please wait"));

    frame.render_widget(Clear, area);
    frame.render_widget(loading, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
