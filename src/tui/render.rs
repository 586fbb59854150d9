use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::app::App;
use super::markdown::markdown_to_lines;
use crate::constants::{HOW_IT_WORKS_URL, PRESET_QUESTIONS};
use crate::session::Role;

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Chat / presets
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);

    let content_chunks = if app.show_sidebar {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
            .split(chunks[1])
    } else {
        std::rc::Rc::new([Rect::default(), chunks[1]])
    };

    if app.show_sidebar {
        render_sidebar(frame, content_chunks[0], app);
    }

    // Presets take over the chat area while the transcript is empty
    if app.session.presets_visible() {
        render_presets(frame, content_chunks[1], app);
    } else {
        render_chat(frame, content_chunks[1], app);
    }

    render_input(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);
}

/// Render the header
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let kb_label = if app.config.kb_id.is_empty() {
        "no knowledge base"
    } else {
        app.config.kb_id.as_str()
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "kbchat",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | KB: "),
        Span::styled(kb_label.to_string(), Style::default().fg(Color::Green)),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

/// Render the debug sidebar: the two config identifiers and the docs link
fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let mut items: Vec<ListItem> = Vec::new();

    items.push(ListItem::new(Line::from(vec![
        Span::raw("KB_ID: "),
        config_value(&app.config.kb_id),
    ])));
    items.push(ListItem::new(Line::from(vec![
        Span::raw("MODEL_ARN: "),
        config_value(&app.config.model_arn),
    ])));
    items.push(ListItem::new(Line::from(vec![
        Span::raw("Region: "),
        Span::styled(app.config.region.clone(), Style::default().fg(Color::Green)),
    ])));
    items.push(ListItem::new(""));
    items.push(ListItem::new(Line::from(Span::raw("How it works:"))));
    items.push(ListItem::new(Line::from(Span::styled(
        HOW_IT_WORKS_URL,
        Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED),
    ))));

    let sidebar = List::new(items).block(Block::default().borders(Borders::ALL).title(" Debug "));
    frame.render_widget(sidebar, area);
}

fn config_value(value: &str) -> Span<'static> {
    if value.is_empty() {
        Span::styled("Not Set", Style::default().fg(Color::Red))
    } else {
        Span::styled(value.to_string(), Style::default().fg(Color::Green))
    }
}

/// Render the conversation transcript
fn render_chat(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    for turn in app.session.transcript() {
        let (label, color) = match turn.role {
            Role::User => ("You", Color::Cyan),
            Role::Assistant => ("Assistant", Color::Magenta),
        };
        lines.push(Line::from(vec![
            Span::styled(
                label,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", turn.timestamp.format("%H:%M")),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        match turn.role {
            Role::User => {
                for line in turn.content.lines() {
                    lines.push(Line::from(line.to_string()));
                }
            }
            Role::Assistant => lines.extend(markdown_to_lines(&turn.content)),
        }
        lines.push(Line::from(""));
    }

    if app.is_querying {
        lines.push(Line::from(Span::styled(
            "Querying KB...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    // Follow the bottom of the transcript unless the user scrolled up
    let total_lines = lines.len() as u16;
    let viewport = area.height.saturating_sub(2);
    let scroll = total_lines
        .saturating_sub(viewport)
        .saturating_sub(app.scroll_offset);

    let chat = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Conversation "))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(chat, area);
}

/// Render the suggested questions shown before the first dispatch
fn render_presets(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = PRESET_QUESTIONS
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let style = if i == app.selected_preset {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {}. ", i + 1), Style::default().fg(Color::Yellow)),
                Span::styled(*question, style),
            ]))
        })
        .collect();

    let presets = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Try asking (1-4 or Up/Down, then Enter) "),
    );
    frame.render_widget(presets, area);
}

/// Render the input line
fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let (text, style) = if app.is_querying {
        (
            "Querying KB...".to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )
    } else if app.input.is_empty() {
        (
            "Type your question here...".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (app.input.clone(), Style::default())
    };

    let input = Paragraph::new(Line::from(Span::styled(text, style)))
        .block(Block::default().borders(Borders::ALL).title(" Question "));
    frame.render_widget(input, area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let text = match &app.status_message {
        Some(message) => message.clone(),
        None if app.is_querying => "Querying KB...".to_string(),
        None => "Enter: send | Tab: sidebar | PgUp/PgDn: scroll | Esc: quit".to_string(),
    };

    let status =
        Paragraph::new(Line::from(Span::styled(text, Style::default().fg(Color::DarkGray))));
    frame.render_widget(status, area);
}
