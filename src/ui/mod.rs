use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::host::{Document, ElementKind, Focusable, Modal};

const ACCENT: Color = Color::Rgb(250, 179, 135);
const INACTIVE: Color = Color::Rgb(88, 91, 112);
const SUCCESS: Color = Color::Rgb(166, 218, 149);
const WARNING: Color = Color::Rgb(250, 179, 135);
const DANGER: Color = Color::Rgb(243, 139, 168);
const TEXT: Color = Color::Rgb(205, 214, 244);
const TEXT_DIM: Color = Color::Rgb(147, 153, 178);
const BG_SELECTED: Color = Color::Rgb(69, 71, 90);
const HEADER: Color = Color::Rgb(243, 139, 168);

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Min(4),    // Page body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let document = app.router.document();
    draw_info_line(f, app, chunks[0]);
    draw_page(f, app, document, chunks[1]);
    draw_footer(f, app, chunks[2]);

    // Draw modals on top
    match document.modal() {
        None => {}
        Some(Modal::Alert(message)) => draw_alert_popup(f, message),
        Some(Modal::Confirm(message)) => draw_confirm_popup(f, message),
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    // Priority: status message (errors) > page summary
    let line = if let Some(ref status) = app.status_message {
        Line::from(vec![Span::styled(status, Style::default().fg(WARNING))])
    } else {
        let document = app.router.document();
        Line::from(vec![
            Span::styled(app.router.current_page(), Style::default().fg(TEXT_DIM)),
            Span::styled(" │ ", Style::default().fg(TEXT_DIM)),
            Span::styled(
                format!("scale {:.2}x", document.root_font_scale()),
                Style::default().fg(TEXT_DIM),
            ),
        ])
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

/// Render every visible element; returns the lines and the focused line index
fn page_lines<'a>(document: &'a Document, focused: Option<&Focusable>) -> (Vec<Line<'a>>, usize) {
    let mut lines = Vec::new();
    let mut focus_line = 0;

    let selected = Style::default().bg(BG_SELECTED).fg(TEXT).add_modifier(Modifier::BOLD);
    let is_focused = |id: &str| matches!(focused, Some(Focusable::Element(f)) if f == id);

    for element in document.elements() {
        if !document.is_visible(&element.id) {
            continue;
        }
        let indent = if element.parent.is_some() { "    " } else { "  " };
        let label = Span::styled(format!("{}{}: ", indent, element.label), Style::default().fg(HEADER));

        if is_focused(&element.id) {
            focus_line = lines.len();
        }

        match &element.kind {
            ElementKind::Text(content) => {
                let mut content_lines = content.lines();
                let first = content_lines.next().unwrap_or("");
                lines.push(Line::from(vec![
                    label,
                    Span::styled(first, Style::default().fg(TEXT)),
                ]));
                for rest in content_lines {
                    lines.push(Line::from(Span::styled(
                        format!("{}  {}", indent, rest),
                        Style::default().fg(TEXT),
                    )));
                }
            }
            ElementKind::Field { value, secret } => {
                let shown = if *secret { "*".repeat(value.chars().count()) } else { value.clone() };
                let style = if is_focused(&element.id) { selected } else { Style::default().fg(TEXT) };
                let cursor = if is_focused(&element.id) { "▏" } else { "" };
                lines.push(Line::from(vec![
                    label,
                    Span::styled(format!("[{}{}]", shown, cursor), style),
                ]));
            }
            ElementKind::Select { options, selected: value } => {
                let current = value
                    .as_deref()
                    .and_then(|v| options.iter().find(|o| o.id == v))
                    .map(|o| o.label.as_str())
                    .unwrap_or("-");
                let style = if is_focused(&element.id) { selected } else { Style::default().fg(TEXT) };
                lines.push(Line::from(vec![
                    label,
                    Span::styled(format!("◀ {} ▶", current), style),
                ]));
            }
            ElementKind::Button => {
                let style = if is_focused(&element.id) {
                    selected
                } else {
                    Style::default().fg(ACCENT)
                };
                lines.push(Line::from(Span::styled(
                    format!("{}[ {} ]", indent, element.label),
                    style,
                )));
            }
            ElementKind::Container(controls) => {
                lines.push(Line::from(Span::styled(
                    format!("{}{}", indent, element.label),
                    Style::default().fg(HEADER).add_modifier(Modifier::BOLD),
                )));
                if controls.is_empty() {
                    lines.push(Line::from(Span::styled(
                        format!("{}  (none)", indent),
                        Style::default().fg(TEXT_DIM),
                    )));
                }
                for control in controls {
                    let focused_here = focused == Some(&Focusable::Control(control.id));
                    if focused_here {
                        focus_line = lines.len();
                    }
                    let style = if focused_here { selected } else { Style::default().fg(TEXT) };
                    lines.push(Line::from(Span::styled(
                        format!("{}  ▸ {}", indent, control.label),
                        style,
                    )));
                }
            }
            ElementKind::Region => {
                lines.push(Line::from(Span::styled(
                    format!("{}{}", indent, element.label),
                    Style::default().fg(TEXT_DIM).add_modifier(Modifier::ITALIC),
                )));
            }
        }
    }

    (lines, focus_line)
}

fn draw_page(f: &mut Frame, app: &App, document: &Document, area: Rect) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", document.title),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let focused = app.focused();
    let (lines, focus_line) = page_lines(document, focused.as_ref());

    // Keep the focused line in view
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = focus_line.saturating_sub(inner_height.saturating_sub(1));

    let content = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0))
        .wrap(Wrap { trim: false });

    f.render_widget(content, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<(&str, &str)> = match app.router.document().modal() {
        Some(Modal::Confirm(_)) => vec![("y", "Yes"), ("n", "No")],
        Some(Modal::Alert(_)) => vec![("Enter", "OK")],
        None => vec![
            ("↑↓", "Nav"),
            ("Enter", "Select"),
            ("←→", "Change"),
            ("Esc", "Home"),
            ("q", "Quit"),
        ],
    };

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 3 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(ACCENT)),
                Span::styled(format!(" {} │ ", action), Style::default().fg(TEXT_DIM)),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);

    f.render_widget(footer, area);
}

fn draw_alert_popup(f: &mut Frame, message: &str) {
    let popup_area = centered_rect(50, 25, f.area());

    f.render_widget(Clear, popup_area);

    let alert = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(TEXT))),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled(" OK", Style::default().fg(TEXT_DIM)),
        ]),
    ])
    .block(
        Block::default()
            .title(Span::styled(" Notice ", Style::default().fg(WARNING)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(WARNING)),
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    f.render_widget(alert, popup_area);
}

fn draw_confirm_popup(f: &mut Frame, message: &str) {
    let popup_area = centered_rect(40, 20, f.area());

    f.render_widget(Clear, popup_area);

    let confirm = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(WARNING))),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y", Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD)),
            Span::raw(" Yes   "),
            Span::styled("n", Style::default().fg(DANGER).add_modifier(Modifier::BOLD)),
            Span::raw(" No"),
        ]),
    ])
    .block(
        Block::default()
            .title(Span::styled(" Confirm ", Style::default().fg(WARNING)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(WARNING)),
    )
    .alignment(Alignment::Center);

    f.render_widget(confirm, popup_area);
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
