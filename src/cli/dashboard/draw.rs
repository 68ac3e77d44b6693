use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, FormField, NewBatchModal, View};
use super::pod_view;
use crate::batch::card::progress_bar;
use crate::batch::{CardBody, CardView, Emphasis};
use crate::summary::{greeting, stat_cards, StatCard};

const CARD_HEIGHT: u16 = 10;
const CARDS_PER_ROW: usize = 4;

pub(crate) fn emphasis_color(emphasis: Emphasis) -> Color {
    let (r, g, b) = emphasis.accent_rgb();
    Color::Rgb(r, g, b)
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(2), // brand header
        Constraint::Length(4), // greeting
        Constraint::Min(8),    // body
        Constraint::Length(2), // bottom nav
    ])
    .split(area);

    draw_header(frame, chunks[0], app);
    draw_greeting(frame, chunks[1], app);
    match app.view() {
        View::Cards => draw_cards_view(frame, chunks[2], app),
        View::Pod => pod_view::draw_pod_view(frame, chunks[2], app),
    }
    draw_bottom_nav(frame, chunks[3], app);

    if let Some(modal) = app.modal() {
        draw_modal(frame, area, modal);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::horizontal([Constraint::Min(10), Constraint::Length(30)]).split(area);

    let brand = Paragraph::new(Line::from(vec![
        Span::styled(" ❦ ", Style::default().fg(Color::Green)),
        Span::styled("Invisi", bold()),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(brand, cols[0]);

    let profile = Paragraph::new(Line::from(vec![
        Span::styled(app.farmer_name().to_string(), bold()),
        Span::styled("  Farmer ", dim()),
    ]))
    .alignment(Alignment::Right)
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(profile, cols[1]);
}

fn draw_greeting(frame: &mut Frame, area: Rect, app: &App) {
    let greeting = greeting(app.farmer_name(), app.time());
    let cols = Layout::horizontal([Constraint::Min(20), Constraint::Length(24)]).split(area);

    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", greeting.salutation),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(format!(" {}", greeting.headline), bold())),
        Line::from(Span::styled(format!(" {}", greeting.subline), dim())),
    ];
    frame.render_widget(Paragraph::new(lines), cols[0]);

    let button = Paragraph::new(Line::from(Span::styled(
        " + Add New Batch [n] ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(button, cols[1]);
}

fn draw_cards_view(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(5), // stats
        Constraint::Length(2), // section title + tabs
        Constraint::Min(CARD_HEIGHT),
    ])
    .split(area);

    draw_stats(frame, chunks[0], app);
    draw_tabs(frame, chunks[1], app);
    draw_card_grid(frame, chunks[2], app);
}

fn draw_stats(frame: &mut Frame, area: Rect, app: &App) {
    let cards = stat_cards(app.collection(), app.summary());
    let cols = Layout::horizontal(
        cards
            .iter()
            .map(|_| Constraint::Ratio(1, cards.len() as u32))
            .collect::<Vec<_>>(),
    )
    .split(area);

    for (card, col) in cards.iter().zip(cols.iter()) {
        draw_stat_card(frame, *col, card);
    }
}

fn draw_stat_card(frame: &mut Frame, area: Rect, card: &StatCard) {
    let mut value_line = vec![Span::styled(card.value.clone(), bold())];
    if let Some(trend) = &card.trend {
        let color = if trend.positive { Color::Green } else { Color::Red };
        value_line.push(Span::raw("  "));
        value_line.push(Span::styled(trend.badge(), Style::default().fg(color)));
    }

    let lines = vec![
        Line::from(Span::styled(card.label, dim())),
        Line::from(value_line),
        Line::from(Span::styled(card.subtext, dim())),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::horizontal([Constraint::Length(16), Constraint::Min(10)]).split(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(" Batch Status", bold()))),
        cols[0],
    );

    let titles: Vec<Line> = app
        .tabs()
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.tab_index())
        .style(dim())
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, cols[1]);
}

fn draw_card_grid(frame: &mut Frame, area: Rect, app: &App) {
    let visible = app.visible();
    // One extra slot for the "Start New Batch" placeholder card.
    let slots = visible.len() + 1;
    let rows = slots.div_ceil(CARDS_PER_ROW);
    let fitting_rows = (area.height / CARD_HEIGHT).max(1) as usize;

    // Scroll so the selected card's row stays on screen.
    let selected_row = app.selected_index() / CARDS_PER_ROW;
    let first_row = selected_row.saturating_sub(fitting_rows - 1);

    let row_areas = Layout::vertical(
        (0..fitting_rows)
            .map(|_| Constraint::Length(CARD_HEIGHT))
            .collect::<Vec<_>>(),
    )
    .split(area);

    for (row_offset, row_area) in row_areas.iter().enumerate() {
        let row = first_row + row_offset;
        if row >= rows {
            break;
        }
        let cols = Layout::horizontal(
            (0..CARDS_PER_ROW)
                .map(|_| Constraint::Ratio(1, CARDS_PER_ROW as u32))
                .collect::<Vec<_>>(),
        )
        .split(*row_area);

        for (col, cell) in cols.iter().enumerate() {
            let index = row * CARDS_PER_ROW + col;
            if index < visible.len() {
                let card = CardView::from_batch(visible[index]);
                draw_batch_card(frame, *cell, &card, index == app.selected_index());
            } else if index == visible.len() {
                draw_new_batch_card(frame, *cell);
            }
        }
    }
}

fn draw_batch_card(frame: &mut Frame, area: Rect, card: &CardView, selected: bool) {
    let accent = emphasis_color(card.status.emphasis);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {} ", card.status.label),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(card.title.clone(), bold())),
        Line::from(Span::styled(card.date_line.clone(), dim())),
    ];

    match &card.intake_line {
        Some(intake) => lines.push(Line::from(Span::styled(intake.clone(), dim()))),
        None => lines.push(Line::default()),
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    match &card.body {
        CardBody::Progress {
            label, sub_label, progress, ..
        } => {
            let value = card.metric_line().unwrap_or_default();
            lines.push(spread_line(label, &value, inner_width));
            let bar_width = inner_width.saturating_sub(2).max(1);
            lines.push(Line::from(Span::styled(
                progress_bar(*progress, bar_width),
                Style::default().fg(accent),
            )));
            if let Some(sub) = sub_label {
                lines.push(Line::from(Span::styled(format!("· {}", sub), dim())));
            }
        }
        CardBody::Terminal {
            total_weight,
            action,
        } => {
            lines.push(spread_line("Total Weight", total_weight, inner_width));
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("[ {} ]", action),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )));
        }
    }

    let border_style = if selected {
        Style::default().fg(accent)
    } else {
        dim()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(border_style);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// `label` left, `value` right-aligned within `width`.
fn spread_line<'a>(label: &str, value: &str, width: usize) -> Line<'a> {
    let used = label.chars().count() + value.chars().count();
    let gap = width.saturating_sub(used).max(1);
    Line::from(vec![
        Span::styled(label.to_string(), bold()),
        Span::raw(" ".repeat(gap)),
        Span::styled(value.to_string(), dim()),
    ])
}

fn draw_new_batch_card(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::default(),
        Line::default(),
        Line::from(Span::styled("+", bold())),
        Line::from(Span::styled("Start New Batch", bold())),
        Line::from(Span::styled("press n", dim())),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(dim());
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}

fn draw_bottom_nav(frame: &mut Frame, area: Rect, app: &App) {
    let active = Style::default()
        .fg(Color::Black)
        .bg(Color::Green)
        .add_modifier(Modifier::BOLD);

    let (home, monitor) = match app.view() {
        View::Cards => (active, dim()),
        View::Pod => (dim(), active),
    };

    let mut spans = vec![
        Span::styled(" Home ", home),
        Span::raw(" "),
        Span::styled(" Monitor ", monitor),
        Span::raw(" "),
        Span::styled(" Market ", dim()),
        Span::raw(" "),
        Span::styled(" Profile ", dim()),
        Span::raw("   "),
    ];

    let help = "←/→ tabs  ↑/↓ select  n new  p pod  q quit";
    match app.notice() {
        Some(notice) => spans.push(Span::styled(notice.to_string(), Style::default().fg(Color::Green))),
        None => spans.push(Span::styled(help, dim())),
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(paragraph, area);
}

/// Centred rectangle of at most `width × height` inside `area`.
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

fn draw_modal(frame: &mut Frame, area: Rect, modal: &NewBatchModal) {
    let error_lines = modal.errors.as_ref().map_or(0, |e| e.errors().len() as u16);
    let popup = centered(area, 56, 17 + error_lines);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(" New Batch ", bold()))
        .title_bottom(Line::from(Span::styled(" Kickoff fermentation ", dim())));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::vertical([
        Constraint::Length(3),            // weight
        Constraint::Length(3),            // variety + date
        Constraint::Length(3),            // notes
        Constraint::Length(error_lines),  // errors
        Constraint::Min(1),               // help
    ])
    .split(inner);

    draw_text_input(
        frame,
        chunks[0],
        "Total Weight (kg)",
        modal.weight.text(),
        modal.weight.cursor_column(),
        modal.focus == FormField::Weight,
        field_has_error(modal, FormField::Weight),
    );

    let row = Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).split(chunks[1]);
    draw_variety_select(frame, row[0], modal);
    draw_text_input(
        frame,
        row[1],
        "Start Date",
        modal.date.text(),
        modal.date.cursor_column(),
        modal.focus == FormField::Date,
        field_has_error(modal, FormField::Date),
    );

    draw_text_input(
        frame,
        chunks[2],
        "Notes (Optional)",
        modal.notes.text(),
        modal.notes.cursor_column(),
        modal.focus == FormField::Notes,
        false,
    );

    if let Some(errors) = &modal.errors {
        let lines: Vec<Line> = errors
            .errors()
            .iter()
            .map(|e| Line::from(Span::styled(format!(" {}", e), Style::default().fg(Color::Red))))
            .collect();
        frame.render_widget(Paragraph::new(lines), chunks[3]);
    }

    let help = Paragraph::new(Line::from(Span::styled(
        "Tab: next field  Enter: Start Fermentation  Esc: cancel",
        dim(),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn field_has_error(modal: &NewBatchModal, field: FormField) -> bool {
    modal
        .errors
        .as_ref()
        .is_some_and(|e| e.has_field(field.key()))
}

fn input_style(focused: bool, error: bool) -> Style {
    if error {
        Style::default().fg(Color::Red)
    } else if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn draw_text_input(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    text: &str,
    cursor_column: usize,
    focused: bool,
    error: bool,
) {
    let style = input_style(focused, error);
    let paragraph = Paragraph::new(Line::from(Span::raw(format!(" {}", text)))).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(title.to_string()),
    );
    frame.render_widget(paragraph, area);

    if focused {
        let cursor_x = area.x + 2 + cursor_column as u16;
        let cursor_y = area.y + 1;
        if cursor_x < area.x + area.width.saturating_sub(1) {
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

fn draw_variety_select(frame: &mut Frame, area: Rect, modal: &NewBatchModal) {
    let focused = modal.focus == FormField::Variety;
    let style = input_style(focused, field_has_error(modal, FormField::Variety));
    let text = if focused {
        format!(" ‹ {} ›", modal.variety)
    } else {
        format!(" {}", modal.variety)
    };
    let paragraph = Paragraph::new(Line::from(Span::raw(text))).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title("Variety"),
    );
    frame.render_widget(paragraph, area);
}
