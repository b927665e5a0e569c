use chrono::{Local, NaiveDate, NaiveDateTime};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};
use tunna_core::model::AreaSchedule;

use crate::app::{App, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    // Title / header
    let header = Paragraph::new("tunna – waste collection lookup")
        .block(Block::default().borders(Borders::ALL).title("Tunna"));
    frame.render_widget(header, *header_area);

    // Main screen
    match app.screen {
        Screen::AddressSearch => draw_address_search(frame, app, *content_area),
        Screen::ScheduleView => draw_schedule_view(frame, app, *content_area),
    }

    // Status bar
    let nav_hint = match app.screen {
        Screen::AddressSearch => {
            "Type to search · ↑/↓ move · Tab/→ accept suggestion · Enter look up · Esc clear/quit"
        }
        Screen::ScheduleView => "Esc/←/b back to search · q quit",
    };

    let status_text = if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_address_search(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // input
            Constraint::Min(0),    // suggestions
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [input_area, suggestion_area] = chunks else {
        return;
    };

    let input = Paragraph::new(app.address_input.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Address (street + house number)"),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(input, *input_area);

    let items = if app.suggestions.is_empty() {
        vec![ListItem::new(if app.address_input.trim().is_empty() {
            "Start typing a street name."
        } else {
            "No matching addresses."
        })]
    } else {
        app.suggestions
            .iter()
            .map(|suggestion| {
                let extra = suggestion
                    .info
                    .as_ref()
                    .filter(|info| !info.postal_code.is_empty())
                    .map(|info| format!("  ({})", info.postal_code))
                    .unwrap_or_default();
                ListItem::new(format!("{}{extra}", suggestion.label))
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Suggestions (↑/↓, Tab/→ to accept)"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.suggestions.is_empty() {
        state.select(Some(app.suggestion_index));
    }
    frame.render_stateful_widget(list, *suggestion_area, &mut state);
}

fn draw_schedule_view(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(information) = app.information.as_ref() else {
        let paragraph = Paragraph::new("Nothing looked up yet.")
            .block(Block::default().borders(Borders::ALL).title("Schedule"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let area_label = match (information.area.as_deref(), information.area_name.as_deref()) {
        (Some(code), Some(name)) => format!("{name} ({code})"),
        (Some(code), None) => code.to_owned(),
        _ => "unknown area".to_owned(),
    };
    let title = format!(
        "{} – {area_label} (Esc/←/b to go back)",
        information.address
    );

    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(50),
            Constraint::Min(0),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [title_area, grey_area, blue_area] = chunks else {
        return;
    };

    let heading = Paragraph::new(title)
        .block(Block::default().borders(Borders::ALL).title("Address"))
        .wrap(Wrap { trim: true });
    frame.render_widget(heading, *title_area);

    draw_stream_table(
        frame,
        *grey_area,
        "Grey bin (general waste)",
        &information.grey_schedule_list,
        Color::Gray,
    );
    draw_stream_table(
        frame,
        *blue_area,
        "Blue bin (recycling)",
        &information.blue_schedule_list,
        Color::Blue,
    );
}

fn draw_stream_table(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    schedules: &[AreaSchedule],
    color: Color,
) {
    if schedules.is_empty() {
        let paragraph = Paragraph::new("No upcoming collection windows.")
            .block(Block::default().borders(Borders::ALL).title(title.to_owned()))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let today = Local::now().date_naive();

    let rows = schedules.iter().map(|schedule| {
        let from = format_date(schedule.start_date);
        let to = schedule
            .end_date
            .map_or_else(|| "open-ended".to_owned(), format_date);
        let relative = relative_day_label(schedule.start_date.date(), today);

        Row::new(vec![Cell::from(from), Cell::from(to), Cell::from(relative)])
            .style(Style::default().fg(color))
    });

    let column_widths = [
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Min(12),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["From", "To", "Starts"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(title.to_owned()))
        .column_spacing(1);

    frame.render_widget(table, area);
}

fn format_date(moment: NaiveDateTime) -> String {
    moment.format("%d.%m.%Y").to_string()
}

fn relative_day_label(date: NaiveDate, today: NaiveDate) -> String {
    let delta = (date - today).num_days();
    match delta {
        0 => "today".to_owned(),
        1 => "tomorrow".to_owned(),
        days if days > 1 => format!("in {days} days"),
        -1 => "yesterday".to_owned(),
        days => format!("{} days ago", days.abs()),
    }
}
