//! Terminal setup and dashboard rendering.

use super::app::{DashboardApp, NoteScope};
use super::events::{handle_key_event, handle_mouse_event, Event, EventHandler};
use super::state::ListNavigation;
use super::theme::{
    colors, current_theme_name, filter_badge, render_footer_hints, status_badge, FooterHints,
    Styles,
};
use super::widgets::{
    centered_rect, check_terminal_size, render_breakdown, render_kpi_card, render_size_warning,
};
use crate::model::{EoslStatus, InventoryRecord, OsFamily};
use crate::reports::truncate;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
};
use std::io::{self, stdout};

/// Run the dashboard until the operator quits.
pub fn run_tui(app: &mut DashboardApp) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(app.tick_rate_ms);

    // Main loop; errors are held until the terminal is restored
    let result = loop {
        if let Err(e) = terminal.draw(|frame| render(frame, app)) {
            break Err(e);
        }

        match events.next() {
            Ok(Event::Key(key)) => handle_key_event(app, key),
            Ok(Event::Mouse(mouse)) => handle_mouse_event(app, mouse),
            Ok(Event::Resize(_, _) | Event::Tick) => {}
            Err(e) => break Err(e),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Main render function
pub fn render(frame: &mut Frame, app: &mut DashboardApp) {
    let area = frame.area();

    if check_terminal_size(area.width, area.height).is_err() {
        render_size_warning(frame, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // KPI cards
            Constraint::Length(1), // Filters
            Constraint::Min(8),    // Table + side panel
            Constraint::Length(1), // Status
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_kpis(frame, chunks[1], app);
    render_filters(frame, chunks[2], app);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[3]);
    render_table(frame, main[0], app);
    render_side_panel(frame, main[1], app);

    render_status(frame, chunks[4], app);
    render_footer(frame, chunks[5], app);

    if app.overlays.search.active {
        render_search_overlay(frame, area, app);
    }
    if app.overlays.note.active {
        render_note_overlay(frame, area, app);
    }
    if app.overlays.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let snapshot = &app.snapshot;
    let line = Line::from(vec![
        Span::styled(" EOSL Inventory ", Styles::header_title()),
        Span::styled(format!(" {} ", snapshot.source), Styles::text_muted()),
        Span::styled(
            format!(
                " today {} · nearing ≤ {} days · theme {} ",
                snapshot.today,
                snapshot.nearing_days,
                current_theme_name()
            ),
            Styles::text_muted(),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_kpis(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let scheme = colors();
    let kpis = &app.snapshot.kpis;
    let cards = [
        ("Total", kpis.total.to_string(), scheme.primary),
        ("Expired", kpis.expired.to_string(), scheme.expired),
        ("Nearing", kpis.nearing.to_string(), scheme.nearing),
        ("Supported", kpis.supported.to_string(), scheme.supported),
        ("Unknown", kpis.unknown.to_string(), scheme.unknown),
        ("No FW/MC", kpis.missing_firmware.to_string(), scheme.warning),
        ("% Expired", format!("{:.1}%", kpis.pct_expired), scheme.expired),
    ];

    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(area);

    for ((label, value, color), slot) in cards.iter().zip(slots.iter()) {
        render_kpi_card(frame, *slot, label, value, *color);
    }
}

fn render_filters(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let criteria = &app.snapshot.criteria;
    let mut spans = vec![Span::raw(" ")];

    let status = criteria.status.map_or("all", |s| s.label());
    spans.extend(filter_badge("Status", status));
    spans.push(Span::raw("  "));

    let vendor = if criteria.vendors.is_empty() {
        "all".to_string()
    } else {
        criteria.vendors.join(",")
    };
    spans.extend(filter_badge("Vendor", &vendor));
    spans.push(Span::raw("  "));

    let environment = if criteria.environments.is_empty() {
        "all".to_string()
    } else {
        criteria.environments.join(",")
    };
    spans.extend(filter_badge("Env", &environment));
    spans.push(Span::raw("  "));

    let os = if criteria.os_families.is_empty() {
        "all".to_string()
    } else {
        criteria
            .os_families
            .iter()
            .map(OsFamily::label)
            .collect::<Vec<_>>()
            .join(",")
    };
    spans.extend(filter_badge("OS", &os));

    if let Some(owner) = criteria.owner.as_deref() {
        spans.push(Span::raw("  "));
        spans.extend(filter_badge("Owner", owner));
    }
    if criteria.missing_firmware_only {
        spans.push(Span::raw("  "));
        spans.extend(filter_badge("FW", "missing"));
    }

    spans.push(Span::styled(
        format!(
            "  {} of {} rows",
            app.snapshot.visible_count(),
            app.snapshot.records.len()
        ),
        Styles::text_muted(),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let scheme = colors();
    let today = app.snapshot.today;

    let header = Row::new(vec![
        "Status", "Hostname", "Vendor/Model", "OS", "Env", "Owner", "EOSL", "Days", "FW/MC",
    ])
    .style(Style::default().fg(scheme.accent).bold())
    .height(1);

    let rows: Vec<Row> = app
        .snapshot
        .filtered()
        .map(|record| table_row(record, today))
        .collect();

    let widths = [
        Constraint::Length(13),
        Constraint::Min(10),
        Constraint::Min(12),
        Constraint::Min(10),
        Constraint::Length(6),
        Constraint::Min(8),
        Constraint::Length(10),
        Constraint::Length(6),
        Constraint::Length(6),
    ];

    let title = format!(" Servers ({}) ", app.snapshot.visible_count());
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Styles::border_focused()),
        )
        .row_highlight_style(Styles::selected())
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    if app.table.total > 0 {
        state.select(Some(app.table.selected()));
    }
    frame.render_stateful_widget(table, area, &mut state);

    if app.table.total == 0 {
        let inner = Rect {
            x: area.x + 2,
            y: area.y + 2,
            width: area.width.saturating_sub(4),
            height: 1,
        };
        frame.render_widget(
            Paragraph::new("No servers match the current filters").style(Styles::text_muted()),
            inner,
        );
    }
}

fn table_row(record: &InventoryRecord, today: chrono::NaiveDate) -> Row<'static> {
    let scheme = colors();
    let days = record
        .days_until_eosl(today)
        .map_or_else(|| "-".to_string(), |d| d.to_string());
    let fw_style = if record.firmware.is_incomplete() {
        Style::default().fg(scheme.warning)
    } else {
        Style::default().fg(scheme.text_muted)
    };
    let fw = if record.firmware.is_incomplete() { "!" } else { "ok" };
    let eosl = if record.eosl_date_raw.is_empty() {
        "-".to_string()
    } else {
        record
            .eosl_date
            .map_or_else(|| record.eosl_date_raw.clone(), |d| d.to_string())
    };

    Row::new(vec![
        Cell::from(status_badge(record.status)),
        Cell::from(record.hostname.clone()).style(Style::default().fg(scheme.text).bold()),
        Cell::from(record.vendor_model()),
        Cell::from(record.os_display()),
        Cell::from(record.environment.clone()),
        Cell::from(record.owner.clone()),
        Cell::from(eosl),
        Cell::from(days).style(Style::default().fg(scheme.status_color(record.status))),
        Cell::from(fw).style(fw_style),
    ])
}

fn render_side_panel(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(30),
            Constraint::Percentage(25),
        ])
        .split(area);

    render_detail(frame, chunks[0], app);
    render_breakdown(frame, chunks[1], &app.current_breakdown(), false);
    render_activity(frame, chunks[2], app);
}

fn detail_line(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), Styles::label()),
        Span::styled(value.into(), Styles::value()),
    ])
}

fn render_detail(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Styles::border());

    let Some(record) = app.selected_record() else {
        frame.render_widget(
            Paragraph::new("No row selected")
                .style(Styles::text_muted())
                .block(block),
            area,
        );
        return;
    };

    let today = app.snapshot.today;
    let eosl = match record.days_until_eosl(today) {
        Some(days) if days < 0 => format!("{} ({} days ago)", record.eosl_date_raw, -days),
        Some(days) => format!("{} (in {} days)", record.eosl_date_raw, days),
        None if record.eosl_date_raw.is_empty() => "-".to_string(),
        None => format!("{} (unparsed)", record.eosl_date_raw),
    };
    let firmware_style = if record.firmware.is_incomplete() {
        Styles::warning()
    } else {
        Styles::success()
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(record.hostname.clone(), Styles::header_title()),
            Span::raw(" "),
            status_badge(record.status),
        ]),
        detail_line("Asset", record.asset_tag.clone()),
        detail_line("Hardware", record.vendor_model()),
        detail_line("Serial", record.serial.clone()),
        detail_line("OS", record.os_display()),
        detail_line("Env", record.environment.clone()),
        detail_line("Location", record.location.clone()),
        detail_line("Owner", record.owner_team()),
        detail_line("Email", record.owner_email.clone()),
        detail_line("EOSL", eosl),
        detail_line("Firmware", record.firmware_display().to_string()),
        detail_line("Microcode", record.microcode_display().to_string()),
        Line::from(vec![
            Span::styled(format!("{:<10}", ""), Styles::label()),
            Span::styled(record.firmware.describe(), firmware_style),
        ]),
        detail_line("Audit", record.last_audit.clone()),
        detail_line("Notes", record.notes.clone()),
    ];

    let last = app.selected_last_action.as_ref().map_or_else(
        || "never".to_string(),
        |e| format!("{} {} by {}", e.action, e.timestamp.format("%Y-%m-%d %H:%M"), e.actor),
    );
    lines.push(detail_line("Last", last));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_activity(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let width = area.width.saturating_sub(4) as usize;
    let lines: Vec<Line> = if app.recent_log.is_empty() {
        vec![Line::styled("No actions recorded", Styles::text_muted())]
    } else {
        app.recent_log
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        entry.timestamp.format("%m-%d %H:%M ").to_string(),
                        Styles::text_muted(),
                    ),
                    Span::styled(
                        truncate(&format!("{} {}", entry.hostname, entry.action), width),
                        Styles::value(),
                    ),
                ])
            })
            .collect()
    };

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Recent actions ")
                .borders(Borders::ALL)
                .border_style(Styles::border()),
        ),
        area,
    );
}

fn render_status(frame: &mut Frame, area: Rect, app: &mut DashboardApp) {
    let is_error = app.status.is_error();
    let Some(message) = app.status.message() else {
        return;
    };
    let style = if is_error {
        Styles::error()
    } else {
        Styles::success()
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {message}"), style))),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let hints = if app.overlays.search.active {
        FooterHints::search()
    } else if app.overlays.note.active {
        FooterHints::note()
    } else {
        FooterHints::table()
    };
    let mut spans = vec![Span::raw(" ")];
    spans.extend(render_footer_hints(&hints));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_search_overlay(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let popup = centered_rect(50, 20, area);
    let popup = Rect {
        height: popup.height.max(3),
        ..popup
    };
    frame.render_widget(Clear, popup);
    let text = Line::from(vec![
        Span::styled("Owner or team: ", Styles::label()),
        Span::styled(app.overlays.search.query.clone(), Styles::value()),
        Span::styled("█", Style::default().fg(colors().accent)),
    ]);
    frame.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .title(" Search ")
                .borders(Borders::ALL)
                .border_style(Styles::border_focused()),
        ),
        popup,
    );
}

fn render_note_overlay(frame: &mut Frame, area: Rect, app: &DashboardApp) {
    let popup = centered_rect(60, 20, area);
    let popup = Rect {
        height: popup.height.max(4),
        ..popup
    };
    frame.render_widget(Clear, popup);

    let target = match app.overlays.note.scope {
        NoteScope::Selected => app
            .selected_record()
            .map_or_else(String::new, |r| r.hostname.clone()),
        NoteScope::Visible => format!("{} visible row(s)", app.snapshot.visible_count()),
    };
    let lines = vec![
        Line::from(Span::styled(
            format!("Mark {target} intimated. Leave blank for the default note."),
            Styles::text_muted(),
        )),
        Line::from(vec![
            Span::styled("Note: ", Styles::label()),
            Span::styled(app.overlays.note.input.clone(), Styles::value()),
            Span::styled("█", Style::default().fg(colors().accent)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Intimate ")
                .borders(Borders::ALL)
                .border_style(Styles::border_focused()),
        ),
        popup,
    );
}

const HELP_KEYS: &[(&str, &str)] = &[
    ("↑↓ j k", "Move selection"),
    ("PgUp PgDn g G", "Page / first / last row"),
    ("f", "Cycle status filter"),
    ("v n o", "Cycle vendor / environment / OS filter"),
    ("m", "Only rows missing firmware or microcode"),
    ("/", "Filter by owner or team"),
    ("x", "Clear all filters"),
    ("+ -", "Widen / narrow the nearing window"),
    ("i", "Mark selected server intimated (prompts for a note)"),
    ("I", "Mark every visible server intimated (prompts for a note)"),
    ("c", "Copy owner mail link"),
    ("y", "Copy hostname"),
    ("t e C", "Export tickets / inventory / contacts"),
    ("r", "Reload inventory file"),
    ("b", "Cycle breakdown chart"),
    ("T", "Switch theme"),
    ("q Esc", "Quit"),
];

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup);

    let mut lines = vec![Line::from("")];
    for (key, desc) in HELP_KEYS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<15}"), Styles::shortcut_key()),
            Span::styled((*desc).to_string(), Styles::shortcut_desc()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("  Status: "),
        status_badge(EoslStatus::Expired),
        Span::raw(" "),
        status_badge(EoslStatus::Nearing),
        Span::raw(" "),
        status_badge(EoslStatus::Supported),
        Span::raw(" "),
        status_badge(EoslStatus::Unknown),
    ]));

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Keys ")
                .borders(Borders::ALL)
                .border_style(Styles::border_focused()),
        ),
        popup,
    );
}
