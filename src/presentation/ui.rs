use crate::application::{App, AppMode, LoginField, NoticeKind};
use crate::domain::{
    ApplicationRecord, EventDraft, FieldId, FOCUS_AREA_OPTIONS, Page, preview, step_fields, step_title,
};
use chrono::Datelike;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.page {
        Page::Landing => render_landing(f, app, chunks[1]),
        Page::Login => render_login(f, app, chunks[1]),
        Page::Apply => render_wizard(f, app, chunks[1]),
        Page::Opportunities => render_opportunities(f, app, chunks[1]),
        Page::Events => render_events(f, app, chunks[1]),
        Page::AdminDashboard => render_admin_dashboard(f, app, chunks[1]),
        Page::MemberDashboard | Page::Profile => render_member_dashboard(f, app, chunks[1]),
        Page::ApplicationStatus => render_application_status(f, app, chunks[1]),
        Page::Resources => render_resources(f, app, chunks[1]),
        Page::About => render_about(f, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    match app.mode {
        AppMode::Help => render_help_popup(f, app.help_scroll),
        AppMode::ApplicationDetail => render_detail_popup(f, app),
        AppMode::EventForm => render_event_form_popup(f, app),
        _ => {}
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let who = match &app.session {
        Some(user) => format!("{} ({})", user.name, user.role),
        None => "Guest".to_string(),
    };
    let header = Paragraph::new(format!("YAN Portal | {} | {}", app.page.title(), who))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn titled(title: impl Into<String>) -> Block<'static> {
    Block::default().borders(Borders::ALL).title(title.into())
}

fn render_landing(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let intro = Paragraph::new(
        "Welcome to the Youth Advocacy Network.\n\
         Press 2 to apply for membership, l to log in, ? for help.",
    )
    .block(titled("Youth Advocacy Network"))
    .wrap(Wrap { trim: true });
    f.render_widget(intro, rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let opportunities: Vec<ListItem> = preview(&app.data.opportunities)
        .iter()
        .map(|opp| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("[{}] ", opp.category), Style::default().fg(Color::Magenta)),
                    Span::styled(opp.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                ]),
                Line::from(opp.description.clone()),
            ])
        })
        .collect();
    f.render_widget(List::new(opportunities).block(titled("Latest Opportunities")), cols[0]);

    let events: Vec<ListItem> = preview(&app.data.events)
        .iter()
        .map(|event| {
            ListItem::new(vec![
                Line::from(Span::styled(event.title.clone(), Style::default().add_modifier(Modifier::BOLD))),
                Line::from(format!("{} | {}", event.date.format("%b %-d, %Y"), event.location)),
            ])
        })
        .collect();
    f.render_widget(List::new(events).block(titled("Upcoming Events")), cols[1]);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Black).bg(Color::LightBlue)
    } else {
        Style::default()
    }
}

fn render_login(f: &mut Frame, app: &App, area: Rect) {
    let masked = "*".repeat(app.login.password.chars().count());
    let lines = vec![
        Line::from(vec![
            Span::raw("Email:    "),
            Span::styled(app.login.email.clone(), focus_style(app.login.focus == LoginField::Email)),
        ]),
        Line::from(vec![
            Span::raw("Password: "),
            Span::styled(masked, focus_style(app.login.focus == LoginField::Password)),
        ]),
        Line::from(""),
        Line::from("Demo accounts: admin@yan.org / member@yan.org / applicant@yan.org"),
    ];
    f.render_widget(Paragraph::new(lines).block(titled("Login")), area);
}

fn render_wizard(f: &mut Frame, app: &App, area: Rect) {
    let step = app.wizard.current_step();
    let title = format!(
        "Membership Application - Step {} of {}: {}",
        step,
        app.wizard.total_steps(),
        step_title(step)
    );

    let mut lines = Vec::new();
    if app.wizard.is_final_step() {
        let summary = app
            .review_summary
            .clone()
            .unwrap_or_else(|| app.wizard.review_summary());
        for (label, value) in summary.rows {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<18}", label), Style::default().fg(Color::Yellow)),
                Span::raw(value),
            ]));
        }
        lines.push(Line::from(""));
        let mark = if app.wizard.form().agree_terms { "x" } else { " " };
        lines.push(Line::from(format!("[{}] I agree to the terms and conditions (space to toggle)", mark)));
    } else {
        let focused = app.focused_field();
        for field in step_fields(step) {
            let required = if field.is_required() { "*" } else { " " };
            let label = format!("{:<18}{} ", field.label(), required);
            if *field == FieldId::FocusAreas {
                lines.push(Line::from(label));
                lines.push(render_focus_areas(app, focused == Some(*field)));
            } else {
                lines.push(Line::from(vec![
                    Span::styled(label, Style::default().fg(Color::Yellow)),
                    Span::styled(app.wizard.form().value(*field), focus_style(focused == Some(*field))),
                ]));
            }
        }
    }

    f.render_widget(
        Paragraph::new(lines).block(titled(title)).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_focus_areas(app: &App, focused: bool) -> Line<'static> {
    let spans: Vec<Span> = FOCUS_AREA_OPTIONS
        .iter()
        .enumerate()
        .map(|(i, area)| {
            let mark = if app.wizard.form().has_focus_area(area) { "x" } else { " " };
            let style = focus_style(focused && i == app.focus_area_cursor);
            Span::styled(format!(" [{}] {} ", mark, area), style)
        })
        .collect();
    Line::from(spans)
}

fn render_opportunities(f: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = app
        .visible_opportunities()
        .into_iter()
        .map(|opp| {
            let detail = opp
                .amount
                .clone()
                .or_else(|| opp.kind.clone())
                .unwrap_or_default();
            Row::new(vec![
                Cell::from(opp.title.clone()),
                Cell::from(opp.category.clone()),
                Cell::from(opp.deadline.format("%Y-%m-%d").to_string()),
                Cell::from(detail),
                Cell::from(opp.location.clone()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(35),
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Percentage(20),
            Constraint::Percentage(25),
        ],
    )
    .header(
        Row::new(vec!["Title", "Category", "Deadline", "Details", "Location"])
            .style(Style::default().fg(Color::Yellow)),
    )
    .block(titled(format!("Opportunities (category: {}, c to change)", app.opportunity_category)));
    f.render_widget(table, area);
}

fn render_events(f: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(0)])
        .split(area);

    let event_days = app.calendar.event_days(&app.data.events);
    let mut lines = vec![Line::from("Su Mo Tu We Th Fr Sa").style(Style::default().fg(Color::Yellow))];
    let offset = app
        .calendar
        .first_day()
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0);
    let mut week: Vec<Span> = (0..offset).map(|_| Span::raw("   ")).collect();
    for day in 1..=app.calendar.days_in_month() {
        let style = if event_days.contains(&day) {
            Style::default().fg(Color::Black).bg(Color::Green)
        } else {
            Style::default()
        };
        week.push(Span::styled(format!("{:>2}", day), style));
        week.push(Span::raw(" "));
        if week.len() >= 14 {
            lines.push(Line::from(std::mem::take(&mut week)));
        }
    }
    if !week.is_empty() {
        lines.push(Line::from(week));
    }
    f.render_widget(
        Paragraph::new(lines).block(titled(format!("{} ([ ])", app.calendar.title()))),
        cols[0],
    );

    let items: Vec<ListItem> = app
        .data
        .events
        .iter()
        .map(|event| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    format!("{} {}", event.id, event.title),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!(
                    "{} {} | {}",
                    event.date.format("%Y-%m-%d"),
                    event.time.format("%H:%M"),
                    event.location
                )),
                Line::from(event.description.clone()),
            ])
        })
        .collect();
    f.render_widget(List::new(items).block(titled("Events (n: new event)")), cols[1]);
}

fn render_admin_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(6), Constraint::Length(12)])
        .split(area);

    let metrics = app.metrics();
    let summary = Paragraph::new(format!(
        "Total applications: {}   Pending: {}   Approved members: {}   Active events: {}",
        metrics.total, metrics.pending, metrics.accepted, metrics.active_events
    ))
    .block(titled("Overview"));
    f.render_widget(summary, rows[0]);

    let table_rows: Vec<Row> = app
        .visible_applications()
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let style = if i == app.selected_application {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(record.id.clone()),
                Cell::from(record.full_name()),
                Cell::from(record.org_name.clone()),
                Cell::from(record.country.clone()),
                Cell::from(record.submitted_date.format("%Y-%m-%d").to_string()),
                Cell::from(record.status.as_str().to_uppercase()),
            ])
            .style(style)
        })
        .collect();
    let table = Table::new(
        table_rows,
        [
            Constraint::Length(7),
            Constraint::Percentage(22),
            Constraint::Percentage(30),
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Length(13),
        ],
    )
    .header(
        Row::new(vec!["ID", "Name", "Organization", "Country", "Submitted", "Status"])
            .style(Style::default().fg(Color::Yellow)),
    )
    .block(titled(format!(
        "Applications (filter: {}, f: filter, Enter: view, x: export CSV)",
        app.status_filter
    )));
    f.render_widget(table, rows[1]);

    let entries: Vec<ListItem> = app
        .data
        .audit_log
        .recent(app.audit_preview)
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp.format("%Y-%m-%d %H:%M")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("{:<28}", entry.action), Style::default().fg(Color::Cyan)),
                Span::raw(format!("{} ({})", entry.description, entry.actor)),
            ]))
        })
        .collect();
    let audit = if entries.is_empty() {
        List::new(vec![ListItem::new("No recent activity")])
    } else {
        List::new(entries)
    };
    f.render_widget(audit.block(titled("Recent Activity")), rows[2]);
}

fn render_member_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let Some(user) = &app.session else {
        return;
    };
    let lines = vec![
        Line::from(Span::styled(
            format!("Welcome back, {}!", user.name),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("[{}]", user.initials())),
        Line::from(format!("Name:         {}", user.name)),
        Line::from(format!("Organization: {}", user.organization.as_deref().unwrap_or("-"))),
        Line::from(format!("Country:      {}", user.country.as_deref().unwrap_or("-"))),
        Line::from(format!("Email:        {}", user.email)),
    ];
    f.render_widget(Paragraph::new(lines).block(titled(app.page.title())), area);
}

fn render_application_status(f: &mut Frame, app: &App, area: Rect) {
    let lines = match app.my_application() {
        Some(record) => vec![
            Line::from(Span::styled(
                record.status.label(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(record.status.message()),
            Line::from(""),
            Line::from(format!("Application ID: {}", record.id)),
            Line::from(format!("Submitted:      {}", record.submitted_date.format("%Y-%m-%d"))),
            Line::from(format!("Status:         {}", record.status.as_str().to_uppercase())),
        ],
        None => vec![Line::from("No application is linked to this account.")],
    };
    f.render_widget(
        Paragraph::new(lines).block(titled("Application Status")).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_resources(f: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = app
        .visible_resources()
        .into_iter()
        .map(|resource| {
            Row::new(vec![
                Cell::from(resource.title),
                Cell::from(resource.category),
                Cell::from(resource.description),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Percentage(30), Constraint::Length(10), Constraint::Min(20)],
    )
    .header(
        Row::new(vec!["Title", "Category", "Description"]).style(Style::default().fg(Color::Yellow)),
    )
    .block(titled(format!("Member Resources (category: {}, c to change)", app.resource_category)));
    f.render_widget(table, area);
}

fn render_about(f: &mut Frame, area: Rect) {
    let text = "The Youth Advocacy Network connects youth-led organizations across Africa \
                to share resources, opportunities and advocacy expertise.";
    f.render_widget(
        Paragraph::new(text).block(titled(Page::About.title())).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    if let Some(notice) = &app.notice {
        let color = match notice.kind {
            NoticeKind::Success => Color::Green,
            NoticeKind::Error => Color::Red,
            NoticeKind::Info => Color::Cyan,
        };
        let widget = Paragraph::new(notice.text.clone())
            .block(titled("Status"))
            .style(Style::default().fg(color));
        f.render_widget(widget, area);
        return;
    }

    let hint = match app.mode {
        AppMode::Normal => {
            "1: home | 2: apply | 3: opportunities | 4: events | 5: about | d: dashboard | l: login/logout | ?: help | q: quit"
        }
        AppMode::Login => "Tab: switch field | Enter: log in | Esc: cancel",
        AppMode::Wizard => {
            if app.wizard.is_final_step() {
                "Space: accept terms | Enter: submit | PgUp: back | Esc: leave"
            } else {
                "Tab/↑↓: field | ←→ Space: focus areas | Enter: next step | PgUp: back | Esc: leave"
            }
        }
        AppMode::EventForm => "Tab: next field | Enter: save event | Esc: cancel",
        AppMode::ApplicationDetail => "a: accept | r: reject | u: under review | p: pending | Esc: close",
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help",
    };
    f.render_widget(Paragraph::new(hint).block(titled("Status")), area);
}

fn popup_area(area: Rect) -> Rect {
    Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    }
}

fn render_detail_popup(f: &mut Frame, app: &App) {
    let Some(record) = app.detail_record() else {
        return;
    };
    let area = popup_area(f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(detail_lines(record))
            .block(titled(format!("Application {}", record.id)).style(Style::default().fg(Color::White)))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn detail_lines(record: &ApplicationRecord) -> Vec<Line<'static>> {
    let website = if record.org_website.is_empty() { "N/A" } else { record.org_website.as_str() };
    [
        ("Name", record.full_name()),
        ("Email", record.email.clone()),
        ("Phone", record.phone.clone()),
        ("Country", record.country.clone()),
        ("Age", record.age.to_string()),
        ("Organization", format!("{} ({})", record.org_name, record.org_type)),
        ("Position", record.position.clone()),
        ("Website", website.to_string()),
        ("Focus Areas", record.focus_areas.join(", ")),
        ("Motivation", record.motivation.clone()),
        ("Experience", record.experience.clone()),
        ("Contribution", record.contribution.clone()),
        ("Submitted", record.submitted_date.format("%Y-%m-%d").to_string()),
        ("Status", record.status.as_str().to_uppercase()),
    ]
    .into_iter()
    .map(|(label, value)| {
        Line::from(vec![
            Span::styled(format!("{:<14}", label), Style::default().fg(Color::Yellow)),
            Span::raw(value),
        ])
    })
    .collect()
}

fn render_event_form_popup(f: &mut Frame, app: &App) {
    let area = popup_area(f.area());
    f.render_widget(Clear, area);
    let lines: Vec<Line> = EventDraft::FIELDS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            Line::from(vec![
                Span::styled(format!("{:<12}", name), Style::default().fg(Color::Yellow)),
                Span::styled(app.event_draft.field(i).to_string(), focus_style(i == app.event_focus)),
            ])
        })
        .chain(std::iter::once(Line::from("")))
        .chain(std::iter::once(Line::from("Date as YYYY-MM-DD, time as HH:MM")))
        .collect();
    f.render_widget(Paragraph::new(lines).block(titled("Create Event")), area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = popup_area(f.area());

    f.render_widget(Clear, area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("YAN Portal Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, area);
}

fn get_help_text() -> &'static str {
    r#"YAN PORTAL KEY REFERENCE

=== NAVIGATION ===
1               Home
2               Membership application
3               Opportunities
4               Events calendar
5               About
6               Member resources (members and admins)
7               Profile (members and admins)
d               Your dashboard (log in first)
l               Log in, or log out when signed in
? or F1         Show this help
q               Quit

=== APPLICATION WIZARD ===
Tab / ↓         Next field
Shift+Tab / ↑   Previous field
← →             Move through focus areas
Space           Toggle focus area / accept terms on the review step
Enter           Validate and go to the next step; submit on the review step
PgUp / Ctrl+B   Previous step
Esc             Leave the wizard (what you typed is kept)

Step 1 asks for personal details, step 2 for your organization and
at least one focus area, step 3 for motivation and experience, and
step 4 shows everything for review before submission.

=== ADMIN DASHBOARD ===
↑↓ or j/k       Select application
f               Cycle status filter (all, pending, under review, accepted, rejected)
Enter           View application details
  a             Accept
  r             Reject
  u             Mark under review
  p             Mark pending
x               Export the filtered list to CSV in the data directory

=== EVENTS ===
← → or [ ]      Previous / next month
n               Create an event (admins)

=== OPPORTUNITIES AND RESOURCES ===
c               Cycle category filter

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window

All changes are saved automatically."#
}
