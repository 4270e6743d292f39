//! medichat — interactive Ratatui TUI
//!
//! Layout:
//!   ┌─── header ──────────────────────────────────────────────────────────┐
//!   │  medichat    [Chat]  [Summary]            Sarah Mitchell · MRN-…    │
//!   ├─── body ────────────────────────────────────────────────────────────┤
//!   │  Chat tab: transcript + input line                                  │
//!   │  Summary tab: full patient record, scrollable                       │
//!   ├─────────────────────────────────────────────────────────────────────┤
//!   │  footer (key bindings)                                              │
//!   └─────────────────────────────────────────────────────────────────────┘
//!
//! The event loop drives the session: key events feed `submit`, and every
//! tick polls the session so a due assistant reply lands in the transcript.

use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};

use medichat_record::PatientSummary;
use medichat_session::{ConversationSession, DelayPolicy, Role};

// ── Domain types ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Chat,
    Summary,
}

impl Tab {
    fn name(self) -> &'static str {
        match self {
            Tab::Chat => "Chat",
            Tab::Summary => "Summary",
        }
    }

    fn toggle(self) -> Self {
        match self {
            Tab::Chat => Tab::Summary,
            Tab::Summary => Tab::Chat,
        }
    }
}

// ── App state ─────────────────────────────────────────────────────────────────

struct App {
    session: ConversationSession,
    tab: Tab,

    // The chat input line being edited.
    input: String,

    // Scroll offsets. Chat scroll is measured from the bottom (0 = stick to
    // the newest message); summary scroll from the top.
    chat_scroll: u16,
    summary_scroll: u16,
}

impl App {
    fn new(record: PatientSummary) -> Self {
        Self {
            session: ConversationSession::new(Arc::new(record), DelayPolicy::default()),
            tab: Tab::Chat,
            input: String::new(),
            chat_scroll: 0,
            summary_scroll: 0,
        }
    }

    /// Submit the current input line, clearing it on acceptance.
    fn send(&mut self) {
        if self.session.submit(&self.input, Instant::now()) {
            self.input.clear();
            self.chat_scroll = 0;
        }
    }

    /// Deliver a due assistant reply, if any. Returns true when the
    /// transcript changed.
    fn tick(&mut self) -> bool {
        let delivered = self.session.poll_reply(Instant::now());
        if delivered {
            // Jump back to the newest message when the reply lands.
            self.chat_scroll = 0;
        }
        delivered
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn ui(f: &mut Frame, app: &App) {
    let full = f.area();

    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(8),    // body
            Constraint::Length(3), // footer
        ])
        .split(full);

    render_header(f, outer_chunks[0], app);
    match app.tab {
        Tab::Chat => render_chat(f, outer_chunks[1], app),
        Tab::Summary => render_summary(f, outer_chunks[1], app),
    }
    render_footer(f, outer_chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut spans: Vec<Span> = vec![Span::styled("medichat    ", title_style)];

    for tab in [Tab::Chat, Tab::Summary] {
        let style = if app.tab == tab {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {} ", tab.name()), style));
        spans.push(Span::raw("  "));
    }

    let patient = &app.session.record().patient;
    spans.push(Span::styled(
        format!(
            "{} · {} years · {} · {}",
            patient.name, patient.age, patient.gender, patient.mrn
        ),
        Style::default().fg(Color::Gray),
    ));

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(header, area);
}

fn render_chat(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    render_transcript(f, chunks[0], app);
    render_input(f, chunks[1], app);
}

fn render_transcript(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Medical AI Assistant ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let mut lines: Vec<Line> = Vec::new();

    for message in app.session.messages() {
        let (speaker, speaker_style) = match message.role {
            Role::Assistant => (
                "Assistant",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Role::User => (
                "You",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        };

        let stamp = message
            .timestamp
            .with_timezone(&Local)
            .format("%H:%M:%S");

        lines.push(Line::from(vec![
            Span::styled(speaker, speaker_style),
            Span::styled(format!("  {}", stamp), Style::default().fg(Color::DarkGray)),
        ]));

        for content_line in message.content.lines() {
            lines.push(Line::from(format!("  {}", content_line)));
        }

        if let Some(provenance) = &message.provenance {
            lines.push(Line::from(Span::styled(
                format!("  Context: {}", provenance),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        lines.push(Line::from(""));
    }

    if app.session.awaiting_reply() {
        lines.push(Line::from(Span::styled(
            "AI is analyzing the medical records...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    // Stick to the bottom unless the user has scrolled up.
    let viewport = area.height.saturating_sub(2);
    let total = estimated_rows(&lines, area.width.saturating_sub(2));
    let bottom_offset = total.saturating_sub(viewport);
    let offset = bottom_offset.saturating_sub(app.chat_scroll);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    f.render_widget(paragraph, area);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let awaiting = app.session.awaiting_reply();

    let title = if awaiting { " Input (waiting for reply) " } else { " Input " };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = if app.input.is_empty() {
        Paragraph::new(Span::styled(
            "Ask about medications, allergies, lab results, or medical history...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(app.input.as_str())
    };
    f.render_widget(paragraph.block(block), area);

    // Place the cursor after the typed text while input is enabled.
    if !awaiting {
        let max_x = area.x + area.width.saturating_sub(2);
        let x = (area.x + 1 + app.input.chars().count() as u16).min(max_x);
        f.set_cursor_position((x, area.y + 1));
    }
}

fn render_summary(f: &mut Frame, area: Rect, app: &App) {
    let record = app.session.record();

    let section = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let label = Style::default().fg(Color::Gray);

    let mut lines: Vec<Line> = Vec::new();

    // ── Patient Information ──────────────────────────────────────────────────
    let patient = &record.patient;
    lines.push(Line::from(Span::styled("Patient Information", section)));
    lines.push(Line::from(vec![
        Span::styled("  Name:    ", label),
        Span::raw(patient.name.clone()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  MRN:     ", label),
        Span::raw(patient.mrn.clone()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Age:     ", label),
        Span::raw(format!("{} years", patient.age)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Gender:  ", label),
        Span::raw(patient.gender.clone()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  DOB:     ", label),
        Span::raw(patient.date_of_birth.clone()),
    ]));
    lines.push(Line::from(""));

    // ── Latest Vital Signs ───────────────────────────────────────────────────
    let vitals = &record.vital_signs;
    lines.push(Line::from(vec![
        Span::styled("Latest Vital Signs", section),
        Span::styled(
            format!("  (recorded {})", vitals.last_recorded),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    for (name, value) in [
        ("Blood Pressure", vitals.blood_pressure.clone()),
        ("Heart Rate", vitals.heart_rate.clone()),
        ("Temperature", vitals.temperature.clone()),
        ("Weight", vitals.weight.clone()),
        ("Height", vitals.height.clone()),
        ("BMI", vitals.bmi.to_string()),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<16}", format!("{}:", name)), label),
            Span::raw(value),
        ]));
    }
    lines.push(Line::from(""));

    // ── Allergies ────────────────────────────────────────────────────────────
    lines.push(Line::from(Span::styled("Allergies", section)));
    for allergy in &record.medical_history.allergies {
        let severity_color = if allergy.severity == "Severe" {
            Color::Red
        } else {
            Color::Yellow
        };
        lines.push(Line::from(vec![
            Span::raw(format!("  {} - {} ", allergy.allergen, allergy.reaction)),
            Span::styled(
                format!("[{}]", allergy.severity),
                Style::default().fg(severity_color),
            ),
        ]));
    }
    lines.push(Line::from(""));

    // ── Current Medications ──────────────────────────────────────────────────
    lines.push(Line::from(Span::styled("Current Medications", section)));
    for med in &record.current_medications {
        lines.push(Line::from(format!("  {} {} - {}", med.name, med.dosage, med.frequency)));
        lines.push(Line::from(Span::styled(
            format!("    Prescribed by: {} (since {})", med.prescribed_by, med.start_date),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));

    // ── Chronic Conditions ───────────────────────────────────────────────────
    lines.push(Line::from(Span::styled("Chronic Conditions", section)));
    for condition in &record.medical_history.chronic_conditions {
        let status_color = if condition.status == "Active" {
            Color::Yellow
        } else {
            Color::Green
        };
        lines.push(Line::from(vec![
            Span::raw(format!("  {} ", condition.condition)),
            Span::styled(
                format!("[{}]", condition.status),
                Style::default().fg(status_color),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    Diagnosed: {}", condition.diagnosed_date),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));

    // ── Surgical History ─────────────────────────────────────────────────────
    lines.push(Line::from(Span::styled("Surgical History", section)));
    for procedure in &record.medical_history.surgical_history {
        lines.push(Line::from(format!("  {} ({})", procedure.procedure, procedure.date)));
        lines.push(Line::from(Span::styled(
            format!("    Complications: {}", procedure.complications),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));

    // ── Recent Lab Results ───────────────────────────────────────────────────
    lines.push(Line::from(Span::styled("Recent Lab Results", section)));
    for lab in &record.lab_results {
        let status_color = if lab.status == "Normal" {
            Color::Green
        } else {
            Color::Red
        };
        lines.push(Line::from(vec![
            Span::raw(format!("  {}: {} ", lab.test, lab.result)),
            Span::styled(format!("[{}]", lab.status), Style::default().fg(status_color)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    Reference: {}  Date: {}", lab.reference, lab.date),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));

    // ── Recent Visits ────────────────────────────────────────────────────────
    lines.push(Line::from(Span::styled("Recent Visits", section)));
    for visit in &record.recent_visits {
        lines.push(Line::from(format!(
            "  {} - {} with {}",
            visit.date, visit.visit_type, visit.provider
        )));
        for (name, value) in [
            ("Chief Complaint", &visit.chief_complaint),
            ("Assessment", &visit.assessment),
            ("Plan", &visit.plan),
        ] {
            lines.push(Line::from(Span::styled(
                format!("    {}: {}", name, value),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let block = Block::default()
        .title(" Patient Medical Summary ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.summary_scroll, 0));
    f.render_widget(paragraph, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let key = Style::default().fg(Color::Cyan);

    let mut spans: Vec<Span> = vec![
        Span::styled(" [Tab] ", key),
        Span::raw(match app.tab {
            Tab::Chat => "Summary  ",
            Tab::Summary => "Chat  ",
        }),
    ];

    if app.tab == Tab::Chat {
        spans.push(Span::styled("[Enter] ", key));
        spans.push(Span::raw("Send  "));
    }

    spans.push(Span::styled("[Up/Down] ", key));
    spans.push(Span::raw("Scroll  "));
    spans.push(Span::styled("[Esc] ", key));
    spans.push(Span::raw("Quit"));

    if app.session.awaiting_reply() {
        spans.push(Span::styled(
            "    awaiting reply...",
            Style::default().fg(Color::Yellow),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(footer, area);
}

// ── Utility helpers ───────────────────────────────────────────────────────────

/// Estimate how many terminal rows `lines` occupy at `width` once wrapped.
///
/// Good enough for scroll anchoring; exact wrapping is the renderer's job.
fn estimated_rows(lines: &[Line], width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let total: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(width as usize).max(1))
        .sum();
    total.min(u16::MAX as usize) as u16
}

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ── Main event loop ───────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        // Best-effort terminal restore on panic.
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let mut app = App::new(PatientSummary::demo());

    loop {
        terminal.draw(|f| ui(f, &app))?;

        // Poll fast while a reply is pending so it lands promptly; otherwise
        // a long timeout avoids burning CPU.
        let timeout = if app.session.awaiting_reply() {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(200)
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    // Ctrl-C and Esc quit from anywhere.
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    KeyCode::Esc => break,

                    // Tab toggles between Chat and Summary.
                    KeyCode::Tab => {
                        app.tab = app.tab.toggle();
                    }

                    // Scrolling applies to the active tab.
                    KeyCode::Up => match app.tab {
                        Tab::Chat => app.chat_scroll = app.chat_scroll.saturating_add(1),
                        Tab::Summary => {
                            app.summary_scroll = app.summary_scroll.saturating_add(1)
                        }
                    },
                    KeyCode::Down => match app.tab {
                        Tab::Chat => app.chat_scroll = app.chat_scroll.saturating_sub(1),
                        Tab::Summary => {
                            app.summary_scroll = app.summary_scroll.saturating_sub(1)
                        }
                    },

                    // Chat input editing.
                    KeyCode::Enter if app.tab == Tab::Chat => {
                        app.send();
                    }
                    KeyCode::Backspace if app.tab == Tab::Chat => {
                        app.input.pop();
                    }
                    KeyCode::Char(c) if app.tab == Tab::Chat => {
                        app.input.push(c);
                    }

                    // On the summary tab, q also quits.
                    KeyCode::Char('q') | KeyCode::Char('Q') if app.tab == Tab::Summary => break,

                    _ => {}
                }
            }
        }

        // Deliver a due assistant reply, if any.
        app.tick();
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}
