use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use chrono::Datelike;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use folio_core::{
    contact::{ContactService, EmailJsTransport},
    AppConfig, ContentStore,
};
use folio_tui::{
    app::{App, Command, Mode, ToastKind},
    event::{AppEvent, ContactResult, EventHandler},
    input::handle_key_event,
    load_theme,
    widgets::{NavBarWidget, PageWidget, PopupWidget, StatusBarWidget},
};

/// Rows taken by the nav bar and status bar around the page
const CHROME_ROWS: u16 = 2;

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    let portfolio = ContentStore::load(&config)?;
    let theme = load_theme(&config.ui.theme);
    let year = chrono::Local::now().year();

    let transport = Arc::new(EmailJsTransport::new(&config.contact)?);
    let contact = ContactService::new(
        config.contact.clone(),
        transport,
        portfolio.personal.name.clone(),
        portfolio.personal.email.clone(),
    );
    if !contact.is_configured() {
        tracing::warn!("EmailJS credentials missing, the contact form will not send");
    }

    let mut app = App::new(config.clone(), portfolio, theme, year)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    let title = format!("{} | Portfolio", app.portfolio.personal.name);
    execute!(stdout, EnterAlternateScreen, SetTitle(title))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &contact).await;

    app.shutdown(Instant::now());

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    contact: &ContactService,
) -> Result<()> {
    let event_handler = EventHandler::with_animation_fps(
        app.config.ui.tick_rate_ms,
        app.config.ui.scroll.animation_fps,
    );

    // Create channel for contact form sends running on the runtime
    let (contact_tx, mut contact_rx) = mpsc::unbounded_channel::<ContactResult>();

    // First frame animates the hero entrance
    let mut needs_fast_update = true;

    loop {
        // Process any completed sends (non-blocking)
        while let Ok(result) = contact_rx.try_recv() {
            app.on_contact_result(result.outcome, Instant::now());
        }

        let size = terminal.size()?;
        app.resize(size.width, size.height.saturating_sub(CHROME_ROWS));

        let now = Instant::now();
        app.update(now);
        terminal.draw(|frame| draw(frame, app, now))?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app);
                    if let Some(command) = app.handle_action(action, Instant::now()) {
                        perform(app, command, contact, &contact_tx);
                    }
                }
                // Picked up by the size check at the top of the loop
                AppEvent::Resize(w, h) => tracing::trace!(w, h, "terminal resized"),
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_fast_update(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame, app: &App, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Nav bar
            Constraint::Min(1),    // Page
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    NavBarWidget::render(frame, chunks[0], app);
    PageWidget::render(frame, chunks[1], app, now);
    StatusBarWidget::render(frame, chunks[2], app);

    if app.is_menu_open() {
        PopupWidget::render_menu(frame, app);
    }

    match app.mode {
        Mode::ProjectPicker { selected } => PopupWidget::render_project_picker(frame, app, selected),
        Mode::ProjectDetail { index } => PopupWidget::render_project_detail(frame, app, index),
        Mode::Contact => PopupWidget::render_contact_form(frame, app),
        Mode::Help => PopupWidget::render_help(frame, app),
        Mode::Normal => {}
    }
}

fn perform(
    app: &mut App,
    command: Command,
    contact: &ContactService,
    tx: &mpsc::UnboundedSender<ContactResult>,
) {
    match command {
        Command::OpenUrl(url) => {
            tracing::info!("Opening {}", url);
            if let Err(e) = open::that_detached(&url) {
                tracing::error!("Failed to open {}: {}", url, e);
                app.set_toast("Couldn't open link", url, ToastKind::Error, Instant::now());
            }
        }
        Command::SendContact(form) => {
            let service = contact.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = service.submit(&form).await;
                // Receiver only goes away when the app is quitting
                let _ = tx.send(ContactResult { outcome });
            });
        }
    }
}
