//! Roster TUI entry point.

use chrono::Utc;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use roster_client::{RecordStore, RestRecordStore};
use roster_tui::config::TuiConfig;
use roster_tui::error::TuiError;
use roster_tui::events::TuiEvent;
use roster_tui::keys::map_key;
use roster_tui::state::{App, Effect, Request};
use roster_tui::views::render_view;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    roster_tui::logging::init(&config.log_path)?;
    let store = RestRecordStore::new(config.api_base_url.clone(), config.request_timeout())?;
    let mut app = App::new(store, config.notification_ttl());

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());
    let store = app.store();

    if let Ok(request) = app.start() {
        spawn_request(Arc::clone(&store), request, event_tx.clone());
    }

    let mut ticker = tokio::time::interval(config.tick_rate());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut refresh = tokio::time::interval(config.refresh_interval());
    refresh.set_missed_tick_behavior(MissedTickBehavior::Skip);
    refresh.tick().await;

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        let effect = tokio::select! {
            _ = ticker.tick() => {
                app.prune_notifications(Utc::now());
                Effect::Continue
            }
            _ = refresh.tick() => {
                let trigger = app.periodic_trigger();
                app.begin_reload(trigger).map_or(Effect::Continue, Effect::Send)
            }
            Some(event) = event_rx.recv() => handle_event(&terminal, &mut app, event)?,
        };

        match effect {
            Effect::Quit => break,
            Effect::Send(request) => spawn_request(Arc::clone(&store), request, event_tx.clone()),
            Effect::Continue => {}
        }
    }

    tracing::info!("Shutting down");
    Ok(())
}

fn setup_terminal() -> Result<Tui, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let forwarded = match evt {
                    CrosstermEvent::Key(key) => Some(TuiEvent::Input(key)),
                    CrosstermEvent::Mouse(mouse) => Some(TuiEvent::Mouse(mouse)),
                    CrosstermEvent::Resize(width, height) => Some(TuiEvent::Resize { width, height }),
                    _ => None,
                };
                if let Some(event) = forwarded {
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
            }
        }
    });
}

/// Run a store call off the event loop and post its result back.
fn spawn_request<S: RecordStore + 'static>(
    store: Arc<S>,
    request: Request,
    sender: mpsc::Sender<TuiEvent>,
) {
    tokio::spawn(async move {
        let response = request.execute(store.as_ref()).await;
        if sender.send(TuiEvent::Store(Box::new(response))).await.is_err() {
            tracing::debug!("Event loop closed before store response arrived");
        }
    });
}

fn handle_event<S: RecordStore>(
    terminal: &Tui,
    app: &mut App<S>,
    event: TuiEvent,
) -> Result<Effect, TuiError> {
    let effect = match event {
        TuiEvent::Input(key) => match map_key(key, app.input_mode()) {
            Some(action) => app.handle(action),
            None => Effect::Continue,
        },
        TuiEvent::Mouse(mouse) => {
            if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                app.click(terminal.size()?, mouse.column, mouse.row);
            }
            Effect::Continue
        }
        TuiEvent::Store(response) => app
            .complete(*response)
            .follow_up
            .map_or(Effect::Continue, Effect::Send),
        TuiEvent::Resize { .. } => Effect::Continue,
    };
    Ok(effect)
}
